pub mod admin;
pub mod config_loader;
pub mod connection_settings;
pub mod mapping;
pub mod output;
pub mod queries;
pub mod settings;
