pub mod app_config;
pub mod args;
pub mod startup;
