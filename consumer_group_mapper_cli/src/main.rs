#![warn(unused_imports)]
#![deny(clippy::clone_on_copy)]
#![deny(clippy::style)]

use anyhow::Context;
use consumer_group_mapper_cli::app_config::AppConfig;
use consumer_group_mapper_cli::args::parse_run_settings;
use consumer_group_mapper_cli::startup::run;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let settings = match parse_run_settings(std::env::args_os()) {
        Ok(settings) => settings,
        Err(exit) => {
            exit.print();
            std::process::exit(exit.code);
        }
    };

    let log_level = std::env::var("RUST_LOG").unwrap_or("info".to_owned());
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(log_level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .init();

    let app_config = AppConfig::build().context("While building app config")?;

    run(settings, app_config).await?;

    Ok(())
}
