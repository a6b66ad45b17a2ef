use crate::app_config::AppConfig;
use anyhow::Context;
use consumer_group_mapper::config_loader::load_config;
use consumer_group_mapper::connection_settings::ConnectionSettings;
use consumer_group_mapper::queries::map_consumer_groups::{
    map_consumer_groups, MapConsumerGroupsQueryInternal,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug)]
pub struct RunSettings {
    pub config_file: PathBuf,
    pub output_file: PathBuf,
    pub group: Option<String>,
}

pub async fn run(settings: RunSettings, app_config: AppConfig) -> Result<(), anyhow::Error> {
    let config = load_config(&settings.config_file).context("While loading config file")?;
    let connection_settings = ConnectionSettings::from_config(&config)
        .context("While reading cluster connection settings")?;
    info!("Cluster: {:?}", connection_settings);

    let query = MapConsumerGroupsQueryInternal {
        connection_settings,
        group_filter: settings.group,
        output_path: settings.output_file,
        timeouts: app_config.timeouts(),
    };

    let response = map_consumer_groups(query)
        .await
        .context("While mapping consumer groups to topics")?;

    let report = &response.report;
    info!(
        "Done. Groups: {}, described: {}, failed: {}, topics: {}",
        report.groups_found,
        report.described.len(),
        report.failures.len(),
        report.mapping.topic_to_groups().len()
    );
    for failure in &report.failures {
        warn!("Group {} skipped: {:#}", failure.group_id, failure.reason);
    }

    Ok(())
}
