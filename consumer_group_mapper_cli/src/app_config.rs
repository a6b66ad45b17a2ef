use anyhow::Context;
use config::{Config, Environment};
use consumer_group_mapper::queries::map_consumer_groups::{
    AdminTimeouts, DEFAULT_DESCRIBE_GROUP_TIMEOUT, DEFAULT_LIST_GROUPS_TIMEOUT,
};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

pub const ENV_PREFIX: &str = "GROUP_MAPPER";

#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub list_groups_timeout_secs: u64,
    pub describe_group_timeout_secs: u64,
}

impl AppConfig {
    /// Defaults overridden by `GROUP_MAPPER__<KEY>` environment variables.
    pub fn build() -> Result<Self, anyhow::Error> {
        Self::build_with_env(Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn build_with_env(environment: Environment) -> Result<Self, anyhow::Error> {
        let config = Config::builder()
            .set_default(
                "list_groups_timeout_secs",
                DEFAULT_LIST_GROUPS_TIMEOUT.as_secs(),
            )?
            .set_default(
                "describe_group_timeout_secs",
                DEFAULT_DESCRIBE_GROUP_TIMEOUT.as_secs(),
            )?
            .add_source(environment.try_parsing(true))
            .build()
            .context("While building config")?;

        let deserialized_config: AppConfig = config
            .try_deserialize()
            .context("While deserializing config")?;

        info!("App config: {deserialized_config:?}");

        Ok(deserialized_config)
    }

    pub fn timeouts(&self) -> AdminTimeouts {
        AdminTimeouts {
            list_groups: Duration::from_secs(self.list_groups_timeout_secs),
            describe_group: Duration::from_secs(self.describe_group_timeout_secs),
        }
    }
}
