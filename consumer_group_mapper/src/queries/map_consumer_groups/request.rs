use crate::connection_settings::ConnectionSettings;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LIST_GROUPS_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_DESCRIBE_GROUP_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug)]
pub struct MapConsumerGroupsQueryInternal {
    pub connection_settings: ConnectionSettings,
    pub group_filter: Option<String>,
    pub output_path: PathBuf,
    pub timeouts: AdminTimeouts,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AdminTimeouts {
    pub list_groups: Duration,
    /// Applied to every single group description.
    pub describe_group: Duration,
}

impl Default for AdminTimeouts {
    fn default() -> Self {
        Self {
            list_groups: DEFAULT_LIST_GROUPS_TIMEOUT,
            describe_group: DEFAULT_DESCRIBE_GROUP_TIMEOUT,
        }
    }
}
