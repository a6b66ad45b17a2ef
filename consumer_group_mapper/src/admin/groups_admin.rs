use crate::admin::GroupDescription;
use std::time::Duration;

/// Group operations the mapper needs from a cluster.
pub trait GroupsAdmin {
    fn list_group_ids(&self, timeout: Duration) -> Result<Vec<String>, anyhow::Error>;

    fn describe_group(
        &self,
        group_id: &str,
        timeout: Duration,
    ) -> Result<GroupDescription, anyhow::Error>;
}
