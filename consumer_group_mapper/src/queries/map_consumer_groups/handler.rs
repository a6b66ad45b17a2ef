use crate::admin::{AdminWrapper, GroupDescription, GroupsAdmin};
use crate::mapping::GroupTopicMapping;
use crate::output::{write_mapping, OutputPaths};
use crate::queries::map_consumer_groups::{
    AdminTimeouts, GroupFailure, GroupOutcome, GroupTopicReport, MapConsumerGroupsQueryInternal,
    MapConsumerGroupsQueryInternalResponse,
};
use anyhow::Context;
use std::time::Duration;
use tracing::{debug, error, info};

#[tracing::instrument(skip_all, fields(group_filter = ?query.group_filter))]
pub async fn map_consumer_groups(
    query: MapConsumerGroupsQueryInternal,
) -> Result<MapConsumerGroupsQueryInternalResponse, anyhow::Error> {
    let handle = tokio::task::spawn_blocking(move || {
        let admin = AdminWrapper::create(&query.connection_settings)
            .context("While creating admin client")?;
        let paths = OutputPaths::from_base(&query.output_path);

        collect_and_write(
            &admin,
            query.group_filter.as_deref(),
            query.timeouts,
            &paths,
        )
    });

    handle.await.context("While joining blocking handle")?
}

/// Collects the mapping and then writes whatever was collected, also when
/// collecting failed half way.
pub fn collect_and_write(
    admin: &impl GroupsAdmin,
    group_filter: Option<&str>,
    timeouts: AdminTimeouts,
    paths: &OutputPaths,
) -> Result<MapConsumerGroupsQueryInternalResponse, anyhow::Error> {
    let collected = collect_group_topics(admin, group_filter, timeouts);

    let empty = GroupTopicMapping::new();
    let mapping = collected.as_ref().map(|x| &x.mapping).unwrap_or(&empty);
    let written = write_mapping(mapping, paths).context("While writing mapping files")?;

    let report = collected?;
    Ok(MapConsumerGroupsQueryInternalResponse { report, written })
}

pub fn collect_group_topics(
    admin: &impl GroupsAdmin,
    group_filter: Option<&str>,
    timeouts: AdminTimeouts,
) -> Result<GroupTopicReport, anyhow::Error> {
    info!("Fetching consumer groups...");
    let group_ids = admin
        .list_group_ids(timeouts.list_groups)
        .context("While listing consumer groups")?;

    let group_ids = filter_groups(group_ids, group_filter);
    if group_ids.is_empty() {
        info!("No consumer groups found.");
        return Ok(GroupTopicReport::default());
    }

    info!("Found {} consumer groups.", group_ids.len());
    info!("Describing consumer groups and their topic assignments");

    let outcomes = group_ids
        .iter()
        .map(|group_id| describe_group(admin, group_id, timeouts.describe_group))
        .collect::<Vec<_>>();

    let report = GroupTopicReport::from_outcomes(outcomes);
    if !report.failures.is_empty() {
        error!(
            "Failed to describe {} of {} groups: {}",
            report.failures.len(),
            report.groups_found,
            report
                .failures
                .iter()
                .map(|x| x.group_id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(report)
}

/// Exact match on the filter, or the empty set when it is not among the listed groups.
pub fn filter_groups(group_ids: Vec<String>, group_filter: Option<&str>) -> Vec<String> {
    let Some(filter) = group_filter else {
        return group_ids;
    };

    group_ids
        .into_iter()
        .find(|x| x == filter)
        .into_iter()
        .collect()
}

fn describe_group(admin: &impl GroupsAdmin, group_id: &str, timeout: Duration) -> GroupOutcome {
    match admin.describe_group(group_id, timeout) {
        Ok(description) => {
            log_description(&description);
            GroupOutcome::Described(description)
        }
        Err(e) => {
            error!("Error describing group {}: {:?}", group_id, e);
            GroupOutcome::Failed(GroupFailure {
                group_id: group_id.to_owned(),
                reason: e,
            })
        }
    }
}

fn log_description(description: &GroupDescription) {
    info!(
        "Consumer group: {}, state: {}",
        description.group_id, description.state
    );
    debug!(
        "Group {} protocol type '{}', members: {:?}",
        description.group_id,
        description.protocol_type,
        description
            .members
            .iter()
            .map(|x| format!("{}@{}", x.client_id, x.client_host))
            .collect::<Vec<_>>()
    );

    if description.members.is_empty() {
        info!("  No active members in this group.");
        return;
    }

    let topics = description.consumed_topics();
    if topics.is_empty() {
        info!("  No topics currently assigned to members.");
    } else {
        info!(
            "  Consumed topics: {}",
            topics.into_iter().collect::<Vec<_>>().join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn no_filter_keeps_every_group() {
        assert_eq!(filter_groups(ids(&["a", "b"]), None), ids(&["a", "b"]));
    }

    #[test]
    fn matching_filter_keeps_one_group() {
        assert_eq!(filter_groups(ids(&["a", "b", "c"]), Some("b")), ids(&["b"]));
    }

    #[test]
    fn filter_is_exact_match() {
        assert!(filter_groups(ids(&["orders-consumer"]), Some("orders")).is_empty());
    }

    #[test]
    fn unknown_filter_gives_empty_set() {
        assert!(filter_groups(ids(&["a", "b"]), Some("z")).is_empty());
    }
}
