use crate::admin::{
    consumer_group_ids, decode_assignment_for_protocol, GroupDescription, GroupMember, GroupsAdmin,
};
use crate::connection_settings::ConnectionSettings;
use anyhow::{anyhow, Context};
use rdkafka::admin::AdminClient;
use rdkafka::client::DefaultClientContext;
use rdkafka::groups::GroupInfo;
use rdkafka::util::Timeout;
use rdkafka::ClientConfig;
use std::ops::Deref;
use std::time::Duration;
use tracing::trace;

pub struct AdminWrapper {
    client: AdminClient<DefaultClientContext>,
}

impl AdminWrapper {
    pub fn create(connection_settings: &ConnectionSettings) -> Result<Self, anyhow::Error> {
        // https://raw.githubusercontent.com/confluentinc/librdkafka/master/CONFIGURATION.md
        let client: AdminClient<DefaultClientContext> = ClientConfig::try_from(connection_settings)
            .context("While building admin client config")?
            .create()
            .context("While creating kafka AdminClient")?;

        Ok(Self { client })
    }
}

impl GroupsAdmin for AdminWrapper {
    fn list_group_ids(&self, timeout: Duration) -> Result<Vec<String>, anyhow::Error> {
        let groups = self
            .inner()
            .fetch_group_list(None, Timeout::After(timeout))
            .context("While fetching consumer groups")?;

        trace!("Broker returned {} groups", groups.groups().len());

        Ok(consumer_group_ids(
            groups
                .groups()
                .iter()
                .map(|x| (x.name(), x.protocol_type())),
        ))
    }

    fn describe_group(
        &self,
        group_id: &str,
        timeout: Duration,
    ) -> Result<GroupDescription, anyhow::Error> {
        let groups = self
            .inner()
            .fetch_group_list(Some(group_id), Timeout::After(timeout))
            .with_context(|| format!("While describing group {group_id}"))?;

        let group = groups
            .groups()
            .iter()
            .find(|x| x.name() == group_id)
            .ok_or_else(|| anyhow!("Group {group_id} is missing in describe response"))?;

        group_info_to_description(group)
    }
}

fn group_info_to_description(group: &GroupInfo) -> Result<GroupDescription, anyhow::Error> {
    let members = group
        .members()
        .iter()
        .map(|member| {
            let assignment =
                decode_assignment_for_protocol(group.protocol_type(), member.assignment())
                    .with_context(|| {
                        format!(
                            "While decoding assignment of member {} in group {}",
                            member.id(),
                            group.name()
                        )
                    })?;

            Ok(GroupMember {
                member_id: member.id().to_owned(),
                client_id: member.client_id().to_owned(),
                client_host: member.client_host().to_owned(),
                assignment,
            })
        })
        .collect::<Result<Vec<_>, anyhow::Error>>()?;

    Ok(GroupDescription {
        group_id: group.name().to_owned(),
        state: group.state().to_owned(),
        protocol_type: group.protocol_type().to_owned(),
        members,
    })
}

impl Deref for AdminWrapper {
    type Target = AdminClient<DefaultClientContext>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
