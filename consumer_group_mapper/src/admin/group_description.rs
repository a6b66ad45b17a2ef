use crate::admin::{decode_member_assignment, AssignmentDecodeError, MemberAssignment};
use std::collections::BTreeSet;

pub const CONSUMER_PROTOCOL_TYPE: &str = "consumer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDescription {
    pub group_id: String,
    /// Broker reported state, e.g. `Stable`, `Empty`, `PreparingRebalance`.
    pub state: String,
    pub protocol_type: String,
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub member_id: String,
    pub client_id: String,
    pub client_host: String,
    pub assignment: Option<MemberAssignment>,
}

impl GroupDescription {
    pub fn consumed_topics(&self) -> BTreeSet<&str> {
        self.members
            .iter()
            .filter_map(|x| x.assignment.as_ref())
            .flat_map(|x| x.topics())
            .collect()
    }
}

/// Groups registered without a protocol type are plain consumer groups too.
pub fn is_consumer_protocol(protocol_type: &str) -> bool {
    protocol_type.is_empty() || protocol_type == CONSUMER_PROTOCOL_TYPE
}

/// Names of the listed groups that are consumer groups, in listing order.
/// Connect workers, schema registry leaders and the like are left out.
pub fn consumer_group_ids<'a>(
    groups: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<String> {
    groups
        .into_iter()
        .filter(|(_, protocol_type)| is_consumer_protocol(protocol_type))
        .map(|(name, _)| name.to_owned())
        .collect()
}

/// Only groups speaking the consumer protocol carry assignments in the
/// consumer wire format. Other groups get `None`.
pub fn decode_assignment_for_protocol(
    protocol_type: &str,
    bytes: Option<&[u8]>,
) -> Result<Option<MemberAssignment>, AssignmentDecodeError> {
    if !is_consumer_protocol(protocol_type) {
        return Ok(None);
    }

    match bytes {
        None => Ok(None),
        Some(bytes) => decode_member_assignment(bytes).map(Some),
    }
}
