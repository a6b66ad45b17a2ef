use crate::admin::GroupDescription;
use crate::mapping::GroupTopicMapping;
use crate::output::WrittenFiles;
use std::collections::BTreeSet;

#[derive(Debug)]
pub enum GroupOutcome {
    Described(GroupDescription),
    Failed(GroupFailure),
}

#[derive(Debug)]
pub struct GroupFailure {
    pub group_id: String,
    pub reason: anyhow::Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedGroup {
    pub group_id: String,
    pub state: String,
    pub members_count: usize,
    pub topics: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct GroupTopicReport {
    /// Groups left after listing and filtering.
    pub groups_found: usize,
    pub described: Vec<DescribedGroup>,
    pub failures: Vec<GroupFailure>,
    pub mapping: GroupTopicMapping,
}

impl GroupTopicReport {
    pub fn from_outcomes(outcomes: Vec<GroupOutcome>) -> Self {
        let mut report = GroupTopicReport {
            groups_found: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                GroupOutcome::Described(description) => {
                    let topics = description.consumed_topics();
                    report.mapping.extend(&description.group_id, topics.iter().copied());

                    report.described.push(DescribedGroup {
                        group_id: description.group_id.clone(),
                        state: description.state.clone(),
                        members_count: description.members.len(),
                        topics: topics.into_iter().map(|x| x.to_owned()).collect(),
                    });
                }
                GroupOutcome::Failed(failure) => report.failures.push(failure),
            }
        }

        report
    }
}

#[derive(Debug)]
pub struct MapConsumerGroupsQueryInternalResponse {
    pub report: GroupTopicReport,
    pub written: WrittenFiles,
}
