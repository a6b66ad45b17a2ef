use getset::Getters;
use std::collections::{BTreeMap, BTreeSet};

pub type GroupToTopics = BTreeMap<String, BTreeSet<String>>;
pub type TopicToGroups = BTreeMap<String, BTreeSet<String>>;

/// Consumer group to topic relation kept in both directions.
///
/// Both maps are only ever changed together through [`GroupTopicMapping::insert`],
/// so `t ∈ group_to_topics[g]` holds exactly when `g ∈ topic_to_groups[t]`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct GroupTopicMapping {
    group_to_topics: GroupToTopics,
    topic_to_groups: TopicToGroups,
}

impl GroupTopicMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: &str, topic: &str) {
        self.group_to_topics
            .entry(group.to_owned())
            .or_default()
            .insert(topic.to_owned());
        self.topic_to_groups
            .entry(topic.to_owned())
            .or_default()
            .insert(group.to_owned());
    }

    pub fn extend<'a>(&mut self, group: &str, topics: impl IntoIterator<Item = &'a str>) {
        for topic in topics {
            self.insert(group, topic);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.group_to_topics.is_empty()
    }

    pub fn topics_of(&self, group: &str) -> Option<&BTreeSet<String>> {
        self.group_to_topics.get(group)
    }

    pub fn groups_of(&self, topic: &str) -> Option<&BTreeSet<String>> {
        self.topic_to_groups.get(topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_inverse(mapping: &GroupTopicMapping) {
        for (group, topics) in mapping.group_to_topics() {
            for topic in topics {
                assert!(mapping.groups_of(topic).unwrap().contains(group));
            }
        }
        for (topic, groups) in mapping.topic_to_groups() {
            for group in groups {
                assert!(mapping.topics_of(group).unwrap().contains(topic));
            }
        }
    }

    #[test]
    fn duplicates_collapse() {
        let mut mapping = GroupTopicMapping::new();

        mapping.insert("g1", "orders");
        mapping.insert("g1", "orders");
        mapping.insert("g1", "payments");

        assert_eq!(mapping.topics_of("g1").unwrap().len(), 2);
        assert_eq!(mapping.groups_of("orders").unwrap().len(), 1);
    }

    #[test]
    fn both_directions_stay_inverse() {
        let pairs = [
            ("g1", "orders"),
            ("g2", "orders"),
            ("g2", "payments"),
            ("g3", "audit"),
            ("g1", "audit"),
            ("g3", "audit"),
        ];
        let mut mapping = GroupTopicMapping::new();
        for (group, topic) in pairs {
            mapping.insert(group, topic);
        }

        assert_inverse(&mapping);
        assert_eq!(mapping.group_to_topics().len(), 3);
        assert_eq!(mapping.topic_to_groups().len(), 3);
        let pair_count: usize = mapping.group_to_topics().values().map(|x| x.len()).sum();
        let inverse_pair_count: usize = mapping.topic_to_groups().values().map(|x| x.len()).sum();
        assert_eq!(pair_count, 5);
        assert_eq!(pair_count, inverse_pair_count);
    }

    #[test]
    fn new_mapping_is_empty() {
        let mapping = GroupTopicMapping::new();

        assert!(mapping.is_empty());
        assert!(mapping.topic_to_groups().is_empty());
    }
}
