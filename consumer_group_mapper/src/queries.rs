pub mod map_consumer_groups;
