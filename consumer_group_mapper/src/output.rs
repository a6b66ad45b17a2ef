use crate::mapping::GroupTopicMapping;
use anyhow::Context;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub topics_file: PathBuf,
    pub groups_file: PathBuf,
}

impl OutputPaths {
    /// `/tmp/report.json` becomes `/tmp/report-topics.json` and `/tmp/report-groups.json`.
    pub fn from_base(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let stem = base
            .file_stem()
            .map(|x| x.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = base
            .extension()
            .map(|x| format!(".{}", x.to_string_lossy()))
            .unwrap_or_default();
        let directory = base.parent().unwrap_or_else(|| Path::new(""));

        Self {
            topics_file: directory.join(format!("{stem}-topics{suffix}")),
            groups_file: directory.join(format!("{stem}-groups{suffix}")),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub topics_file: Option<PathBuf>,
    pub groups_file: Option<PathBuf>,
}

/// JSON has no set type, so sets go out as arrays.
#[derive(Serialize)]
#[serde(transparent)]
struct SetsAsLists<'a>(BTreeMap<&'a str, Vec<&'a str>>);

impl<'a> From<&'a BTreeMap<String, BTreeSet<String>>> for SetsAsLists<'a> {
    fn from(value: &'a BTreeMap<String, BTreeSet<String>>) -> Self {
        let map: BTreeMap<&str, Vec<&str>> = value
            .iter()
            .map(|(key, set)| (key.as_str(), set.iter().map(|x| x.as_str()).collect()))
            .collect();

        Self(map)
    }
}

/// Writes every non-empty direction of the mapping. Empty maps produce no file.
pub fn write_mapping(
    mapping: &GroupTopicMapping,
    paths: &OutputPaths,
) -> Result<WrittenFiles, anyhow::Error> {
    let mut written = WrittenFiles::default();

    if !mapping.topic_to_groups().is_empty() {
        info!(
            "Writing Topic->Groups mapping to {} file.",
            paths.topics_file.display()
        );
        write_json(&paths.topics_file, mapping.topic_to_groups())?;
        written.topics_file = Some(paths.topics_file.clone());
    }

    if !mapping.group_to_topics().is_empty() {
        info!(
            "Writing Group->Topics mapping to {} file.",
            paths.groups_file.display()
        );
        write_json(&paths.groups_file, mapping.group_to_topics())?;
        written.groups_file = Some(paths.groups_file.clone());
    }

    Ok(written)
}

fn write_json(path: &Path, map: &BTreeMap<String, BTreeSet<String>>) -> Result<(), anyhow::Error> {
    let file = File::create(path)
        .with_context(|| format!("While creating output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, &SetsAsLists::from(map))
        .with_context(|| format!("While serializing mapping to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("While flushing output file {}", path.display()))?;

    Ok(())
}
