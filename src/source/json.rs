//! JSON snapshot source.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::Snapshot;
use crate::core::item::ItemRecord;
use crate::core::milestone::{Milestone, MilestoneRecord};
use crate::error::{HammockError, Result};

/// Records stay raw JSON so one bad record cannot fail the whole file.
#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    milestones: Vec<Value>,
}

/// A milestones file is either a bare array or a snapshot object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MilestonesFile {
    List(Vec<Value>),
    Snapshot(SnapshotFile),
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = read(path)?;
    parse_snapshot(&raw).map_err(|err| malformed(path, &err))
}

/// Parse snapshot JSON. Records of the wrong shape and milestones with
/// malformed dates are skipped; malformed item dates leave the item undated.
pub fn parse_snapshot(raw: &str) -> std::result::Result<Snapshot, serde_json::Error> {
    let file: SnapshotFile = serde_json::from_str(raw)?;
    Ok(Snapshot {
        items: decode_records::<ItemRecord>(file.items, "item")
            .into_iter()
            .map(ItemRecord::into_item)
            .collect(),
        milestones: parse_milestones(file.milestones),
    })
}

/// Load milestones only, from either accepted layout.
pub fn load_milestones(path: &Path) -> Result<Vec<Milestone>> {
    if !path.exists() {
        return Err(HammockError::SourceNotFound(path.display().to_string()));
    }
    let raw = read(path)?;
    let records = match serde_json::from_str::<MilestonesFile>(&raw).map_err(|err| malformed(path, &err))? {
        MilestonesFile::List(records) => records,
        MilestonesFile::Snapshot(file) => file.milestones,
    };
    Ok(parse_milestones(records))
}

fn parse_milestones(values: Vec<Value>) -> Vec<Milestone> {
    let records = decode_records::<MilestoneRecord>(values, "milestone");
    let milestones: Vec<_> = records.iter().filter_map(MilestoneRecord::parse).collect();
    if milestones.len() < records.len() {
        debug!(
            skipped = records.len() - milestones.len(),
            "Dropped milestones with malformed dates"
        );
    }
    milestones
}

/// Decode each record on its own, skipping the ones that do not fit.
fn decode_records<T: DeserializeOwned>(values: Vec<Value>, what: &str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(index, record = what, error = %err, "Skipping undecodable record");
                None
            }
        })
        .collect()
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => HammockError::SourceNotFound(path.display().to_string()),
        _ => HammockError::Io(err),
    })
}

fn malformed(path: &Path, err: &serde_json::Error) -> HammockError {
    HammockError::MalformedSource {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
