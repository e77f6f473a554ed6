//! Work-item sources.
//!
//! The engine itself never touches storage; this module reads a snapshot of
//! items (and, for JSON, milestones) before the engine runs.

pub mod json;
pub mod sqlite;

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SourceConfig;
use crate::core::item::WorkItem;
use crate::core::milestone::Milestone;
use crate::error::{HammockError, Result};

pub use json::load_milestones;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `{ "items": [...], "milestones": [...] }` snapshot
    Json,
    /// Cost-loaded schedule table in a SQLite database
    Sqlite,
}

impl SourceKind {
    /// Pick a kind from the file extension.
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("db" | "sqlite" | "sqlite3") => Ok(Self::Sqlite),
            _ => Err(HammockError::UnsupportedSource(path.display().to_string())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Items and milestones as loaded, before any aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub items: Vec<WorkItem>,
    pub milestones: Vec<Milestone>,
}

/// Load a snapshot from `path`, detecting the kind unless one is given.
pub fn load(path: &Path, kind: Option<SourceKind>, columns: &SourceConfig) -> Result<Snapshot> {
    if !path.exists() {
        return Err(HammockError::SourceNotFound(path.display().to_string()));
    }
    let kind = match kind {
        Some(kind) => kind,
        None => SourceKind::detect(path)?,
    };

    let snapshot = match kind {
        SourceKind::Json => json::load_snapshot(path)?,
        SourceKind::Sqlite => Snapshot {
            items: sqlite::load_items(path, columns)?,
            milestones: Vec::new(),
        },
    };

    info!(
        path = %path.display(),
        %kind,
        items = snapshot.items.len(),
        milestones = snapshot.milestones.len(),
        "Loaded source"
    );
    Ok(snapshot)
}
