//! SQLite work-item source.
//!
//! Reads a cost-loaded schedule table (one row per activity) and groups it by
//! work type, trade and zone, so the engine sees one item per group with its
//! earliest start, latest finish, row count and summed cost.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, Row};
use tracing::debug;

use crate::config::SourceConfig;
use crate::core::item::{ItemRecord, WorkItem};
use crate::error::{HammockError, Result};

/// Load grouped work items from the configured table.
pub fn load_items(path: &Path, columns: &SourceConfig) -> Result<Vec<WorkItem>> {
    if !path.exists() {
        return Err(HammockError::SourceNotFound(path.display().to_string()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    query_items(&conn, columns)
}

/// Run the grouped query on an open connection.
pub fn query_items(conn: &Connection, columns: &SourceConfig) -> Result<Vec<WorkItem>> {
    let sql = grouped_query(columns)?;
    debug!(%sql, "Querying work items");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], record_from_row)?;
    let mut items = Vec::new();
    for row in rows {
        items.push(row?.into_item());
    }
    Ok(items)
}

fn grouped_query(columns: &SourceConfig) -> Result<String> {
    let table = quote_identifier(&columns.table)?;
    let c1 = quote_identifier(&columns.category1)?;
    let c2 = quote_identifier(&columns.category2)?;
    let zone = quote_identifier(&columns.zone)?;
    let start = quote_identifier(&columns.start_date)?;
    let end = quote_identifier(&columns.end_date)?;
    let cost = quote_identifier(&columns.cost)?;

    Ok(format!(
        "SELECT {c1}, {c2}, {zone}, MIN({start}), MAX({end}), COUNT(*), SUM({cost}) \
         FROM {table} \
         WHERE {start} IS NOT NULL AND {start} != '' AND {end} IS NOT NULL AND {end} != '' \
         GROUP BY {c1}, {c2}, {zone} \
         ORDER BY {c1}, MIN({start})"
    ))
}

/// Double-quote an identifier. Names containing quotes or NUL are refused
/// rather than escaped.
fn quote_identifier(name: &str) -> Result<String> {
    if name.trim().is_empty() || name.contains(['"', '\0']) {
        return Err(HammockError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{name}\""))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ItemRecord> {
    Ok(ItemRecord {
        category1: row.get(0)?,
        category2: row.get(1)?,
        zone: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        count: row.get::<_, Option<i64>>(5)?.and_then(|n| u64::try_from(n).ok()),
        cost: row.get(6)?,
    })
}
