//! Work items as they arrive from a source.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A dated unit of work. Dates are optional because sources routinely carry
/// blanks; the aggregator drops undated items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Work-type label (e.g. 건축, 토목공사).
    pub category1: String,
    /// Trade label, possibly code-prefixed (e.g. `A03_철근콘크리트공사`).
    pub category2: String,
    pub zone: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub count: u64,
    pub cost: f64,
}

impl WorkItem {
    pub fn new(
        category1: impl Into<String>,
        category2: impl Into<String>,
        zone: Option<&str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            category1: category1.into(),
            category2: category2.into(),
            zone: zone.map(str::to_string),
            start_date: Some(start_date),
            end_date: Some(end_date),
            count: 1,
            cost: 0.0,
        }
    }

    #[must_use]
    pub const fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub const fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// The usable date range, or `None` when a date is missing or the range
    /// is inverted.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }

    /// Zone label, with blanks treated as absent.
    pub fn zone_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.zone.as_deref() {
            Some(z) if !z.trim().is_empty() => z,
            _ => default,
        }
    }
}

/// A work item as read from a source, before any validation.
///
/// Every field is optional; blanks and NULLs are normal in exported
/// schedules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, alias = "how1", deserialize_with = "lenient_text")]
    pub category1: Option<String>,
    #[serde(default, alias = "how2", deserialize_with = "lenient_text")]
    pub category2: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub zone: Option<String>,
    #[serde(default, alias = "startDate", deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(default, alias = "endDate", deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cost: Option<f64>,
}

impl ItemRecord {
    /// Convert into a [`WorkItem`]. Unparseable dates become absent, a
    /// missing count means one item and a missing cost means zero.
    pub fn into_item(self) -> WorkItem {
        WorkItem {
            category1: self.category1.unwrap_or_default(),
            category2: self.category2.unwrap_or_default(),
            zone: self.zone.filter(|z| !z.trim().is_empty()),
            start_date: self.start_date.as_deref().and_then(parse_date),
            end_date: self.end_date.as_deref().and_then(parse_date),
            count: self.count.unwrap_or(1),
            cost: self.cost.unwrap_or(0.0),
        }
    }
}

/// Text field that tolerates the wrong JSON type: numbers keep their
/// textual form, anything else that is not a string is absent.
pub(crate) fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Like [`lenient_text`], with absence as the empty string.
pub(crate) fn lenient_text_or_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    lenient_text(de).map(Option::unwrap_or_default)
}

fn lenient_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    let number = match Value::deserialize(de)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|v| v.is_finite()))
}

fn lenient_count<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Parse an ISO date, accepting a longer timestamp by its `YYYY-MM-DD`
/// prefix. Blank or malformed input yields `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    raw.get(..10)
        .filter(|_| raw.len() > 10 && matches!(raw.as_bytes()[10], b'T' | b' '))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
