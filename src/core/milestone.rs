//! Milestones: point events on the phase timeline.
//!
//! Milestones come either from a source (already named and dated) or are
//! derived from the work items themselves by [`derive_project_milestones`].
//! Either way they are placed between phase rows by [`place_milestones`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::item::{lenient_text, lenient_text_or_empty, parse_date, WorkItem};
use super::rollup::PhaseRollup;
use super::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    Start,
    End,
    #[default]
    Other,
}

impl MilestoneKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MilestoneKind {
    type Err = std::convert::Infallible;

    /// Lenient: anything other than `start` or `end` (including the legacy
    /// `mid`) is [`MilestoneKind::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "end" => Self::End,
            _ => Self::Other,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub date: NaiveDate,
    pub kind: MilestoneKind,
}

impl Milestone {
    pub fn new(name: impl Into<String>, date: NaiveDate, kind: MilestoneKind) -> Self {
        Self {
            name: name.into(),
            date,
            kind,
        }
    }
}

/// A milestone as stored, before its date has been validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRecord {
    #[serde(default, deserialize_with = "lenient_text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text_or_empty")]
    pub date: String,
    #[serde(default, alias = "type", deserialize_with = "lenient_text")]
    pub kind: Option<String>,
}

impl MilestoneRecord {
    /// Validate the date. Malformed records yield `None`.
    pub fn parse(&self) -> Option<Milestone> {
        let Some(date) = parse_date(&self.date) else {
            debug!(name = %self.name, date = %self.date, "Skipping milestone with malformed date");
            return None;
        };
        let kind = self
            .kind
            .as_deref()
            .and_then(|k| k.parse().ok())
            .unwrap_or_default();
        Some(Milestone::new(self.name.clone(), date, kind))
    }
}

/// Where a placed milestone is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum MilestoneSlot {
    /// Immediately before the phase at `index` in the sorted phase list.
    BeforePhase { index: usize, phase: String },
    /// After every phase.
    Trailing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedMilestone {
    pub name: String,
    pub date: NaiveDate,
    pub kind: MilestoneKind,
    /// Timeline position; may fall outside `0..=100`.
    pub position: f64,
    #[serde(flatten)]
    pub slot: MilestoneSlot,
}

/// Assign every milestone to exactly one slot.
///
/// Phases are walked in the given (sorted) order. At each phase, every
/// milestone not yet placed whose date is on or before the phase start is
/// placed ahead of it, in input order. Whatever remains trails the last
/// phase, again in input order. The result is in render order.
pub fn place_milestones(
    milestones: &[Milestone],
    phases: &[PhaseRollup],
    timeline: &Timeline,
) -> Vec<PositionedMilestone> {
    let mut used = vec![false; milestones.len()];
    let mut placed = Vec::with_capacity(milestones.len());

    let position = |m: &Milestone, slot: MilestoneSlot| PositionedMilestone {
        name: m.name.clone(),
        date: m.date,
        kind: m.kind,
        position: timeline.position(m.date),
        slot,
    };

    for (index, phase) in phases.iter().enumerate() {
        for (i, m) in milestones.iter().enumerate() {
            if used[i] || m.date > phase.min_start {
                continue;
            }
            used[i] = true;
            placed.push(position(
                m,
                MilestoneSlot::BeforePhase {
                    index,
                    phase: phase.phase.clone(),
                },
            ));
        }
    }

    placed.extend(
        milestones
            .iter()
            .zip(&used)
            .filter(|(_, used)| !**used)
            .map(|(m, _)| position(m, MilestoneSlot::Trailing)),
    );
    placed
}

/// Which items a derived milestone looks at, and which end of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRule {
    pub name: String,
    pub kind: MilestoneKind,
    /// Substrings of `category1`; an item matching any of these qualifies.
    #[serde(default)]
    pub category1: Vec<String>,
    /// Substrings of `category2`; an item matching any of these qualifies.
    #[serde(default)]
    pub category2: Vec<String>,
    /// `true` takes the earliest start, `false` the latest finish.
    #[serde(default)]
    pub at_start: bool,
}

impl MilestoneRule {
    fn new(name: &str, kind: MilestoneKind, category1: &[&str], category2: &[&str], at_start: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            category1: category1.iter().map(|s| (*s).to_string()).collect(),
            category2: category2.iter().map(|s| (*s).to_string()).collect(),
            at_start,
        }
    }

    /// A rule with no keywords covers every item.
    fn selects(&self, item: &WorkItem) -> bool {
        if self.category1.is_empty() && self.category2.is_empty() {
            return true;
        }
        let hit = |keys: &[String], label: &str| keys.iter().any(|k| !k.is_empty() && label.contains(k.as_str()));
        hit(&self.category1, &item.category1) || hit(&self.category2, &item.category2)
    }
}

/// The five project-level milestones.
pub fn default_milestone_rules() -> Vec<MilestoneRule> {
    vec![
        MilestoneRule::new("착공 (Notice to Proceed)", MilestoneKind::Start, &[], &[], true),
        MilestoneRule::new(
            "토공사 완료 (Earthwork Finish)",
            MilestoneKind::Other,
            &[],
            &["토공", "흙막이", "기초"],
            false,
        ),
        MilestoneRule::new(
            "골조 상량 (Top Out)",
            MilestoneKind::Other,
            &[],
            &["철근콘크리트", "골조", "콘크리트", "철골"],
            false,
        ),
        MilestoneRule::new(
            "수전 및 시운전 (Commissioning)",
            MilestoneKind::Other,
            &["기계", "전기"],
            &["설비", "배관", "덕트"],
            false,
        ),
        MilestoneRule::new("사용승인 및 준공 (Handover)", MilestoneKind::End, &[], &[], false),
    ]
}

/// Derive milestones from the items' own dates.
///
/// Only items carrying both dates take part. A rule matching no item
/// produces nothing. When two rules land on the same date the earlier rule
/// wins.
pub fn derive_project_milestones(items: &[WorkItem], rules: &[MilestoneRule]) -> Vec<Milestone> {
    let dated: Vec<_> = items
        .iter()
        .filter_map(|item| Some((item, item.start_date?, item.end_date?)))
        .collect();

    let mut seen = HashSet::new();
    rules
        .iter()
        .filter_map(|rule| {
            let matching = dated.iter().filter(|(item, _, _)| rule.selects(item));
            let date = if rule.at_start {
                matching.map(|(_, start, _)| *start).min()
            } else {
                matching.map(|(_, _, end)| *end).max()
            }?;
            Some(Milestone::new(rule.name.clone(), date, rule.kind))
        })
        .filter(|m| seen.insert(m.date))
        .collect()
}
