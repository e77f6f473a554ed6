//! One-page schedule outline.
//!
//! Ties the stages together: items are rolled up into phases, the phases
//! define the timeline, and every phase, zone and milestone is placed on it
//! as plain data ready for a renderer.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::item::WorkItem;
use super::milestone::{place_milestones, Milestone, MilestoneKind, MilestoneSlot};
use super::phase::PhaseTable;
use super::progress::{progress, CriticalRule};
use super::rollup::{aggregate, cost_share, total_cost, PhaseRollup, ZoneRollup};
use super::timeline::{Bar, Timeline, DEFAULT_PAD_RATIO};

static ZONE_CODE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+_").unwrap());

/// Knobs for outline assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineSettings {
    pub default_zone: String,
    pub pad_ratio: f64,
    pub max_zone_rows: usize,
    pub min_phase_bar_width: f64,
    pub min_zone_bar_width: f64,
    pub critical: CriticalRule,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            default_zone: "공통".to_string(),
            pad_ratio: DEFAULT_PAD_RATIO,
            max_zone_rows: 5,
            min_phase_bar_width: 0.5,
            min_zone_bar_width: 0.3,
            critical: CriticalRule::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outline {
    /// Nothing survived aggregation; there is no timeline to draw on.
    NoData,
    Schedule(ScheduleOutline),
}

impl Outline {
    pub const fn schedule(&self) -> Option<&ScheduleOutline> {
        match self {
            Self::Schedule(s) => Some(s),
            Self::NoData => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutline {
    pub as_of: NaiveDate,
    pub timeline: Timeline,
    /// Position of the reference date; outside `0..=100` when off the strip.
    pub today_position: f64,
    pub total_cost: f64,
    /// Render order: milestones interleaved with phases.
    pub rows: Vec<OutlineRow>,
}

impl ScheduleOutline {
    pub fn phases(&self) -> impl Iterator<Item = &PhaseRow> {
        self.rows.iter().filter_map(|row| match row {
            OutlineRow::Phase(p) => Some(p),
            OutlineRow::Milestone(_) => None,
        })
    }

    pub fn milestones(&self) -> impl Iterator<Item = &MilestoneRow> {
        self.rows.iter().filter_map(|row| match row {
            OutlineRow::Milestone(m) => Some(m),
            OutlineRow::Phase(_) => None,
        })
    }

    pub fn today_visible(&self) -> bool {
        (0.0..=100.0).contains(&self.today_position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum OutlineRow {
    Milestone(MilestoneRow),
    Phase(PhaseRow),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneRow {
    pub name: String,
    pub date: NaiveDate,
    pub kind: MilestoneKind,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRow {
    pub name: String,
    pub icon: String,
    pub order: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: i64,
    pub progress: u8,
    pub critical: bool,
    pub count: u64,
    pub cost: f64,
    /// Percent of the outline's total cost.
    pub cost_share: f64,
    pub bar: Bar,
    pub zones: Vec<ZoneRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRow {
    /// Zone key as aggregated.
    pub zone: String,
    /// Zone key with any numeric code prefix removed.
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: i64,
    pub progress: u8,
    pub critical: bool,
    pub count: u64,
    pub cost: f64,
    pub bar: Bar,
}

/// Build the outline for `items` as of `today`.
pub fn build_outline(
    items: &[WorkItem],
    milestones: &[Milestone],
    today: NaiveDate,
    table: &PhaseTable,
    settings: &OutlineSettings,
) -> Outline {
    let phases = aggregate(items, table, &settings.default_zone);
    let Some(timeline) = Timeline::build(&phases, settings.pad_ratio) else {
        info!(items = items.len(), "No dated work items; outline is empty");
        return Outline::NoData;
    };

    let total = total_cost(&phases);
    let placed = place_milestones(milestones, &phases, &timeline);
    let mut pending = placed.into_iter().peekable();
    let mut rows = Vec::with_capacity(phases.len() + milestones.len());

    for (index, phase) in phases.iter().enumerate() {
        while let Some(m) =
            pending.next_if(|m| matches!(m.slot, MilestoneSlot::BeforePhase { index: i, .. } if i == index))
        {
            rows.push(OutlineRow::Milestone(MilestoneRow {
                name: m.name,
                date: m.date,
                kind: m.kind,
                position: m.position,
            }));
        }
        rows.push(OutlineRow::Phase(phase_row(phase, total, today, &timeline, settings)));
    }
    rows.extend(pending.map(|m| {
        OutlineRow::Milestone(MilestoneRow {
            name: m.name,
            date: m.date,
            kind: m.kind,
            position: m.position,
        })
    }));

    debug!(
        phases = phases.len(),
        milestones = milestones.len(),
        %today,
        "Outline assembled"
    );

    Outline::Schedule(ScheduleOutline {
        as_of: today,
        today_position: timeline.position(today),
        timeline,
        total_cost: total,
        rows,
    })
}

fn phase_row(
    phase: &PhaseRollup,
    total: f64,
    today: NaiveDate,
    timeline: &Timeline,
    settings: &OutlineSettings,
) -> PhaseRow {
    let (start, end) = (phase.min_start, phase.max_end);
    let pct = progress(start, end, today);
    let critical = settings.critical.is_critical(pct, start, end, today);

    // zone rows only add information when there is more than one zone
    let zones = if phase.zones.len() > 1 {
        phase
            .zones
            .iter()
            .take(settings.max_zone_rows)
            .map(|(key, zone)| zone_row(key, zone, critical, pct, today, timeline, settings))
            .collect()
    } else {
        Vec::new()
    };

    PhaseRow {
        name: phase.phase.clone(),
        icon: phase.icon.clone(),
        order: phase.order,
        start,
        end,
        duration_days: (end - start).num_days(),
        progress: pct,
        critical,
        count: phase.count,
        cost: phase.cost,
        cost_share: cost_share(phase.cost, total) * 100.0,
        bar: timeline.bar(start, end, settings.min_phase_bar_width),
        zones,
    }
}

fn zone_row(
    key: &str,
    zone: &ZoneRollup,
    phase_critical: bool,
    phase_progress: u8,
    today: NaiveDate,
    timeline: &Timeline,
    settings: &OutlineSettings,
) -> ZoneRow {
    let pct = progress(zone.start, zone.end, today);
    ZoneRow {
        zone: key.to_string(),
        label: ZONE_CODE_PREFIX.replace(key, "").into_owned(),
        start: zone.start,
        end: zone.end,
        duration_days: (zone.end - zone.start).num_days(),
        progress: pct,
        critical: settings
            .critical
            .zone_is_critical(phase_critical, pct, phase_progress),
        count: zone.count,
        cost: zone.cost,
        bar: timeline.bar(zone.start, zone.end, settings.min_zone_bar_width),
    }
}
