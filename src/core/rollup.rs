//! Phase and zone roll-ups ("hammocks").
//!
//! A hammock spans from the earliest start to the latest finish of the items
//! underneath it. It is not a sum of durations: two overlapping two-month
//! items roll up into whatever calendar window they jointly cover.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::item::WorkItem;
use super::phase::PhaseTable;

/// Aggregate for one zone within one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRollup {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub count: u64,
    pub cost: f64,
}

impl ZoneRollup {
    const fn empty(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            count: 0,
            cost: 0.0,
        }
    }

    fn absorb(&mut self, start: NaiveDate, end: NaiveDate, count: u64, cost: f64) {
        self.start = self.start.min(start);
        self.end = self.end.max(end);
        self.count += count;
        self.cost += cost;
    }
}

/// Aggregate for one construction phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRollup {
    pub phase: String,
    pub order: u32,
    pub icon: String,
    pub min_start: NaiveDate,
    pub max_end: NaiveDate,
    pub count: u64,
    pub cost: f64,
    /// Zone label to aggregate, iterated in label order.
    pub zones: BTreeMap<String, ZoneRollup>,
}

impl PhaseRollup {
    fn absorb(&mut self, zone: &str, start: NaiveDate, end: NaiveDate, count: u64, cost: f64) {
        self.min_start = self.min_start.min(start);
        self.max_end = self.max_end.max(end);
        self.count += count;
        self.cost += cost;
        self.zones
            .entry(zone.to_string())
            .or_insert_with(|| ZoneRollup::empty(start, end))
            .absorb(start, end, count, cost);
    }
}

/// Fold work items into phase roll-ups sorted by construction order.
///
/// Items without a usable date range are skipped. Phases sharing an order
/// keep the order in which they were first seen.
pub fn aggregate(items: &[WorkItem], table: &PhaseTable, default_zone: &str) -> Vec<PhaseRollup> {
    let (mut phases, _) = items
        .iter()
        .filter_map(|item| item.span().map(|span| (item, span)))
        .fold(
            (Vec::<PhaseRollup>::new(), HashMap::<String, usize>::new()),
            |(mut phases, mut index), (item, (start, end))| {
                let rule = table.classify(&item.category1, &item.category2);
                let slot = *index.entry(rule.phase.clone()).or_insert_with(|| {
                    phases.push(PhaseRollup {
                        phase: rule.phase.clone(),
                        order: rule.order,
                        icon: rule.icon.clone(),
                        min_start: start,
                        max_end: end,
                        count: 0,
                        cost: 0.0,
                        zones: BTreeMap::new(),
                    });
                    phases.len() - 1
                });
                phases[slot].absorb(item.zone_or(default_zone), start, end, item.count, item.cost);
                (phases, index)
            },
        );

    let dropped = items.iter().filter(|item| item.span().is_none()).count();
    if dropped > 0 {
        debug!(dropped, "Skipped work items without a usable date range");
    }

    phases.sort_by_key(|p| p.order);
    phases
}

/// Sum of phase costs; the denominator for cost shares.
pub fn total_cost(phases: &[PhaseRollup]) -> f64 {
    phases.iter().map(|p| p.cost).sum()
}

/// Fraction of `total` represented by `cost`; 0 when the total is 0.
pub fn cost_share(cost: f64, total: f64) -> f64 {
    if total == 0.0 { 0.0 } else { cost / total }
}
