//! Date-based completion and critical flags.
//!
//! Progress is purely calendar-driven: the share of an interval that has
//! elapsed by the reference date. There is no planned-vs-actual baseline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Elapsed share of `start..end` at `today`, as a whole percentage.
///
/// The end check runs first, so a zero-length interval reached by `today`
/// reports 100.
pub fn progress(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> u8 {
    if today >= end {
        return 100;
    }
    if today <= start {
        return 0;
    }
    let elapsed = (today - start).num_days() as f64;
    let total = (end - start).num_days() as f64;
    (elapsed / total * 100.0).round() as u8
}

/// Thresholds for the critical heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalRule {
    /// Finish closer than this many days counts as "near end".
    pub near_end_days: i64,
    /// Near-end items at or above this progress are not flagged.
    pub near_end_progress: u8,
    /// Expected progress must exceed this before "behind" can trigger.
    pub behind_expected_floor: u8,
    /// Expected minus actual must exceed this for "behind".
    pub behind_gap: u8,
    /// A zone trailing its phase by more than this is flagged.
    pub zone_lag: u8,
}

impl Default for CriticalRule {
    fn default() -> Self {
        Self {
            near_end_days: 30,
            near_end_progress: 90,
            behind_expected_floor: 30,
            behind_gap: 15,
            zone_lag: 10,
        }
    }
}

impl CriticalRule {
    /// Flag an interval as critical.
    ///
    /// `expected` is recomputed from the same interval that produced
    /// `progress_value`, so for roll-up bars the "behind" clause cannot fire
    /// and only the near-end clause matters.
    pub fn is_critical(
        &self,
        progress_value: u8,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> bool {
        let expected = i32::from(progress(start, end, today));
        let actual = i32::from(progress_value);
        let behind = expected > i32::from(self.behind_expected_floor)
            && expected - actual > i32::from(self.behind_gap);
        let near_end = (end - today).num_days() < self.near_end_days
            && progress_value < self.near_end_progress;
        behind || near_end
    }

    /// A zone is critical only under a critical phase, and only when it
    /// trails the phase's progress by more than `zone_lag` points.
    pub fn zone_is_critical(&self, phase_critical: bool, zone_progress: u8, phase_progress: u8) -> bool {
        phase_critical
            && i32::from(zone_progress) < i32::from(phase_progress) - i32::from(self.zone_lag)
    }
}
