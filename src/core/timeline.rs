//! Normalized timeline shared by every bar and marker of one outline.
//!
//! Calendar instants map onto `0.0..=100.0` between the padded global bounds.
//! Positions outside that range are returned as-is; callers treat them as
//! "off the visible strip".

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::rollup::PhaseRollup;

/// Default share of the unpadded span added on each side.
pub const DEFAULT_PAD_RATIO: f64 = 0.03;

/// A first-of-month gridline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTick {
    pub date: NaiveDate,
    pub position: f64,
    /// `YY.MM`
    pub label: String,
    /// January, April, July and October ticks.
    pub quarter: bool,
}

/// Horizontal placement of a bar, in percent of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub global_min: NaiveDateTime,
    pub global_max: NaiveDateTime,
    /// `global_max - global_min` in milliseconds, never below 1.
    pub total_span_ms: i64,
    pub ticks: Vec<MonthTick>,
}

impl Timeline {
    /// Span the phase hammocks plus padding. `None` when there are no phases.
    ///
    /// Only phase spans are considered; milestones never widen the range.
    pub fn build(phases: &[PhaseRollup], pad_ratio: f64) -> Option<Self> {
        let min = phases.iter().map(|p| p.min_start).min()?;
        let max = phases.iter().map(|p| p.max_end).max()?;

        let min = midnight(min);
        let max = midnight(max);
        let pad = TimeDelta::milliseconds(
            ((max - min).num_milliseconds() as f64 * pad_ratio).round() as i64,
        );
        let global_min = min - pad;
        let global_max = max + pad;
        let total_span_ms = (global_max - global_min).num_milliseconds().max(1);

        let mut timeline = Self {
            global_min,
            global_max,
            total_span_ms,
            ticks: Vec::new(),
        };
        timeline.ticks = timeline.month_ticks();
        Some(timeline)
    }

    /// Position of a calendar date (taken at midnight).
    pub fn position(&self, date: NaiveDate) -> f64 {
        self.position_at(midnight(date))
    }

    pub fn position_at(&self, at: NaiveDateTime) -> f64 {
        (at - self.global_min).num_milliseconds() as f64 / self.total_span_ms as f64 * 100.0
    }

    /// Bar geometry for a date range; the left edge is clamped at 0 and the
    /// width never drops below `min_width`.
    pub fn bar(&self, start: NaiveDate, end: NaiveDate, min_width: f64) -> Bar {
        let span = (midnight(end) - midnight(start)).num_milliseconds() as f64;
        Bar {
            left: self.position(start).max(0.0),
            width: (span / self.total_span_ms as f64 * 100.0).max(min_width),
        }
    }

    fn month_ticks(&self) -> Vec<MonthTick> {
        let anchor = self.global_min.date();
        let mut ticks = Vec::new();
        let mut cursor = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1)
            .and_then(|first| first.checked_add_months(Months::new(1)));

        while let Some(tick) = cursor {
            if midnight(tick) > self.global_max {
                break;
            }
            ticks.push(MonthTick {
                date: tick,
                position: self.position(tick),
                label: tick.format("%y.%m").to_string(),
                quarter: tick.month0() % 3 == 0,
            });
            cursor = tick.checked_add_months(Months::new(1));
        }
        ticks
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
