//! Schedule roll-up engine.
//!
//! Everything here is pure: no I/O, no clock. The reference date is always
//! passed in.

pub mod item;
pub mod milestone;
pub mod outline;
pub mod phase;
pub mod progress;
pub mod rollup;
pub mod timeline;

pub use item::{parse_date, ItemRecord, WorkItem};
pub use milestone::{
    default_milestone_rules, derive_project_milestones, place_milestones, Milestone,
    MilestoneKind, MilestoneRecord, MilestoneRule, MilestoneSlot, PositionedMilestone,
};
pub use outline::{
    build_outline, MilestoneRow, Outline, OutlineRow, OutlineSettings, PhaseRow, ScheduleOutline,
    ZoneRow,
};
pub use phase::{strip_code_prefix, CategoryFallback, PhaseRule, PhaseTable};
pub use progress::{progress, CriticalRule};
pub use rollup::{aggregate, cost_share, total_cost, PhaseRollup, ZoneRollup};
pub use timeline::{Bar, MonthTick, Timeline};
