//! hammock outline - One-page phase schedule

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use super::{format_cost, load_source};
use crate::app::AppContext;
use crate::cli::gantt::{self, Glyphs};
use crate::cli::output::{self, HumanLayout, OutputFormat};
use crate::core::milestone::{default_milestone_rules, derive_project_milestones, Milestone};
use crate::core::outline::{build_outline, Outline, ScheduleOutline};
use crate::error::Result;
use crate::source::{self, SourceKind};

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Work-item source (.json snapshot or SQLite database)
    pub input: PathBuf,

    /// Source kind (default: from the file extension)
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Extra milestones file (JSON array or snapshot object)
    #[arg(long, value_name = "FILE")]
    pub milestones: Option<PathBuf>,

    /// Add the standard project milestones derived from the items
    #[arg(long)]
    pub derive_milestones: bool,
}

pub fn run(ctx: &AppContext, args: &OutlineArgs) -> Result<()> {
    let snapshot = load_source(ctx, &args.input, args.source)?;

    let mut milestones: Vec<Milestone> = snapshot.milestones;
    if let Some(path) = &args.milestones {
        milestones.extend(source::load_milestones(path)?);
    }
    if args.derive_milestones {
        milestones.extend(derive_project_milestones(
            &snapshot.items,
            &default_milestone_rules(),
        ));
    }

    let outline = build_outline(
        &snapshot.items,
        &milestones,
        ctx.as_of,
        &ctx.config.phase_table(),
        &ctx.config.outline_settings(),
    );

    match ctx.output_format {
        OutputFormat::Json => output::emit_robot(&output::robot_ok(&outline)),
        OutputFormat::Human => emit_outline(&outline, Glyphs::UNICODE),
        OutputFormat::Plain => emit_outline(&outline, Glyphs::PLAIN),
    }
}

fn emit_outline(outline: &Outline, glyphs: Glyphs) -> Result<()> {
    let Outline::Schedule(schedule) = outline else {
        println!("{}", "No dated work items; nothing to outline.".yellow());
        return Ok(());
    };

    let summary = Summary::from(schedule);
    let mut layout = HumanLayout::new();
    layout
        .title("Schedule Outline")
        .kv("As of", &schedule.as_of.to_string())
        .kv("Span", &format!("{} ~ {}", summary.start, summary.end))
        .kv("Phases", &format!("{} ({} critical)", summary.phases, summary.critical))
        .kv("Total cost", &format_cost(schedule.total_cost));
    if !schedule.today_visible() {
        layout.kv("Today", "outside the schedule window");
    }
    layout.blank();
    for line in gantt::render(schedule, glyphs) {
        layout.push_line(line);
    }
    output::emit_human(layout);
    Ok(())
}

struct Summary {
    start: String,
    end: String,
    phases: usize,
    critical: usize,
}

impl From<&ScheduleOutline> for Summary {
    fn from(schedule: &ScheduleOutline) -> Self {
        let start = schedule.phases().map(|p| p.start).min();
        let end = schedule.phases().map(|p| p.end).max();
        Self {
            start: start.map(|d| d.to_string()).unwrap_or_default(),
            end: end.map(|d| d.to_string()).unwrap_or_default(),
            phases: schedule.phases().count(),
            critical: schedule.phases().filter(|p| p.critical).count(),
        }
    }
}
