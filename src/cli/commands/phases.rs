//! hammock phases - Phase and zone roll-ups

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use super::{format_cost, load_source};
use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::core::rollup::{aggregate, cost_share, total_cost, PhaseRollup};
use crate::error::Result;
use crate::source::SourceKind;

#[derive(Args, Debug)]
pub struct PhasesArgs {
    /// Work-item source (.json snapshot or SQLite database)
    pub input: PathBuf,

    /// Source kind (default: from the file extension)
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,
}

#[derive(Serialize)]
struct PhasesReport {
    total_cost: f64,
    phases: Vec<PhaseSummary>,
}

#[derive(Serialize)]
struct PhaseSummary {
    #[serde(flatten)]
    rollup: PhaseRollup,
    /// Percentage of the total cost
    cost_share: f64,
}

pub fn run(ctx: &AppContext, args: &PhasesArgs) -> Result<()> {
    let snapshot = load_source(ctx, &args.input, args.source)?;
    let rollups = aggregate(
        &snapshot.items,
        &ctx.config.phase_table(),
        &ctx.config.schedule.default_zone,
    );
    let total = total_cost(&rollups);
    let report = PhasesReport {
        total_cost: total,
        phases: rollups
            .into_iter()
            .map(|rollup| PhaseSummary {
                cost_share: cost_share(rollup.cost, total) * 100.0,
                rollup,
            })
            .collect(),
    };

    if ctx.robot_mode() {
        return output::emit_robot(&output::robot_ok(&report));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Phase Roll-ups")
        .kv("Phases", &report.phases.len().to_string())
        .kv("Total cost", &format_cost(report.total_cost))
        .blank();

    if report.phases.is_empty() {
        layout.push_line("No dated work items.");
    }
    for summary in &report.phases {
        let phase = &summary.rollup;
        layout.push_line(format!(
            "{:>2}. {}  {} ~ {}  items {}  cost {} ({:.1}%)",
            phase.order,
            style(&phase.phase).bold(),
            phase.min_start,
            phase.max_end,
            phase.count,
            format_cost(phase.cost),
            summary.cost_share,
        ));
        for (zone, rollup) in &phase.zones {
            layout.push_line(format!(
                "      {}  {} ~ {}  items {}  cost {}",
                style(zone).dim(),
                rollup.start,
                rollup.end,
                rollup.count,
                format_cost(rollup.cost),
            ));
        }
    }
    output::emit_human(layout);
    Ok(())
}
