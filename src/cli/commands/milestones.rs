//! hammock milestones - Derive project milestones from work items

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use super::load_source;
use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::core::milestone::{default_milestone_rules, derive_project_milestones, MilestoneKind};
use crate::error::Result;
use crate::source::SourceKind;

#[derive(Args, Debug)]
pub struct MilestonesArgs {
    /// Work-item source (.json snapshot or SQLite database)
    pub input: PathBuf,

    /// Source kind (default: from the file extension)
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,
}

pub fn run(ctx: &AppContext, args: &MilestonesArgs) -> Result<()> {
    let snapshot = load_source(ctx, &args.input, args.source)?;
    let milestones = derive_project_milestones(&snapshot.items, &default_milestone_rules());

    if ctx.robot_mode() {
        return output::emit_robot(&output::robot_ok(&milestones));
    }

    let mut layout = HumanLayout::new();
    layout.title("Project Milestones");
    if milestones.is_empty() {
        layout.push_line("No dated work items.");
    }
    for milestone in &milestones {
        let kind = match milestone.kind {
            MilestoneKind::Start => milestone.kind.as_str().green(),
            MilestoneKind::End => milestone.kind.as_str().red(),
            MilestoneKind::Other => milestone.kind.as_str().blue(),
        };
        layout.push_line(format!("{}  {:<6} {}", milestone.date, kind, milestone.name));
    }
    output::emit_human(layout);
    Ok(())
}
