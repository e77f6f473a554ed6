//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use std::path::Path;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;
use crate::source::{self, Snapshot, SourceKind};

pub mod classify;
pub mod config;
pub mod milestones;
pub mod outline;
pub mod phases;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Outline(args) => outline::run(ctx, args),
        Commands::Phases(args) => phases::run(ctx, args),
        Commands::Classify(args) => classify::run(ctx, args),
        Commands::Milestones(args) => milestones::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}

/// Read a source with the context's column mapping.
fn load_source(ctx: &AppContext, input: &Path, kind: Option<SourceKind>) -> Result<Snapshot> {
    source::load(input, kind, &ctx.config.source)
}

fn format_cost(cost: f64) -> String {
    let whole = cost.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 { format!("-{grouped}") } else { grouped }
}
