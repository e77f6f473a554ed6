//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod gantt;
pub mod output;

/// Hammock - roll construction work items up into a one-page phase schedule
#[derive(Parser, Debug)]
#[command(name = "hammock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Reference date for progress and critical flags (default: today)
    #[arg(long, global = true, value_name = "YYYY-MM-DD", value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,

    /// Output format (human, json, plain)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Force plain output (no colors, no icons)
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/hammock/config.toml)
    #[arg(long, global = true, env = "HAMMOCK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective output format.
    ///
    /// Priority order:
    /// 1. `--plain` → Plain format
    /// 2. `--output-format` → Explicit format
    /// 3. `--machine` → JSON format (shorthand)
    /// 4. Default → Human format
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        if self.plain {
            return OutputFormat::Plain;
        }
        if let Some(fmt) = self.output_format {
            return fmt;
        }
        if self.machine {
            return OutputFormat::Json;
        }
        OutputFormat::Human
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the one-page outline schedule
    Outline(commands::outline::OutlineArgs),

    /// Show phase and zone roll-ups
    Phases(commands::phases::PhasesArgs),

    /// Show which phase a trade label maps to
    Classify(commands::classify::ClassifyArgs),

    /// Derive project milestones from work items
    Milestones(commands::milestones::MilestonesArgs),

    /// Show the effective configuration
    Config(commands::config::ConfigArgs),
}

fn parse_as_of(raw: &str) -> Result<NaiveDate, String> {
    crate::core::item::parse_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got '{raw}'"))
}
