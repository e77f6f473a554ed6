//! Per-invocation application context.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Everything a command needs besides its own arguments.
pub struct AppContext {
    /// Project root used for `.hammock/config.toml` discovery
    pub root: PathBuf,
    pub config: Config,
    pub output_format: OutputFormat,
    /// Reference date for progress and critical flags
    pub as_of: NaiveDate,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = match std::env::var_os("HAMMOCK_ROOT") {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir()?,
        };
        let config = Config::load(cli.config.as_deref(), &root)?;
        let output_format = cli.output_format();
        let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

        if !output_format.use_colors() {
            colored::control::set_override(false);
            console::set_colors_enabled(false);
        }

        debug!(root = %root.display(), %as_of, ?output_format, "Context ready");

        Ok(Self {
            root,
            config,
            output_format,
            as_of,
        })
    }

    /// JSON envelope output on stdout.
    #[must_use]
    pub const fn robot_mode(&self) -> bool {
        self.output_format.is_machine_readable()
    }
}
