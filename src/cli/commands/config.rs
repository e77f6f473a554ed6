//! hammock config - Show the effective configuration

use clap::Args;

use crate::app::AppContext;
use crate::cli::output;
use crate::config::Config;
use crate::error::{HammockError, Result};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Dotted key to show (e.g. `critical.near_end_days`)
    pub key: Option<String>,

    /// Print as bare JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    let value = match &args.key {
        Some(key) => config_value_at(&ctx.config, key)?,
        None => config_doc(&ctx.config)?,
    };

    if ctx.robot_mode() {
        return output::emit_robot(&output::robot_ok(&value));
    }
    if args.json {
        return output::emit_json(&value);
    }
    println!("{}", format_value(&value)?);
    Ok(())
}

fn config_doc(config: &Config) -> Result<toml::Value> {
    toml::Value::try_from(config)
        .map_err(|err| HammockError::Config(format!("serialize config: {err}")))
}

fn config_value_at(config: &Config, key: &str) -> Result<toml::Value> {
    get_path(&config_doc(config)?, key)
}

fn get_path(doc: &toml::Value, key: &str) -> Result<toml::Value> {
    let mut current = doc;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| HammockError::Config(format!("unknown key: {key}")))?;
    }
    Ok(current.clone())
}

fn format_value(value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Table(_) => toml::to_string_pretty(value)
            .map(|s| s.trim_end().to_string())
            .map_err(|err| HammockError::Config(format!("render config: {err}"))),
        other => Ok(other.to_string()),
    }
}
