use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::outline::OutlineSettings;
use crate::core::phase::{CategoryFallback, PhaseRule, PhaseTable, CATCH_ALL_PHASE};
use crate::core::progress::CriticalRule;
use crate::error::{HammockError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub critical: CriticalConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub phases: PhasesConfig,
}

impl Config {
    /// Load defaults, then config files, then environment overrides.
    ///
    /// An explicit path (or `HAMMOCK_CONFIG`) replaces discovery of the
    /// global and project files.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("HAMMOCK_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let pad_ratio = self.schedule.pad_ratio;
        if !(0.0..=1.0).contains(&pad_ratio) {
            return Err(HammockError::Config(format!(
                "schedule.pad_ratio must be between 0 and 1, got {pad_ratio}"
            )));
        }
        Ok(())
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let path = dirs::config_dir()
            .ok_or_else(|| HammockError::MissingConfig("config directory not found".to_string()))?
            .join("hammock/config.toml");
        Self::load_patch(&path)
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join(".hammock/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| HammockError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| HammockError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.schedule {
            self.schedule.merge(patch);
        }
        if let Some(patch) = patch.critical {
            self.critical.merge(patch);
        }
        if let Some(patch) = patch.source {
            self.source.merge(patch);
        }
        if let Some(patch) = patch.phases {
            self.phases.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("HAMMOCK_DEFAULT_ZONE") {
            self.schedule.default_zone = value;
        }
        if let Some(value) = parse_var(&lookup, "HAMMOCK_PAD_RATIO")? {
            self.schedule.pad_ratio = value;
        }
        if let Some(value) = parse_var(&lookup, "HAMMOCK_MAX_ZONE_ROWS")? {
            self.schedule.max_zone_rows = value;
        }
        if let Some(value) = parse_var(&lookup, "HAMMOCK_NEAR_END_DAYS")? {
            self.critical.near_end_days = value;
        }
        if let Some(value) = parse_var(&lookup, "HAMMOCK_NEAR_END_PROGRESS")? {
            self.critical.near_end_progress = value;
        }
        if let Some(value) = parse_var(&lookup, "HAMMOCK_ZONE_LAG")? {
            self.critical.zone_lag = value;
        }
        if let Some(value) = lookup("HAMMOCK_SOURCE_TABLE") {
            self.source.table = value;
        }
        Ok(())
    }

    pub fn outline_settings(&self) -> OutlineSettings {
        OutlineSettings {
            default_zone: self.schedule.default_zone.clone(),
            pad_ratio: self.schedule.pad_ratio,
            max_zone_rows: self.schedule.max_zone_rows,
            min_phase_bar_width: self.schedule.min_phase_bar_width,
            min_zone_bar_width: self.schedule.min_zone_bar_width,
            critical: self.critical.rule(),
        }
    }

    pub fn phase_table(&self) -> PhaseTable {
        self.phases.table()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub default_zone: String,
    pub pad_ratio: f64,
    pub max_zone_rows: usize,
    pub min_phase_bar_width: f64,
    pub min_zone_bar_width: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let settings = OutlineSettings::default();
        Self {
            default_zone: settings.default_zone,
            pad_ratio: settings.pad_ratio,
            max_zone_rows: settings.max_zone_rows,
            min_phase_bar_width: settings.min_phase_bar_width,
            min_zone_bar_width: settings.min_zone_bar_width,
        }
    }
}

impl ScheduleConfig {
    fn merge(&mut self, patch: SchedulePatch) {
        if let Some(value) = patch.default_zone {
            self.default_zone = value;
        }
        if let Some(value) = patch.pad_ratio {
            self.pad_ratio = value;
        }
        if let Some(value) = patch.max_zone_rows {
            self.max_zone_rows = value;
        }
        if let Some(value) = patch.min_phase_bar_width {
            self.min_phase_bar_width = value;
        }
        if let Some(value) = patch.min_zone_bar_width {
            self.min_zone_bar_width = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalConfig {
    pub near_end_days: i64,
    pub near_end_progress: u8,
    pub behind_expected_floor: u8,
    pub behind_gap: u8,
    pub zone_lag: u8,
}

impl Default for CriticalConfig {
    fn default() -> Self {
        let rule = CriticalRule::default();
        Self {
            near_end_days: rule.near_end_days,
            near_end_progress: rule.near_end_progress,
            behind_expected_floor: rule.behind_expected_floor,
            behind_gap: rule.behind_gap,
            zone_lag: rule.zone_lag,
        }
    }
}

impl CriticalConfig {
    fn merge(&mut self, patch: CriticalPatch) {
        if let Some(value) = patch.near_end_days {
            self.near_end_days = value;
        }
        if let Some(value) = patch.near_end_progress {
            self.near_end_progress = value;
        }
        if let Some(value) = patch.behind_expected_floor {
            self.behind_expected_floor = value;
        }
        if let Some(value) = patch.behind_gap {
            self.behind_gap = value;
        }
        if let Some(value) = patch.zone_lag {
            self.zone_lag = value;
        }
    }

    pub const fn rule(&self) -> CriticalRule {
        CriticalRule {
            near_end_days: self.near_end_days,
            near_end_progress: self.near_end_progress,
            behind_expected_floor: self.behind_expected_floor,
            behind_gap: self.behind_gap,
            zone_lag: self.zone_lag,
        }
    }
}

/// Table and column names of the cost-loaded schedule store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub table: String,
    pub category1: String,
    pub category2: String,
    pub zone: String,
    pub start_date: String,
    pub end_date: String,
    pub cost: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            table: "evms".to_string(),
            category1: "HOW1_공사".to_string(),
            category2: "HOW2_대공종".to_string(),
            zone: "WHERE2_동".to_string(),
            start_date: "WHEN1_시작일".to_string(),
            end_date: "WHEN2종료일".to_string(),
            cost: "R10_합계_금액".to_string(),
        }
    }
}

impl SourceConfig {
    fn merge(&mut self, patch: SourcePatch) {
        if let Some(value) = patch.table {
            self.table = value;
        }
        if let Some(value) = patch.category1 {
            self.category1 = value;
        }
        if let Some(value) = patch.category2 {
            self.category2 = value;
        }
        if let Some(value) = patch.zone {
            self.zone = value;
        }
        if let Some(value) = patch.start_date {
            self.start_date = value;
        }
        if let Some(value) = patch.end_date {
            self.end_date = value;
        }
        if let Some(value) = patch.cost {
            self.cost = value;
        }
    }
}

/// Phase table overrides. Unset parts fall back to the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<PhaseRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallbacks: Option<Vec<CategoryFallback>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch_all: Option<String>,
}

impl PhasesConfig {
    fn merge(&mut self, patch: PhasesPatch) {
        if patch.rules.is_some() {
            self.rules = patch.rules;
        }
        if patch.fallbacks.is_some() {
            self.fallbacks = patch.fallbacks;
        }
        if patch.catch_all.is_some() {
            self.catch_all = patch.catch_all;
        }
    }

    pub fn table(&self) -> PhaseTable {
        let rules = self
            .rules
            .clone()
            .unwrap_or_else(crate::core::phase::default_rules);
        let fallbacks = self
            .fallbacks
            .clone()
            .unwrap_or_else(crate::core::phase::default_fallbacks);
        let catch_all = self.catch_all.as_deref().unwrap_or(CATCH_ALL_PHASE);
        PhaseTable::new(rules, &fallbacks, PhaseRule::catch_all(catch_all))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub schedule: Option<SchedulePatch>,
    pub critical: Option<CriticalPatch>,
    pub source: Option<SourcePatch>,
    pub phases: Option<PhasesPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SchedulePatch {
    pub default_zone: Option<String>,
    pub pad_ratio: Option<f64>,
    pub max_zone_rows: Option<usize>,
    pub min_phase_bar_width: Option<f64>,
    pub min_zone_bar_width: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CriticalPatch {
    pub near_end_days: Option<i64>,
    pub near_end_progress: Option<u8>,
    pub behind_expected_floor: Option<u8>,
    pub behind_gap: Option<u8>,
    pub zone_lag: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SourcePatch {
    pub table: Option<String>,
    pub category1: Option<String>,
    pub category2: Option<String>,
    pub zone: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub cost: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PhasesPatch {
    pub rules: Option<Vec<PhaseRule>>,
    pub fallbacks: Option<Vec<CategoryFallback>>,
    pub catch_all: Option<String>,
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|err| {
            HammockError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}
