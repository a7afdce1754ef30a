//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Shared primitives and utilities for the presence runtime."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use tracing::debug;

use crate::logging::LogFormat;

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::StructuredJson
}

fn default_employee_tick() -> Duration {
    Duration::from_millis(3_000)
}

fn default_alert_tick() -> Duration {
    Duration::from_millis(15_000)
}

fn default_alert_probability() -> f64 {
    0.3
}

fn default_alert_retention() -> usize {
    10
}

fn default_max_mutations() -> usize {
    3
}

fn default_on_site_probability() -> f64 {
    0.8
}

fn default_large_roster() -> usize {
    250
}

fn default_medium_roster() -> usize {
    100
}

fn default_security_roster() -> usize {
    50
}

fn default_attendance_days() -> u32 {
    7
}

fn default_daily_stats_days() -> u32 {
    14
}

fn default_security_log_count() -> usize {
    100
}

fn default_presence_page_size() -> usize {
    20
}

fn default_employees_page_size() -> usize {
    30
}

fn default_log_page_size() -> usize {
    50
}

/// Primary configuration object for the pointy runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub pages: PagesConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
///
/// `source` is `None` when no file was found and defaults were used.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &'static str = "POINTY_CONFIG";

    /// Load configuration from disk, respecting the `POINTY_CONFIG` override.
    /// Fails when none of the candidates exist.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        let loaded = Self::load_with_source(candidates)?;
        match loaded.source {
            Some(_) => Ok(loaded.config),
            None => Err(anyhow!(
                "no configuration files found. inspected: {}",
                describe_candidates(candidates)
            )),
        }
    }

    /// Load configuration together with the effective source path, falling back
    /// to [`AppConfig::default`] when no candidate exists.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!(
            inspected = %describe_candidates(candidates),
            "no configuration file found, using defaults"
        );
        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.pages.validate()?;
        self.views.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

fn describe_candidates<P: AsRef<Path>>(candidates: &[P]) -> String {
    candidates
        .iter()
        .map(|p| p.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

/// Knobs for the employee and alert simulators.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed shared by every page session. `None` draws from OS entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
    #[serde(default = "default_employee_tick", rename = "employee_tick_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub employee_tick: Duration,
    #[serde(default = "default_alert_tick", rename = "alert_tick_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub alert_tick: Duration,
    #[serde(default = "default_alert_probability")]
    pub alert_probability: f64,
    #[serde(default = "default_alert_retention")]
    pub alert_retention: usize,
    #[serde(default = "default_max_mutations")]
    pub max_mutations_per_tick: usize,
    #[serde(default = "default_on_site_probability")]
    pub on_site_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            employee_tick: default_employee_tick(),
            alert_tick: default_alert_tick(),
            alert_probability: default_alert_probability(),
            alert_retention: default_alert_retention(),
            max_mutations_per_tick: default_max_mutations(),
            on_site_probability: default_on_site_probability(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.employee_tick.is_zero() {
            return Err(anyhow!("simulation.employee_tick_ms must be greater than zero"));
        }
        if self.alert_tick.is_zero() {
            return Err(anyhow!("simulation.alert_tick_ms must be greater than zero"));
        }
        check_probability("simulation.alert_probability", self.alert_probability)?;
        check_probability("simulation.on_site_probability", self.on_site_probability)?;
        if self.alert_retention == 0 {
            return Err(anyhow!("simulation.alert_retention must be at least 1"));
        }
        if self.max_mutations_per_tick == 0 {
            return Err(anyhow!(
                "simulation.max_mutations_per_tick must be at least 1"
            ));
        }
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(anyhow!("{} must lie within [0, 1], got {}", name, value));
    }
    Ok(())
}

/// Roster sizes and history windows per page. Every page generates its own data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_large_roster")]
    pub dashboard_employees: usize,
    #[serde(default = "default_large_roster")]
    pub presence_employees: usize,
    #[serde(default = "default_large_roster")]
    pub analytics_employees: usize,
    #[serde(default = "default_medium_roster")]
    pub attendance_employees: usize,
    #[serde(default = "default_medium_roster")]
    pub employees_employees: usize,
    #[serde(default = "default_security_roster")]
    pub security_employees: usize,
    #[serde(default = "default_attendance_days")]
    pub attendance_days: u32,
    #[serde(default = "default_daily_stats_days")]
    pub daily_stats_days: u32,
    #[serde(default = "default_security_log_count")]
    pub security_log_count: usize,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dashboard_employees: default_large_roster(),
            presence_employees: default_large_roster(),
            analytics_employees: default_large_roster(),
            attendance_employees: default_medium_roster(),
            employees_employees: default_medium_roster(),
            security_employees: default_security_roster(),
            attendance_days: default_attendance_days(),
            daily_stats_days: default_daily_stats_days(),
            security_log_count: default_security_log_count(),
        }
    }
}

impl PagesConfig {
    pub fn validate(&self) -> Result<()> {
        if self.attendance_days == 0 {
            return Err(anyhow!("pages.attendance_days must be at least 1"));
        }
        if self.daily_stats_days == 0 {
            return Err(anyhow!("pages.daily_stats_days must be at least 1"));
        }
        Ok(())
    }
}

/// Table truncation sizes for the derived views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    #[serde(default = "default_presence_page_size")]
    pub presence_page_size: usize,
    #[serde(default = "default_employees_page_size")]
    pub employees_page_size: usize,
    #[serde(default = "default_log_page_size")]
    pub attendance_page_size: usize,
    #[serde(default = "default_log_page_size")]
    pub security_page_size: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            presence_page_size: default_presence_page_size(),
            employees_page_size: default_employees_page_size(),
            attendance_page_size: default_log_page_size(),
            security_page_size: default_log_page_size(),
        }
    }
}

impl ViewsConfig {
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("views.presence_page_size", self.presence_page_size),
            ("views.employees_page_size", self.employees_page_size),
            ("views.attendance_page_size", self.attendance_page_size),
            ("views.security_page_size", self.security_page_size),
        ];
        for (name, size) in sizes {
            if size == 0 {
                return Err(anyhow!("{} must be at least 1", name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_dashboard_behaviour() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.employee_tick, Duration::from_secs(3));
        assert_eq!(config.simulation.alert_tick, Duration::from_secs(15));
        assert_eq!(config.simulation.alert_retention, 10);
        assert_eq!(config.pages.dashboard_employees, 250);
        assert_eq!(config.pages.security_employees, 50);
        assert_eq!(config.views.presence_page_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let config = AppConfig::from_str(
            r#"
            [simulation]
            random_seed = 42
            employee_tick_ms = 500

            [pages]
            attendance_days = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.random_seed, Some(42));
        assert_eq!(config.simulation.employee_tick, Duration::from_millis(500));
        assert_eq!(config.simulation.alert_tick, Duration::from_secs(15));
        assert_eq!(config.pages.attendance_days, 3);
        assert_eq!(config.pages.presence_employees, 250);
    }

    #[test]
    fn rejects_zero_interval() {
        let err = AppConfig::from_str("[simulation]\nemployee_tick_ms = 0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("employee_tick_ms"));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        assert!(AppConfig::from_str("[simulation]\nalert_probability = 1.5\n").is_err());
    }

    #[test]
    fn rejects_zero_day_range() {
        assert!(AppConfig::from_str("[pages]\nattendance_days = 0\n").is_err());
    }

    #[test]
    fn missing_candidates_fall_back_to_defaults() {
        let loaded = AppConfig::load_with_source(&["does/not/exist.toml"]).unwrap();
        assert!(loaded.source.is_none());
        assert!(AppConfig::load(&["does/not/exist.toml"]).is_err());
    }

    #[test]
    fn loads_first_existing_candidate() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[views]\npresence_page_size = 5").unwrap();
        file.flush().unwrap();
        let loaded =
            AppConfig::load_with_source(&[Path::new("missing.toml"), file.path()]).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(file.path()));
        assert_eq!(loaded.config.views.presence_page_size, 5);
    }
}
