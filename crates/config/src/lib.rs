//! Configuration loading, validation, and management for TeamUp.
//!
//! Loads configuration from `~/.teamup/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use teamup_formation::{StrategyKind, MIN_TEAM_SIZE};

/// Longest shutdown grace period accepted, in seconds.
pub const MAX_SHUTDOWN_GRACE_SECS: u64 = 600;

/// The root configuration structure.
///
/// Maps directly to `~/.teamup/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Team formation defaults
    #[serde(default)]
    pub formation: FormationConfig,

    /// Where participant and team files live
    #[serde(default)]
    pub data: DataConfig,

    /// Log level and log file settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationConfig {
    #[serde(default = "default_team_size")]
    pub default_team_size: usize,

    /// `balanced`, `skill-based` or `role-based`
    #[serde(default = "default_strategy")]
    pub default_strategy: String,

    /// How long shutdown waits for in-flight formation work
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

fn default_team_size() -> usize {
    5
}
fn default_strategy() -> String {
    "balanced".into()
}
fn default_shutdown_grace_secs() -> u64 {
    30
}

impl FormationConfig {
    /// The configured default strategy.
    pub fn strategy(&self) -> Result<StrategyKind, ConfigError> {
        self.default_strategy
            .parse()
            .map_err(|e: String| ConfigError::ValidationError(format!("default_strategy: {e}")))
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            default_team_size: default_team_size(),
            default_strategy: default_strategy(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Persistent roster every survey and session is merged into
    #[serde(default = "default_roster_file")]
    pub roster_file: PathBuf,

    /// Loaded when the roster file is missing or holds no participants
    #[serde(default = "default_sample_file")]
    pub sample_file: PathBuf,

    /// Directory for team exports
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Load the roster automatically at the start of a session
    #[serde(default = "default_true")]
    pub auto_load: bool,
}

fn default_roster_file() -> PathBuf {
    PathBuf::from("data/allParticipants.csv")
}
fn default_sample_file() -> PathBuf {
    PathBuf::from("data/participants_sample.csv")
}
fn default_export_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_true() -> bool {
    true
}

impl DataConfig {
    /// Re-root every data path under `dir`, keeping file names.
    pub fn rebase(&mut self, dir: &Path) {
        for path in [&mut self.roster_file, &mut self.sample_file] {
            if let Some(name) = path.file_name().map(|n| n.to_os_string()) {
                *path = dir.join(name);
            }
        }
        self.export_dir = dir.to_path_buf();
    }

    /// Path of an export file inside the export directory.
    pub fn export_path(&self, file_name: &str) -> PathBuf {
        self.export_dir.join(file_name)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            roster_file: default_roster_file(),
            sample_file: default_sample_file(),
            export_dir: default_export_dir(),
            auto_load: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Also write each session's log to `<log_dir>/application_<timestamp>.log`
    #[serde(default = "default_true")]
    pub file_logging: bool,

    /// Write the session log as JSON lines instead of plain text
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: default_log_dir(),
            file_logging: true,
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.teamup/config.toml).
    ///
    /// Environment variables override file values:
    /// - `TEAMUP_TEAM_SIZE`
    /// - `TEAMUP_STRATEGY`
    /// - `TEAMUP_DATA_DIR`
    /// - `TEAMUP_LOG`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_path())
    }

    /// Load from `path`, then apply environment overrides and validate.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(size) = lookup("TEAMUP_TEAM_SIZE") {
            self.formation.default_team_size = size.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("TEAMUP_TEAM_SIZE is not a number: {size}"))
            })?;
        }

        if let Some(strategy) = lookup("TEAMUP_STRATEGY") {
            self.formation.default_strategy = strategy;
        }

        if let Some(dir) = lookup("TEAMUP_DATA_DIR") {
            self.data.rebase(Path::new(&dir));
        }

        if let Some(level) = lookup("TEAMUP_LOG") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".teamup")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.formation.default_team_size < MIN_TEAM_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "default_team_size must be at least {MIN_TEAM_SIZE}"
            )));
        }

        self.formation.strategy()?;

        if self.formation.shutdown_grace_secs > MAX_SHUTDOWN_GRACE_SECS {
            return Err(ConfigError::ValidationError(format!(
                "shutdown_grace_secs must be at most {MAX_SHUTDOWN_GRACE_SECS}"
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
