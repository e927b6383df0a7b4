//! `dsim.toml` loading.
//!
//! Lookup order: `--config <path>`, then `$DSIM_CONFIG`, then `./dsim.toml`
//! if it exists, else built-in defaults. An explicitly named file that cannot
//! be read is an error; a missing `./dsim.toml` is not.

use anyhow::{anyhow, Context, Result};
use dsim_core::{DsimError, DsimResult};
use dsim_gen::MAX_LOOKBACK_SECONDS;
use dsim_io::StorageConfig;
use dsim_pipeline::{DistributionSettings, UsageSettings};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "DSIM_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dsim.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DsimConfig {
    /// Fixed RNG seed; unset draws one from the OS
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub distributions: DistributionSettings,
    #[serde(default)]
    pub usage: UsageSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DsimConfig {
    /// Reject settings that would only fail, or spin, once a run is underway.
    pub fn validate(&self) -> DsimResult<()> {
        if self.storage.bucket.trim().is_empty() {
            return Err(DsimError::Config("storage.bucket must not be empty".into()));
        }
        if self.distributions.interval_seconds == 0 {
            return Err(DsimError::Config(
                "distributions.interval_seconds must be at least 1".into(),
            ));
        }
        if self.distributions.pilot_percent > 100 {
            return Err(DsimError::Config(format!(
                "distributions.pilot_percent must be 0..=100, got {}",
                self.distributions.pilot_percent
            )));
        }
        if self.usage.interval_seconds == 0 {
            return Err(DsimError::Config(
                "usage.interval_seconds must be at least 1".into(),
            ));
        }
        if self.usage.lookback_seconds > MAX_LOOKBACK_SECONDS {
            return Err(DsimError::Config(format!(
                "usage.lookback_seconds must be at most {MAX_LOOKBACK_SECONDS}, got {}",
                self.usage.lookback_seconds
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    pub fn level(&self) -> Result<tracing::Level> {
        self.level
            .parse()
            .map_err(|_| anyhow!("logging.level: unknown level {:?}", self.level))
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Flag(PathBuf),
    Environment(PathBuf),
    WorkingDir(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Flag(path)
            | ConfigSource::Environment(path)
            | ConfigSource::WorkingDir(path) => Some(path),
            ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Flag(path) => write!(f, "{} (--config)", path.display()),
            ConfigSource::Environment(path) => write!(f, "{} (${CONFIG_ENV})", path.display()),
            ConfigSource::WorkingDir(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Pick the config file without touching process state, so the order can be
/// tested directly.
pub fn resolve_config_source(
    flag: Option<&Path>,
    env: Option<OsString>,
    local: &Path,
) -> ConfigSource {
    if let Some(path) = flag {
        return ConfigSource::Flag(path.to_path_buf());
    }
    if let Some(value) = env.filter(|v| !v.is_empty()) {
        return ConfigSource::Environment(PathBuf::from(value));
    }
    if local.is_file() {
        return ConfigSource::WorkingDir(local.to_path_buf());
    }
    ConfigSource::Defaults
}

pub fn read_config(path: &Path) -> Result<DsimConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: DsimConfig =
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// Resolve and read the configuration for this process.
pub fn load_config(flag: Option<&Path>) -> Result<(DsimConfig, ConfigSource)> {
    let source = resolve_config_source(
        flag,
        std::env::var_os(CONFIG_ENV),
        Path::new(DEFAULT_CONFIG_FILE),
    );
    let config = match source.path() {
        Some(path) => read_config(path)?,
        None => DsimConfig::default(),
    };
    Ok((config, source))
}
