//! Console configuration
//!
//! Loaded from YAML, then adjusted from the environment.

use std::path::{Path, PathBuf};

use action_wait::WaitTimeouts;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

pub const ENV_WAIT_SMALL_MS: &str = "AUTHORING_WAIT_SMALL_MS";
pub const ENV_WAIT_MEDIUM_MS: &str = "AUTHORING_WAIT_MEDIUM_MS";
pub const ENV_LOG_LEVEL: &str = "AUTHORING_LOG_LEVEL";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub waits: WaitTimeouts,
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            waits: WaitTimeouts::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("Failed to parse config file")
    }

    /// Environment variables win over file values.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(ms) = env_millis(ENV_WAIT_SMALL_MS)? {
            self.waits.small_ms = ms;
        }
        if let Some(ms) = env_millis(ENV_WAIT_MEDIUM_MS)? {
            self.waits.medium_ms = ms;
        }
        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            if !level.trim().is_empty() {
                self.log_level = level.trim().to_string();
            }
        }
        Ok(())
    }
}

fn env_millis(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a number of milliseconds, got `{}`", name, raw)),
        _ => Ok(None),
    }
}

/// `<config dir>/authoring-console/config.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().context("Failed to get config directory")?;
    path.push("authoring-console");
    path.push("config.yaml");
    Ok(path)
}

/// Reads `config_path` (or the default location) and applies env overrides.
///
/// A missing file is not an error: defaults are used instead.
pub async fn load_config(config_path: Option<&Path>) -> Result<ConsoleConfig> {
    let config_path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    let mut config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config = ConsoleConfig::from_yaml_str(&content)?;
        info!("Loaded configuration from: {}", config_path.display());
        config
    } else {
        warn!(
            "Config file not found, using defaults: {}",
            config_path.display()
        );
        ConsoleConfig::default()
    };

    config.apply_env_overrides()?;
    Ok(config)
}
