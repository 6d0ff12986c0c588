use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::physics::PhysicsParams;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "SUMMIT_CONFIG";
/// Config file used when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/summit.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config read error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Data-driven configuration for a climbing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbConfig {
    pub physics: PhysicsParams,
    /// Player y beyond which the run counts as a fall (y grows downward).
    pub fall_threshold_y: f32,
    /// Delay between the fall notification and the session reset (seconds).
    pub fall_reset_delay_secs: f32,
    /// Delay between reaching the summit and showing the summary (seconds).
    pub summary_delay_secs: f32,
    /// Target frame rate for the scheduler.
    pub tick_rate_hz: f32,
    /// Seed for the first world. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsParams::default(),
            fall_threshold_y: 1000.0,
            fall_reset_delay_secs: 2.0,
            summary_delay_secs: 1.0,
            tick_rate_hz: 60.0,
            seed: None,
        }
    }
}

impl ClimbConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Load config from `SUMMIT_CONFIG` or `config/summit.toml`. Falls back to
    /// defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match Self::from_path(&path) {
            Ok(cfg) => cfg,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            },
        }
    }
}
