use serde::Deserialize;

use summit_climb::config::{CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH};

/// Scheduler settings, read from the `[runner]` table of the session config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Hard stop after this many frames.
    pub max_frames: u64,
    /// Pace frames on a wall-clock interval. When false, frames run back to back.
    pub realtime: bool,
    /// End the run once the summary has been shown.
    pub stop_on_summary: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            // Ten minutes at 60 Hz.
            max_frames: 36_000,
            realtime: true,
            stop_on_summary: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    runner: RunnerConfig,
}

impl RunnerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<ConfigFile>(content).map(|file| file.runner)
    }

    /// Load the `[runner]` table, then apply `SUMMIT_MAX_FRAMES` and
    /// `SUMMIT_REALTIME` overrides.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded runner configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                Self::default()
            },
        };

        if let Ok(val) = std::env::var("SUMMIT_MAX_FRAMES")
            && let Ok(n) = val.parse::<u64>()
        {
            config.max_frames = n;
        }
        if let Ok(val) = std::env::var("SUMMIT_REALTIME")
            && let Ok(flag) = val.parse::<bool>()
        {
            config.realtime = flag;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_table_gives_defaults() {
        let cfg = RunnerConfig::from_toml_str("seed = 3").unwrap();
        assert_eq!(cfg, RunnerConfig::default());
    }

    #[test]
    fn runner_table_is_read() {
        let cfg = RunnerConfig::from_toml_str(
            r#"
            tick_rate_hz = 30.0

            [runner]
            max_frames = 600
            realtime = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.max_frames, 600);
        assert!(!cfg.realtime);
        assert!(cfg.stop_on_summary);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let cfg = RunnerConfig::from_toml_str(include_str!("../../../config/summit.toml")).unwrap();
        assert_eq!(cfg, RunnerConfig::default());
    }

    #[test]
    fn bad_runner_table_is_error() {
        assert!(RunnerConfig::from_toml_str("[runner]\nmax_frames = \"lots\"").is_err());
    }
}
