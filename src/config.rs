use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::{HarnessError, Result};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".examine.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Default substring filter applied to test names
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    /// Default report format ("text" or "json")
    #[serde(default)]
    pub format: Option<String>,
    /// Whether to color the report markers
    #[serde(default)]
    pub color: Option<bool>,
}

impl Config {
    /// Load configuration from a file in the working directory
    pub fn load() -> Result<Self> {
        let config_path = Path::new(DEFAULT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            HarnessError::ConfigError(format!("failed to read {:?}: {}", config_path, e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            HarnessError::ConfigError(format!("failed to parse TOML from {:?}: {}", config_path, e))
        })?;

        Ok(config)
    }

    /// Load default config if the file is missing or unreadable
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_documented_shape() {
        let config: Config = toml::from_str(
            r#"
            [runner]
            filter = "substitute"

            [output]
            format = "json"
            color = false
            "#,
        )
        .unwrap();

        assert_eq!(config.runner.filter.as_deref(), Some("substitute"));
        assert_eq!(config.output.format.as_deref(), Some("json"));
        assert_eq!(config.output.color, Some(false));
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.runner.filter.is_none());
        assert!(config.output.format.is_none());
    }
}
