// Server Configuration Module
// Handles configuration from files and command-line overrides.

use crate::animation::{AnimationConfig, DEFAULT_STEPS, DEFAULT_TICK_MS};
use crate::data::DEFAULT_DATA_PATH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub animation: AnimationSettings,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but can't be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation.steps == 0 {
            return Err(ConfigError::Validation(
                "animation.steps must be at least 1".to_string(),
            ));
        }
        if self.data.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "data.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Animation timing derived from the configuration
    pub fn animation_config(&self) -> AnimationConfig {
        AnimationConfig::new(self.animation.tick_ms, self.animation.steps)
    }
}

/// Server network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8501
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Metrics table location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV with Category, Publications, Citations and h-index columns
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// KPI card count-up settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationSettings {
    /// Delay between frames (ms)
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Step divisor: each tick advances by value / steps
    #[serde(default = "default_steps")]
    pub steps: u64,
}

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

fn default_steps() -> u64 {
    DEFAULT_STEPS
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            steps: default_steps(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(String),
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}
