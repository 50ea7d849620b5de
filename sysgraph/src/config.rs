//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sysgraph_core::{ChartConfig, Error, LoggingConfig, Result, load_config};

/// Where samples come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Live CPU, memory and load readings of this machine.
    #[default]
    System,
    /// Synthetic random walks.
    Demo,
}

/// Sampling settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Milliseconds between two samples (default: 1000).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Chart zoom, scroll and label tuning.
    #[serde(default)]
    pub chart: ChartConfig,

    /// Sample source.
    #[serde(default)]
    pub source: SourceConfig,
}

impl AppConfig {
    /// Load and validate a JSON5 configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: AppConfig = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config_dir>/sysgraph/sysgraph.json5`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sysgraph").join("sysgraph.json5"))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.chart.validate()?;

        if self.source.poll_interval_ms < 50 {
            return Err(Error::Config(
                "source.poll_interval_ms must be at least 50".to_string(),
            ));
        }

        Ok(())
    }
}
