//! Runtime configuration, loaded from TOML.
//!
//! ```toml
//! [sampling]
//! hard_cap = 5000
//!
//! [logging]
//! level = "bolao=debug"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// Largest sample returned by one call unless configured otherwise.
pub const DEFAULT_HARD_CAP: usize = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub sampling: SamplingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Upper bound on items per generated set.
    pub hard_cap: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            hard_cap: DEFAULT_HARD_CAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling.hard_cap == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sampling.hard_cap",
                reason: "must be at least 1".into(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: "cannot be empty".into(),
            });
        }
        Ok(())
    }
}
