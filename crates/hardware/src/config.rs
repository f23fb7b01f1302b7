//! Configuration system for the LS-8 machine.
//!
//! This module defines the configuration structures used to parameterize a
//! machine. It provides:
//! 1. **Defaults:** Baseline clock period and tracing options.
//! 2. **Structures:** Hierarchical config for general run options and the clock.
//! 3. **Loading:** JSON deserialization from a string or a file.
//!
//! Every field is optional in JSON; anything left out takes its default.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::DEFAULT_TICK_INTERVAL_MS;

/// Root configuration structure containing all machine settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use ls8_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.clock.interval_ms, 500);
/// assert!(!config.general.trace_instructions);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use ls8_core::config::Config;
///
/// let json = r#"{
///     "general": {
///         "trace_instructions": true,
///         "max_ticks": 1000
///     },
///     "clock": {
///         "interval_ms": 10
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.max_ticks, Some(1000));
/// assert_eq!(config.clock.interval().as_millis(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General run settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Clock settings
    #[serde(default)]
    pub clock: ClockConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Returns
    ///
    /// The configuration, or `ConfigError::Parse` if the text is not valid configuration JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Returns
    ///
    /// The configuration, or a `ConfigError` if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General run settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Trace every executed instruction at `info` level instead of `debug`
    #[serde(default)]
    pub trace_instructions: bool,

    /// Stop the clock after this many ticks (guards against programs without `HALT`)
    #[serde(default)]
    pub max_ticks: Option<u64>,

    /// Print run statistics to stderr when a run ends
    #[serde(default)]
    pub print_stats: bool,
}

/// Clock settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// Tick period in milliseconds
    #[serde(default = "ClockConfig::default_interval_ms")]
    pub interval_ms: u64,
}

impl ClockConfig {
    /// Returns the default tick period in milliseconds.
    const fn default_interval_ms() -> u64 {
        DEFAULT_TICK_INTERVAL_MS
    }

    /// Returns the tick period.
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}
