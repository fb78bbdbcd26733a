//! TOML Configuration File Support
//!
//! Centralized configuration for progress widgets, read from
//! `~/.config/stepper/progress.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [animation]
//! tick_interval_ms = 10
//!
//! [plain]
//! step_weight = 10.0
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::DEFAULT_TICK_INTERVAL;
use crate::value::MAX;

/// Step weight used by widgets without a step list
pub const DEFAULT_PLAIN_STEP_WEIGHT: f64 = 10.0;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Animation section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationToml {
    /// Milliseconds between animation ticks
    pub tick_interval_ms: Option<u64>,
}

/// Plain-mode section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlainToml {
    /// Value delta for one step-relative move without a step list
    pub step_weight: Option<f64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressToml {
    /// Animation configuration section
    pub animation: AnimationToml,

    /// Plain-mode configuration section
    pub plain: PlainToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration for progress widgets
#[derive(Clone, Debug)]
pub struct ProgressConfig {
    /// Time between animation ticks
    pub tick_interval: Duration,

    /// Value delta for one step in plain mode
    pub plain_step_weight: f64,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            plain_step_weight: DEFAULT_PLAIN_STEP_WEIGHT,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ProgressConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        if !(self.plain_step_weight > 0.0 && self.plain_step_weight <= MAX) {
            return Err(ConfigError::ValidationError(format!(
                "plain step weight must be in (0, {MAX}], got {}",
                self.plain_step_weight
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/stepper/progress.toml` or
/// `~/.config/stepper/progress.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stepper").join("progress.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// merged configuration is invalid. A missing config file is not an error.
pub fn load_config() -> Result<ProgressConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed, or
/// if the merged configuration is invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ProgressConfig, ConfigError> {
    let mut config = ProgressConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ProgressToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ProgressConfig, toml: &ProgressToml) {
    if let Some(ms) = toml.animation.tick_interval_ms {
        config.tick_interval = Duration::from_millis(ms);
    }
    if let Some(weight) = toml.plain.step_weight {
        config.plain_step_weight = weight;
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut ProgressConfig) {
    if let Ok(tick) = std::env::var("STEPPER_TICK_MS") {
        if let Ok(ms) = tick.parse::<u64>() {
            config.tick_interval = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(weight) = std::env::var("STEPPER_PLAIN_STEP_WEIGHT") {
        if let Ok(w) = weight.parse::<f64>() {
            config.plain_step_weight = w;
            config.source = ConfigSource::Env;
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Tick interval override in milliseconds
    pub tick_interval_ms: Option<u64>,
    /// Plain step weight override
    pub plain_step_weight: Option<f64>,
}

impl ConfigOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set tick interval override
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = Some(ms);
        self
    }

    /// Set plain step weight override
    #[must_use]
    pub fn with_plain_step_weight(mut self, weight: f64) -> Self {
        self.plain_step_weight = Some(weight);
        self
    }

    /// Apply overrides to a configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if an override makes the
    /// configuration invalid.
    pub fn apply(&self, config: &mut ProgressConfig) -> Result<(), ConfigError> {
        if self.tick_interval_ms.is_some() || self.plain_step_weight.is_some() {
            config.source = ConfigSource::Cli;
        }

        if let Some(ms) = self.tick_interval_ms {
            config.tick_interval = Duration::from_millis(ms);
        }
        if let Some(weight) = self.plain_step_weight {
            config.plain_step_weight = weight;
        }

        config.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================
