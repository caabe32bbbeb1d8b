//! `FlashTag` Configuration Module
//!
//! Provides configuration file support via `flashtag.toml`, environment variables,
//! and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`FLASHTAG_<SECTION>__<KEY>`)
//! 3. Configuration file (`flashtag.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default size of the reusable buffer used to skip past a page offset.
pub const DEFAULT_DISCARD_BUFFER_SIZE: usize = 1024;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Query configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Elements pulled per step while skipping to a page offset.
    pub discard_buffer_size: usize,
    /// Page size used when the caller does not specify one.
    pub default_page_size: usize,
    /// Upper bound on a single page; larger requests are clamped.
    pub max_page_size: usize,
    /// Number of tags returned by top-k when the caller does not specify one.
    pub default_top_k: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            discard_buffer_size: DEFAULT_DISCARD_BUFFER_SIZE,
            default_page_size: 10,
            max_page_size: 10_000,
            default_top_k: 10,
        }
    }
}

/// Index lifecycle configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Run the bitmap run-optimization pass when the load phase is sealed.
    pub run_optimize_on_seal: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            run_optimize_on_seal: true,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main `FlashTag` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlashConfig {
    /// Query configuration.
    pub query: QueryConfig,
    /// Index lifecycle configuration.
    pub index: IndexConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl FlashConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("flashtag.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("FLASHTAG_").split("__").lowercase(true));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.discard_buffer_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "query.discard_buffer_size".to_string(),
                message: "value must be > 0".to_string(),
            });
        }

        if self.query.max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "query.max_page_size".to_string(),
                message: "value must be > 0".to_string(),
            });
        }

        if self.query.default_page_size > self.query.max_page_size {
            return Err(ConfigError::InvalidValue {
                key: "query.default_page_size".to_string(),
                message: format!(
                    "value {} exceeds query.max_page_size ({})",
                    self.query.default_page_size, self.query.max_page_size
                ),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
