//! Configuration management for `filmroute`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::FilmRouteError;
use crate::routing::{DEFAULT_K, RouteBuilder};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `filmroute`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmRouteConfig {
    /// Query defaults
    #[serde(default)]
    pub query: QueryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Input and output locations
    #[serde(default)]
    pub output: OutputConfig,
}

/// Query configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Number of nearest locations to route through
    #[serde(default = "default_k")]
    pub k: usize,
    /// Improve the greedy route with 2-opt
    #[serde(default)]
    pub two_opt: bool,
    /// Maximum number of 2-opt sweeps
    #[serde(default = "default_two_opt_passes")]
    pub two_opt_passes: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// File locations used by the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the rendered GeoJSON map is written
    #[serde(default = "default_map_path")]
    pub map_path: String,
    /// Geocache used to resolve `locations.list` entries
    #[serde(default = "default_geocache_path")]
    pub geocache_path: String,
}

// Default value functions
fn default_k() -> usize {
    DEFAULT_K
}

fn default_two_opt_passes() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_map_path() -> String {
    "map.geojson".to_string()
}

fn default_geocache_path() -> String {
    "geocache".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            k: default_k(),
            two_opt: false,
            two_opt_passes: default_two_opt_passes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            map_path: default_map_path(),
            geocache_path: default_geocache_path(),
        }
    }
}

impl Default for FilmRouteConfig {
    fn default() -> Self {
        Self {
            query: QueryConfig::default(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl QueryConfig {
    /// Route builder matching these settings
    #[must_use]
    pub fn route_builder(&self) -> RouteBuilder {
        if self.two_opt {
            RouteBuilder::new().with_two_opt(self.two_opt_passes)
        } else {
            RouteBuilder::new()
        }
    }
}

impl FilmRouteConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // FILMROUTE_QUERY__K=5 overrides query.k
        builder = builder.add_source(
            Environment::with_prefix("FILMROUTE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: FilmRouteConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("filmroute").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.query.two_opt_passes == 0 {
            self.query.two_opt_passes = default_two_opt_passes();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.output.map_path.is_empty() {
            self.output.map_path = default_map_path();
        }
        if self.output.geocache_path.is_empty() {
            self.output.geocache_path = default_geocache_path();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.query.k > 100 {
            return Err(FilmRouteError::config("Number of locations cannot exceed 100").into());
        }

        if self.query.two_opt_passes > 50 {
            return Err(FilmRouteError::config("2-opt passes cannot exceed 50").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FilmRouteError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FilmRouteError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
