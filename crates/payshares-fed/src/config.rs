//! Tool configuration loading from file and environment variables.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Result formatting settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "warn", "debug", "payshares_address=debug,warn").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON results.
    #[serde(default)]
    pub pretty: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `PAYSHARES_LOG_LEVEL` overrides `logging.level`
/// - `PAYSHARES_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `PAYSHARES_OUTPUT_PRETTY` overrides `output.pretty`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %p.display(), "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies `PAYSHARES_*` overrides looked up through `var`.
pub fn apply_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(level) = var("PAYSHARES_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("PAYSHARES_LOG_JSON") {
        config.logging.json = is_truthy(&json);
    }
    if let Some(pretty) = var("PAYSHARES_OUTPUT_PRETTY") {
        config.output.pretty = is_truthy(&pretty);
    }
}

fn is_truthy(value: &str) -> bool {
    value == "true" || value == "1"
}
