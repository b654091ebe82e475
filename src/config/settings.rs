//! Application settings loading from config.toml
//!
//! The file is optional: when it does not exist every setting takes its default.
//! A file that exists but cannot be read or parsed is an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable naming an alternative settings file
pub const CONFIG_PATH_VAR: &str = "BBOARD_CONFIG";

/// Settings file used when [`CONFIG_PATH_VAR`] is not set
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_address: String,
    /// Currency label appended by the `currency` template filter
    pub currency_name: String,
    /// Rubrics created on startup when missing
    pub rubrics: Vec<RubricConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            currency_name: crate::templatetags::DEFAULT_CURRENCY.to_string(),
            rubrics: Vec::new(),
        }
    }
}

/// Configuration for a single seeded rubric
#[derive(Debug, Clone, Deserialize)]
pub struct RubricConfig {
    /// Rubric name
    pub name: String,
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {:?}", path);

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads settings from `$BBOARD_CONFIG` or `./config.toml`, using defaults when
/// the file is absent.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        warn!("Configuration file {} not found, using defaults", path);
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let toml_str = r#"
            bind_address = "0.0.0.0:9000"
            currency_name = "USD"

            [[rubrics]]
            name = "Real estate"

            [[rubrics]]
            name = "Vehicles"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.currency_name, "USD");
        assert_eq!(config.rubrics.len(), 2);
        assert_eq!(config.rubrics[1].name, "Vehicles");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8000");
        assert_eq!(config.currency_name, "тг.");
        assert!(config.rubrics.is_empty());
    }

    #[test]
    fn test_load_config_missing_file_is_error() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_load_config_invalid_toml_is_error() {
        let path = std::env::temp_dir().join(format!("bboard-invalid-{}.toml", std::process::id()));
        std::fs::write(&path, "bind_address = [").unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
