//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPFRONT_DATA_DIR` - Directory for the JSON file store (default: .shopfront)
//! - `SHOPFRONT_CATALOG` - YAML catalog file (default: built-in demo catalog)
//! - `SHOPFRONT_CAROUSEL_INTERVAL_MS` - Carousel autoplay period (default: 3500)
//! - `SHOPFRONT_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".shopfront";
const DEFAULT_CAROUSEL_INTERVAL_MS: &str = "3500";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding one `<key>.json` file per store key
    pub data_dir: PathBuf,
    /// Catalog seed file; `None` uses the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Carousel autoplay period
    pub carousel_interval: Duration,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            carousel_interval: Duration::from_millis(3500),
            log_format: LogFormat::Pretty,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_env_or_default(
            &lookup,
            "SHOPFRONT_DATA_DIR",
            DEFAULT_DATA_DIR,
        ));
        let catalog_path = get_optional_env(&lookup, "SHOPFRONT_CATALOG").map(PathBuf::from);

        let interval_ms = get_env_or_default(
            &lookup,
            "SHOPFRONT_CAROUSEL_INTERVAL_MS",
            DEFAULT_CAROUSEL_INTERVAL_MS,
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFRONT_CAROUSEL_INTERVAL_MS".to_string(), e.to_string())
        })?;
        if interval_ms == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_CAROUSEL_INTERVAL_MS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let log_format = get_env_or_default(&lookup, "SHOPFRONT_LOG_FORMAT", "pretty")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            data_dir,
            catalog_path,
            carousel_interval: Duration::from_millis(interval_ms),
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable. Blank values count as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.carousel_interval, Duration::from_millis(3500));
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("SHOPFRONT_DATA_DIR", "/tmp/shop"),
            ("SHOPFRONT_CATALOG", "catalog.yaml"),
            ("SHOPFRONT_CAROUSEL_INTERVAL_MS", "1000"),
            ("SHOPFRONT_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.yaml")));
        assert_eq!(config.carousel_interval, Duration::from_secs(1));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_catalog_is_unset() {
        let config = StorefrontConfig::from_lookup(lookup(&[("SHOPFRONT_CATALOG", "  ")])).unwrap();
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_invalid_interval() {
        let err = StorefrontConfig::from_lookup(lookup(&[(
            "SHOPFRONT_CAROUSEL_INTERVAL_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOPFRONT_CAROUSEL_INTERVAL_MS"));

        let err =
            StorefrontConfig::from_lookup(lookup(&[("SHOPFRONT_CAROUSEL_INTERVAL_MS", "0")]))
                .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_invalid_log_format() {
        let result = StorefrontConfig::from_lookup(lookup(&[("SHOPFRONT_LOG_FORMAT", "xml")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
