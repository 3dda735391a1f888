//! Shopfront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOP_CATALOG` - Catalog location, URL or path (default: products.json)
//! - `SHOP_STORAGE_DIR` - Directory holding the storage slots (default: .shop)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Fraction of error events to send (default: 1.0)

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogSource;

const DEFAULT_CATALOG: &str = "products.json";
const DEFAULT_STORAGE_DIR: &str = ".shop";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopfront configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Where the catalog document is read from
    pub catalog: CatalogSource,
    /// Directory for the `products`, `cart` and `favourites` slots
    pub storage_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSource::File(PathBuf::from(DEFAULT_CATALOG)),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_catalog(None)
    }

    /// Load configuration from environment variables, taking the catalog
    /// location from `catalog` when given. `SHOP_CATALOG` is then not read.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog location or a variable is invalid.
    pub fn from_env_with_catalog(catalog: Option<&str>) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(get_optional_env, catalog)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        catalog: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let catalog = match catalog {
            Some(location) => parse_catalog("--catalog", location)?,
            None => parse_catalog("SHOP_CATALOG", &var_or("SHOP_CATALOG", DEFAULT_CATALOG))?,
        };
        let storage_dir = PathBuf::from(var_or("SHOP_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        let sentry_dsn = lookup("SENTRY_DSN");
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate =
            parse_sample_rate("SENTRY_SAMPLE_RATE", &var_or("SENTRY_SAMPLE_RATE", "1.0"))?;

        Ok(Self {
            catalog,
            storage_dir,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Replace the catalog location.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the location is empty or unusable.
    pub fn with_catalog(mut self, location: &str) -> Result<Self, ConfigError> {
        self.catalog = parse_catalog("--catalog", location)?;
        Ok(self)
    }

    /// Replace the storage directory.
    #[must_use]
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_catalog(name: &str, location: &str) -> Result<CatalogSource, ConfigError> {
    CatalogSource::parse(location)
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))
}

fn parse_sample_rate(name: &str, value: &str) -> Result<f32, ConfigError> {
    let rate = value
        .trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
