//! Cart component configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JACARANDA_CATALOG_URL` - Base URL of the catalog/stock service
//!
//! ## Optional
//! - `JACARANDA_CATALOG_TOKEN` - Bearer token for the catalog service
//! - `JACARANDA_CART_PATH` - Path of the cart slot file (default: `jacaranda-cart.json`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default path of the cart slot file.
pub const DEFAULT_CART_PATH: &str = "jacaranda-cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart component configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog/stock service configuration.
    pub catalog: CatalogConfig,
    /// Path of the file holding the persisted cart.
    pub cart_path: PathBuf,
}

/// Catalog service configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog/stock service.
    pub base_url: Url,
    /// Bearer token, when the service requires one.
    pub api_token: Option<SecretString>,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let cart_path =
            PathBuf::from(get_env_or_default("JACARANDA_CART_PATH", DEFAULT_CART_PATH));

        Ok(Self { catalog, cart_path })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("JACARANDA_CATALOG_URL")?;
        let base_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("JACARANDA_CATALOG_URL".to_string(), e.to_string())
        })?;
        let api_token = get_optional_env("JACARANDA_CATALOG_TOKEN").map(SecretString::from);

        Ok(Self {
            base_url,
            api_token,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("JACARANDA_CATALOG_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: JACARANDA_CATALOG_URL"
        );

        let err = ConfigError::InvalidEnvVar("JACARANDA_CATALOG_URL".to_string(), "bad".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid environment variable JACARANDA_CATALOG_URL: bad"
        );
    }

    #[test]
    fn test_catalog_config_debug_redacts_token() {
        let config = CatalogConfig {
            base_url: Url::parse("http://localhost:3333").unwrap(),
            api_token: Some(SecretString::from("super_secret_token")),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("http://localhost:3333"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
