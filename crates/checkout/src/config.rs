//! Checkout configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SAMOVAR_API_BASE_URL` - Base URL of the marketplace REST API
//!
//! ## Optional
//! - `SAMOVAR_ACCESS_TOKEN` - Bearer token for the draft endpoints; draft
//!   synchronization is disabled when absent
//! - `SAMOVAR_AUTOSAVE` - Whether form changes are saved automatically
//!   (default: true)
//! - `SAMOVAR_AUTOSAVE_QUIET_MS` - Debounce quiet period in milliseconds
//!   (default: 2000)
//! - `SAMOVAR_FORM_CACHE_PATH` - Local form mirror file
//!   (default: .samovar/checkout-form.json)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::sync::SyncOptions;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout client configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Base URL of the marketplace REST API
    pub api_base_url: Url,
    /// Bearer token for the draft endpoints (sync disabled when absent)
    pub access_token: Option<SecretString>,
    /// Whether observed form changes are flushed automatically
    pub auto_save: bool,
    /// Quiet period a form change must survive before it is flushed
    pub quiet_period: Duration,
    /// Path of the local form mirror file
    pub form_cache_path: PathBuf,
}

impl CheckoutConfig {
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

        let api_base_url = get_required_env("SAMOVAR_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SAMOVAR_API_BASE_URL".to_string(), e.to_string())
            })?;
        let access_token = get_optional_env("SAMOVAR_ACCESS_TOKEN").map(SecretString::from);
        let auto_save = get_env_or_default("SAMOVAR_AUTOSAVE", "true")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SAMOVAR_AUTOSAVE".to_string(), e.to_string())
            })?;
        let quiet_ms = get_env_or_default("SAMOVAR_AUTOSAVE_QUIET_MS", "2000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SAMOVAR_AUTOSAVE_QUIET_MS".to_string(), e.to_string())
            })?;
        let form_cache_path = PathBuf::from(get_env_or_default(
            "SAMOVAR_FORM_CACHE_PATH",
            ".samovar/checkout-form.json",
        ));

        Ok(Self {
            api_base_url,
            access_token,
            auto_save,
            quiet_period: Duration::from_millis(quiet_ms),
            form_cache_path,
        })
    }

    /// Sync controller options derived from this configuration.
    #[must_use]
    pub const fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            auto_save: self.auto_save,
            quiet_period: self.quiet_period,
        }
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
    fn test_sync_options_mapping() {
        let config = CheckoutConfig {
            api_base_url: "https://api.samovar.example".parse().unwrap(),
            access_token: None,
            auto_save: false,
            quiet_period: Duration::from_millis(500),
            form_cache_path: PathBuf::from(".samovar/checkout-form.json"),
        };

        let options = config.sync_options();
        assert!(!options.auto_save);
        assert_eq!(options.quiet_period, Duration::from_millis(500));
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = CheckoutConfig {
            api_base_url: "https://api.samovar.example".parse().unwrap(),
            access_token: Some(SecretString::from("super-secret-token")),
            auto_save: true,
            quiet_period: Duration::from_millis(2000),
            form_cache_path: PathBuf::from(".samovar/checkout-form.json"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("api.samovar.example"));
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("SAMOVAR_API_BASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: SAMOVAR_API_BASE_URL"
        );
    }
}
