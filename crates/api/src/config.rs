//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MOTOSHOP_API_URL` - Base URL of the backend API (default: `http://localhost:5000/api`)
//! - `MOTOSHOP_API_TIMEOUT_SECS` - Request timeout in seconds (default: transport default)
//! - `MOTOSHOP_STORAGE_PATH` - JSON file backing the token and favorites (default: in-memory)
//! - `MOTOSHOP_API_TOKEN` - Bearer token to start with
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default backend location.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API client configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Option<Duration>,
    /// File backing persistent client storage
    pub storage_path: Option<PathBuf>,
    /// Initial bearer token
    pub token: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("storage_path", &self.storage_path)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: None,
            storage_path: None,
            token: None,
            sentry_dsn: None,
        }
    }
}

impl ApiConfig {
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

    /// Build a configuration against an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match non_empty(get("MOTOSHOP_API_URL")) {
            Some(raw) => parse_base_url(&raw)?,
            None => default_base_url(),
        };

        let timeout = non_empty(get("MOTOSHOP_API_TIMEOUT_SECS"))
            .map(|raw| parse_timeout(&raw))
            .transpose()?;

        Ok(Self {
            base_url,
            timeout,
            storage_path: non_empty(get("MOTOSHOP_STORAGE_PATH")).map(PathBuf::from),
            token: non_empty(get("MOTOSHOP_API_TOKEN")).map(SecretString::from),
            sentry_dsn: non_empty(get("SENTRY_DSN")),
        })
    }

    /// Configuration pointing at `base_url` with every other setting default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an http(s) URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Absolute URL for an endpoint path such as `/productos`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("Invalid default API URL")
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("MOTOSHOP_API_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "MOTOSHOP_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw.trim().parse::<u64>().map_err(|e| {
        ConfigError::InvalidEnvVar("MOTOSHOP_API_TIMEOUT_SECS".to_string(), e.to_string())
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "MOTOSHOP_API_TIMEOUT_SECS".to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
