//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CRYPTFIELD_API_URL` - Base URL of the REST API server
//!
//! ## Optional
//! - `CRYPTFIELD_API_TOKEN` - Bearer token sent with every request
//! - `CRYPTFIELD_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `CRYPTFIELD_APP_NAME` - Application name used in alert headers and event
//!   names (default: `jhCryptFieldDemoApp`)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Application name the server uses in its `X-<app>-alert` headers.
pub const DEFAULT_APP_NAME: &str = "jhCryptFieldDemoApp";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the API server, always ending in `/`
    api_url: Url,
    /// Bearer token for authenticated requests
    pub api_token: Option<SecretString>,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    /// Application name used for alert headers and event names
    pub app_name: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("app_name", &self.app_name)
            .finish()
    }
}

impl AppConfig {
    /// Build a configuration for the given API base URL with defaults for
    /// everything else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL cannot be parsed or
    /// cannot serve as a base for relative endpoints.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_base_url("CRYPTFIELD_API_URL", api_url)?,
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            app_name: DEFAULT_APP_NAME.to_string(),
        })
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.api_token = Some(token);
        self
    }

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

        let api_url = get_required_env("CRYPTFIELD_API_URL")?;
        let mut config = Self::new(&api_url)?;

        config.api_token = get_optional_env("CRYPTFIELD_API_TOKEN").map(SecretString::from);
        config.timeout = get_env_or_default(
            "CRYPTFIELD_HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            ConfigError::InvalidEnvVar("CRYPTFIELD_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        config.app_name = get_env_or_default("CRYPTFIELD_APP_NAME", DEFAULT_APP_NAME);

        Ok(config)
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Resolve an endpoint path (e.g. `api/customers`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn endpoint_for(&self, path: &str) -> Result<Url, url::ParseError> {
        self.api_url.join(path.trim_start_matches('/'))
    }
}

/// Parse a base URL, making sure relative joins append to its path.
fn parse_base_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn get_required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn get_optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_for_root_base() {
        let config = AppConfig::new("http://localhost:8080").expect("config");
        let url = config.endpoint_for("api/customer-addresses").expect("url");
        assert_eq!(url.as_str(), "http://localhost:8080/api/customer-addresses");
    }

    #[test]
    fn test_endpoint_for_base_with_context_path() {
        let config = AppConfig::new("https://example.com/services/crm").expect("config");
        let url = config.endpoint_for("/api/customers").expect("url");
        assert_eq!(url.as_str(), "https://example.com/services/crm/api/customers");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            AppConfig::new("not a url"),
            Err(ConfigError::InvalidEnvVar(..))
        ));
        assert!(matches!(
            AppConfig::new("mailto:someone@example.com"),
            Err(ConfigError::InvalidEnvVar(..))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = AppConfig::new("http://localhost:8080")
            .expect("config")
            .with_token(SecretString::from("super-secret-token".to_string()));
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::new("http://localhost:8080").expect("config");
        assert_eq!(config.app_name, DEFAULT_APP_NAME);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.api_token.is_none());
    }
}
