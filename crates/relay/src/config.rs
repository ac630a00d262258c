//! Relay configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `RELAY_HOST` - Bind address (default: 127.0.0.1)
//! - `RELAY_PORT` - Listen port (default: 8787)
//! - `RELAY_UPSTREAM` - Upstream shape: `private` or `public` (default: private)
//! - `RELAY_PRIVATE_API_URL` - Private detail API endpoint
//! - `RELAY_PUBLIC_API_URL` - Public lookup API endpoint
//! - `RELAY_UPSTREAM_TIMEOUT_MS` - Outbound request timeout (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PRIVATE_API_URL: &str = "https://api.appsearch.apple.com/v1/app/detail";
const DEFAULT_PUBLIC_API_URL: &str = "https://itunes.apple.com/lookup";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which upstream catalog API the relay forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMode {
    /// Undocumented detail API; requires spoofed storefront client headers
    /// and answers with the rich subscription-group payload, passed through
    /// unmodified.
    Private,
    /// Public lookup API; no special headers, payload reshaped into the
    /// normalized relay schema.
    Public,
}

impl UpstreamMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            other => Err(ConfigError::InvalidEnvVar(
                "RELAY_UPSTREAM".to_string(),
                format!("expected 'private' or 'public', got '{other}'"),
            )),
        }
    }
}

/// Relay application configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Which upstream shape is active.
    pub upstream_mode: UpstreamMode,
    /// Private detail API endpoint.
    pub private_api_url: String,
    /// Public lookup API endpoint.
    pub public_api_url: String,
    /// Timeout for the single outbound call per request.
    pub upstream_timeout: Duration,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("RELAY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("RELAY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("RELAY_PORT", "8787")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("RELAY_PORT".to_string(), e.to_string()))?;
        let upstream_mode = UpstreamMode::parse(&get_env_or_default("RELAY_UPSTREAM", "private"))?;
        let timeout_ms = get_env_or_default("RELAY_UPSTREAM_TIMEOUT_MS", "10000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("RELAY_UPSTREAM_TIMEOUT_MS".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            upstream_mode,
            private_api_url: get_env_or_default("RELAY_PRIVATE_API_URL", DEFAULT_PRIVATE_API_URL),
            public_api_url: get_env_or_default("RELAY_PUBLIC_API_URL", DEFAULT_PUBLIC_API_URL),
            upstream_timeout: Duration::from_millis(timeout_ms),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8787,
            upstream_mode: UpstreamMode::Private,
            private_api_url: DEFAULT_PRIVATE_API_URL.to_string(),
            public_api_url: DEFAULT_PUBLIC_API_URL.to_string(),
            upstream_timeout: Duration::from_millis(10_000),
            sentry_dsn: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

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
    fn test_upstream_mode_parse() {
        assert_eq!(UpstreamMode::parse("private").unwrap(), UpstreamMode::Private);
        assert_eq!(UpstreamMode::parse("PUBLIC").unwrap(), UpstreamMode::Public);
        assert!(UpstreamMode::parse("itunes").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8787");
        assert_eq!(config.upstream_mode, UpstreamMode::Private);
        assert_eq!(config.upstream_timeout, Duration::from_millis(10_000));
    }
}
