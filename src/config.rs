//! Configuration system for the Autholas client.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. Environment variables (highest priority)
//! 2. `config.toml` file
//! 3. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `AUTHOLAS_ENDPOINT` - Authentication endpoint URL
//! - `AUTHOLAS_API_KEY` - Developer API key sent with every login
//! - `AUTHOLAS_TIMEOUT_SECS` - Request timeout in seconds
//! - `AUTHOLAS_IPV4_ONLY` - Resolve the endpoint over IPv4 only
//! - `AUTHOLAS_TLS_VERIFY_PEER` - Verify the server certificate chain
//! - `AUTHOLAS_TLS_VERIFY_HOST` - Verify the certificate host name
//! - `AUTHOLAS_DEVICE_NAME` - Device name reported to the server
//! - `AUTHOLAS_LOGGING_ENABLED` - Install the tracing subscriber
//! - `AUTHOLAS_LOG_LEVEL` - Log level (trace, debug, info, warn, error)

use config::Config;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

use crate::errors::{ClientError, ClientResult};

/// Default authentication endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://autholas.nicholasdevs.xyz/api/auth";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Global configuration singleton.
static CONFIG: OnceLock<AutholasConfig> = OnceLock::new();

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AutholasConfig {
    /// Endpoint and credentials
    pub api: ApiConfig,
    /// Certificate verification
    pub tls: TlsConfig,
    /// Client identity defaults
    pub client: ClientConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Authentication endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Full URL of the authentication endpoint
    pub endpoint: String,
    /// Developer API key. Never logged.
    pub api_key: Secret<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Only connect to IPv4 addresses of the endpoint
    pub ipv4_only: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: Secret::new(String::new()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ipv4_only: true,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// TLS verification toggles. Both default to strict verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Verify the certificate chain
    pub verify_peer: bool,
    /// Verify that the certificate matches the host name
    pub verify_host: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            verify_peer: true,
            verify_host: true,
        }
    }
}

/// Client identity defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Optional human-readable device name sent with logins
    pub device_name: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl AutholasConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. `config.toml` file (optional)
    /// 3. Environment variables
    ///
    /// The result is not validated; call [`AutholasConfig::validate`] or use
    /// [`get_config`].
    pub fn load() -> ClientResult<Self> {
        let builder = Config::builder()
            // Start with defaults
            .set_default("api.endpoint", DEFAULT_ENDPOINT)
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_default("api.api_key", "")
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_default("api.timeout_secs", DEFAULT_TIMEOUT_SECS as i64)
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_default("api.ipv4_only", true)
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_default("tls.verify_peer", true)
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_default("tls.verify_host", true)
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_default("client.device_name", "")
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_default("logging.enabled", false)
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_default("logging.level", "info")
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            // Load from config.toml (optional)
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables
            .set_override_option("api.endpoint", env::var("AUTHOLAS_ENDPOINT").ok())
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_override_option("api.api_key", env::var("AUTHOLAS_API_KEY").ok())
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_override_option(
                "api.timeout_secs",
                env::var("AUTHOLAS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_override_option("api.ipv4_only", env_bool("AUTHOLAS_IPV4_ONLY"))
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_override_option("tls.verify_peer", env_bool("AUTHOLAS_TLS_VERIFY_PEER"))
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_override_option("tls.verify_host", env_bool("AUTHOLAS_TLS_VERIFY_HOST"))
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_override_option("client.device_name", env::var("AUTHOLAS_DEVICE_NAME").ok())
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_override_option("logging.enabled", env_bool("AUTHOLAS_LOGGING_ENABLED"))
            .map_err(|e| ClientError::ConfigError(e.to_string()))?
            .set_override_option("logging.level", env::var("AUTHOLAS_LOG_LEVEL").ok())
            .map_err(|e| ClientError::ConfigError(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| ClientError::ConfigError(format!("failed to build config: {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| ClientError::ConfigError(format!("failed to deserialize config: {e}")))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.api.endpoint.starts_with("http://") || self.api.endpoint.starts_with("https://"))
        {
            return Err(ClientError::ConfigError(format!(
                "api.endpoint must be an http(s) URL, got '{}'",
                self.api.endpoint
            )));
        }

        if self.api.api_key.expose_secret().trim().is_empty() {
            return Err(ClientError::ConfigError(
                "api.api_key cannot be empty (set AUTHOLAS_API_KEY)".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::ConfigError(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ClientError::ConfigError(format!(
                    "logging.level must be one of: trace, debug, info, warn, error. Got '{other}'"
                )));
            }
        }

        Ok(())
    }
}

fn env_bool(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| v.parse::<bool>().ok())
}

/// Get the global configuration.
///
/// This loads the configuration on first access and caches it.
/// Returns an error if configuration loading or validation fails.
pub fn get_config() -> ClientResult<&'static AutholasConfig> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }

    let config = AutholasConfig::load()?;
    config.validate()?;

    // Another thread may have won the race; either value is equivalent.
    let _ = CONFIG.set(config);

    CONFIG
        .get()
        .ok_or_else(|| ClientError::ConfigError("configuration was not initialized".to_string()))
}

/// Initialize configuration explicitly.
///
/// Call this early in your application to catch configuration errors.
pub fn init_config() -> ClientResult<&'static AutholasConfig> {
    get_config()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AutholasConfig {
        AutholasConfig {
            api: ApiConfig {
                api_key: Secret::new("dev-key".to_string()),
                ..ApiConfig::default()
            },
            ..AutholasConfig::default()
        }
    }

    #[test]
    fn defaults_are_strict() {
        let config = AutholasConfig::default();
        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert!(config.api.ipv4_only);
        assert!(config.tls.verify_peer);
        assert!(config.tls.verify_host);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_api_key() {
        let err = AutholasConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn validate_rejects_bad_endpoint() {
        let mut config = valid_config();
        config.api.endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = valid_config();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_log_level() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let debug = format!("{:?}", valid_config());
        assert!(!debug.contains("dev-key"));
    }
}
