//! Crate-level error type.
//!
//! These errors cover the plumbing around an authentication attempt
//! (configuration and transport). A rejected login is not an
//! error: it comes back as a failed [`AuthResult`](crate::client::responses::AuthResult).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// DNS, connect, TLS, timeout or body-read failure.
    #[error("network error: {0}")]
    Network(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            ClientError::Network(format!("failed to connect to server: {err}"))
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = ClientError::ConfigError("api.api_key cannot be empty".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: api.api_key cannot be empty"
        );

        let err = ClientError::Network("connection refused".to_string());
        assert!(err.to_string().starts_with("network error"));
    }
}
