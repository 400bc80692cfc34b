//! Login flow and in-memory session state.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tracing::{info, warn};

use crate::client::codes::ErrorCode;
use crate::client::payload::{AuthPayload, ClientIdentity, Credentials};
use crate::client::responses::{parse_response, AuthResult};
use crate::client::transport::{HttpTransport, PostRequest, Transport, JSON_CONTENT_TYPE};
use crate::config::{AutholasConfig, TlsConfig, DEFAULT_ENDPOINT};
use crate::logging::redact_token;

/// Token and expiry issued by the last successful login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    session_token: String,
    expires_at: String,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.session_token
    }

    pub fn expires_at(&self) -> &str {
        &self.expires_at
    }

    /// Both token and expiry are set. Does not look at the clock.
    pub fn is_present(&self) -> bool {
        !self.session_token.is_empty() && !self.expires_at.is_empty()
    }

    /// True if the session is missing, its expiry cannot be parsed as
    /// RFC 3339, or the expiry is not in the future.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_present() {
            return true;
        }
        match DateTime::parse_from_rfc3339(&self.expires_at) {
            Ok(expiry) => now >= expiry.with_timezone(&Utc),
            Err(_) => true,
        }
    }

    fn clear(&mut self) {
        self.session_token.clear();
        self.expires_at.clear();
    }
}

/// Authenticates against the Autholas endpoint and holds the resulting
/// session for the life of the process.
///
/// ```rust,ignore
/// let config = autholas::config::init_config()?;
/// let mut auth = AuthSession::from_config(config);
/// auth.set_hardware_id(autholas::hardware::get_hardware_id());
///
/// let result = auth.login("alice", "correct horse").await;
/// if result.success {
///     println!("token: {}", auth.session_token());
/// } else {
///     println!("{}", result.describe());
/// }
/// ```
///
/// `login` takes `&mut self`, so a session never has two attempts in flight.
#[derive(Debug)]
pub struct AuthSession<T = HttpTransport> {
    transport: T,
    endpoint: String,
    api_key: Secret<String>,
    tls: TlsConfig,
    identity: ClientIdentity,
    session: Session,
}

impl AuthSession<HttpTransport> {
    /// Session against the default endpoint with strict TLS.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(
            HttpTransport::default(),
            DEFAULT_ENDPOINT,
            Secret::new(api_key.into()),
        )
    }

    /// Session using endpoint, key, TLS, timeout and device name from config.
    pub fn from_config(config: &AutholasConfig) -> Self {
        let mut auth = Self::with_transport(
            HttpTransport::from_config(&config.api),
            config.api.endpoint.clone(),
            config.api.api_key.clone(),
        )
        .with_tls(config.tls);
        auth.set_device_name(config.client.device_name.clone());
        auth
    }
}

impl<T: Transport> AuthSession<T> {
    pub fn with_transport(transport: T, endpoint: impl Into<String>, api_key: Secret<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            api_key,
            tls: TlsConfig::default(),
            identity: ClientIdentity::default(),
            session: Session::default(),
        }
    }

    /// Override certificate verification. Weakening is logged on every request.
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_hardware_id(&mut self, hardware_id: impl Into<String>) {
        self.identity.hardware_id = hardware_id.into();
    }

    pub fn hardware_id(&self) -> &str {
        &self.identity.hardware_id
    }

    /// Set the optional device name. An empty name clears it.
    pub fn set_device_name(&mut self, device_name: impl Into<String>) {
        self.identity.set_device_name(device_name);
    }

    pub fn device_name(&self) -> Option<&str> {
        self.identity.device_name.as_deref()
    }

    pub fn build_payload(&self, credentials: &Credentials) -> AuthPayload {
        AuthPayload::new(self.api_key.expose_secret(), &self.identity, credentials)
    }

    /// Perform one authentication attempt.
    ///
    /// On success the token and expiry replace the current session. Any
    /// failure leaves the current session as it was.
    pub async fn login(&mut self, username: &str, password: &str) -> AuthResult {
        self.login_with(&Credentials::new(username, password)).await
    }

    pub async fn login_with(&mut self, credentials: &Credentials) -> AuthResult {
        if !self.identity.has_hardware_id() {
            warn!("login refused: hardware id is not set");
            return AuthResult::local_failure(ErrorCode::PreconditionFailed);
        }

        let body = match self.build_payload(credentials).to_json() {
            Ok(body) => body,
            Err(e) => {
                return AuthResult::failure(
                    ErrorCode::JsonParseError,
                    format!("failed to encode request: {e}"),
                )
            }
        };

        let request = PostRequest {
            url: &self.endpoint,
            headers: &[JSON_CONTENT_TYPE],
            body,
            tls: self.tls,
        };

        let result = match self.transport.post(request).await {
            Ok(text) => parse_response(&text),
            Err(e) => {
                warn!(error = %e, "authentication request failed");
                AuthResult::failure(ErrorCode::NetworkError, e.to_string())
            }
        };

        self.record(&credentials.username, &result);
        result
    }

    fn record(&mut self, username: &str, result: &AuthResult) {
        if result.success {
            let token = result.session_token.clone().unwrap_or_default();
            let expires_at = result.expires_at.clone().unwrap_or_default();
            info!(
                username = %username,
                token = %redact_token(&token),
                expires_at = %expires_at,
                "authentication successful"
            );
            self.session = Session {
                session_token: token,
                expires_at,
            };
        } else {
            let code = result.code().unwrap_or(ErrorCode::Unknown);
            warn!(
                username = %username,
                error_code = %result.error_code,
                local = code.is_local(),
                retryable = code.is_retryable(),
                detail = %result.error,
                "{}",
                result.describe()
            );
        }
    }

    /// Token and expiry are both present. This does not check the clock;
    /// see [`AuthSession::is_session_expired`].
    pub fn is_session_valid(&self) -> bool {
        self.session.is_present()
    }

    /// True if there is no session or its RFC 3339 expiry has passed.
    pub fn is_session_expired(&self) -> bool {
        self.session.is_expired_at(Utc::now())
    }

    pub fn session_token(&self) -> &str {
        self.session.token()
    }

    pub fn session_expires_at(&self) -> &str {
        self.session.expires_at()
    }

    /// Forget the current session.
    pub fn logout(&mut self) {
        if self.session.is_present() {
            info!("session cleared");
        }
        self.session.clear();
    }
}
