//! Response handling for the authentication endpoint.
//!
//! [`parse_response`] is total: every input, including an empty body or
//! garbage, produces an [`AuthResult`]. Nothing here panics or returns `Err`.

use serde::Deserialize;
use serde_json::Value;

use crate::client::codes::ErrorCode;

/// Outcome of one login attempt.
///
/// `session_token` and `expires_at` are `Some` exactly when `success` is true.
/// `error_code` is the server's code verbatim (possibly empty or unknown to
/// this client); use [`AuthResult::code`] for the typed view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthResult {
    pub success: bool,
    /// Informational message from the server
    pub message: String,
    /// Machine-readable rejection reason
    pub error_code: String,
    /// Human-readable rejection detail
    pub error: String,
    pub session_token: Option<String>,
    /// Expiry timestamp, format chosen by the server
    pub expires_at: Option<String>,
}

impl AuthResult {
    /// A failure produced locally, with the code's default message as detail.
    pub fn local_failure(code: ErrorCode) -> Self {
        Self::failure(code, code.default_message())
    }

    /// A failure produced locally with a specific detail.
    pub fn failure(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: code.as_str().to_string(),
            error: error.into(),
            ..Self::default()
        }
    }

    /// Typed view of `error_code`. `None` on success.
    pub fn code(&self) -> Option<ErrorCode> {
        if self.success {
            None
        } else {
            Some(ErrorCode::from_code(&self.error_code))
        }
    }

    /// One-line description suitable for showing to a user.
    ///
    /// Recognized codes use their standard message; anything else falls back
    /// to the server's detail.
    pub fn describe(&self) -> String {
        match self.code() {
            None => "Authentication successful".to_string(),
            Some(ErrorCode::Unknown) if self.error.is_empty() => {
                ErrorCode::Unknown.default_message().to_string()
            }
            Some(ErrorCode::Unknown) => format!("Authentication failed: {}", self.error),
            Some(code) => code.default_message().to_string(),
        }
    }

    /// Follow-up advice for a failure: wait and retry, or fix the account
    /// or device first. `None` on success and for codes with no advice.
    pub fn hint(&self) -> Option<&'static str> {
        let code = self.code()?;
        if code.is_retryable() {
            Some("Please try again in a moment.")
        } else if code.requires_user_action() {
            Some("Check your account or device status before retrying.")
        } else {
            None
        }
    }
}

/// Server response for the auth endpoint. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServerAuthResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

impl From<ServerAuthResponse> for AuthResult {
    fn from(resp: ServerAuthResponse) -> Self {
        let success = resp.success.unwrap_or(false);
        let (session_token, expires_at) = if success {
            (
                Some(resp.session_token.unwrap_or_default()),
                Some(resp.expires_at.unwrap_or_default()),
            )
        } else {
            (None, None)
        };

        Self {
            success,
            message: resp.message.unwrap_or_default(),
            error_code: resp.error_code.unwrap_or_default(),
            error: resp.error.unwrap_or_default(),
            session_token,
            expires_at,
        }
    }
}

/// Interpret a raw response body.
///
/// - empty body: `EMPTY_RESPONSE`
/// - not JSON: `INVALID_JSON`
/// - JSON that is not an object, or has a field of the wrong type:
///   `JSON_PARSE_ERROR`
/// - otherwise the server's fields, with missing ones defaulted
pub fn parse_response(body: &str) -> AuthResult {
    if body.is_empty() {
        return AuthResult::local_failure(ErrorCode::EmptyResponse);
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "response body is not JSON");
            return AuthResult::local_failure(ErrorCode::InvalidJson);
        }
    };

    // Structs also deserialize from sequences; only objects are accepted.
    if !value.is_object() {
        tracing::debug!("response body is not a JSON object");
        return AuthResult::local_failure(ErrorCode::JsonParseError);
    }

    match ServerAuthResponse::deserialize(value) {
        Ok(resp) => resp.into(),
        Err(e) => {
            tracing::debug!(error = %e, "response body has an unexpected shape");
            AuthResult::local_failure(ErrorCode::JsonParseError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_empty_response() {
        let result = parse_response("");
        assert!(!result.success);
        assert_eq!(result.error_code, "EMPTY_RESPONSE");
        assert_eq!(result.error, "Empty response from server");
        assert!(result.session_token.is_none());
    }

    #[test]
    fn malformed_json_is_invalid_json() {
        for body in ["{", "not json", "{\"success\": tru}", "   ", "<html></html>", "{}}"] {
            let result = parse_response(body);
            assert!(!result.success, "body {body:?}");
            assert_eq!(result.error_code, "INVALID_JSON", "body {body:?}");
            assert_eq!(result.error, "Invalid JSON response");
        }
    }

    #[test]
    fn successful_login_copies_token_and_expiry() {
        let result = parse_response(
            r#"{"success":true,"session_token":"abc123","expires_at":"2025-01-01T00:00:00Z"}"#,
        );
        assert!(result.success);
        assert_eq!(result.session_token.as_deref(), Some("abc123"));
        assert_eq!(result.expires_at.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert_eq!(result.code(), None);
    }

    #[test]
    fn success_without_token_still_populates_fields() {
        let result = parse_response(r#"{"success":true,"message":"welcome"}"#);
        assert!(result.success);
        assert_eq!(result.message, "welcome");
        assert_eq!(result.session_token.as_deref(), Some(""));
        assert_eq!(result.expires_at.as_deref(), Some(""));
    }

    #[test]
    fn rejection_carries_server_code_verbatim() {
        let result = parse_response(
            r#"{"success":false,"error_code":"INVALID_CREDENTIALS","error":"bad password"}"#,
        );
        assert!(!result.success);
        assert_eq!(result.error_code, "INVALID_CREDENTIALS");
        assert_eq!(result.error, "bad password");
        assert_eq!(result.code(), Some(ErrorCode::InvalidCredentials));
        assert!(result.session_token.is_none());
        assert!(result.expires_at.is_none());
    }

    #[test]
    fn rejection_ignores_token_fields() {
        let result = parse_response(
            r#"{"success":false,"session_token":"leaked","expires_at":"2030-01-01T00:00:00Z"}"#,
        );
        assert!(result.session_token.is_none());
        assert!(result.expires_at.is_none());
    }

    #[test]
    fn empty_object_takes_defaults() {
        let result = parse_response("{}");
        assert!(!result.success);
        assert_eq!(result.error_code, "");
        assert_eq!(result.message, "");
        assert_eq!(result.error, "");
    }

    #[test]
    fn null_fields_take_defaults() {
        let result = parse_response(r#"{"success":null,"error_code":null,"message":null}"#);
        assert!(!result.success);
        assert_eq!(result.error_code, "");
        assert_eq!(result.message, "");
    }

    #[test]
    fn unknown_server_code_is_kept() {
        let result = parse_response(r#"{"success":false,"error_code":"ACCOUNT_LOCKED"}"#);
        assert_eq!(result.error_code, "ACCOUNT_LOCKED");
        assert_eq!(result.code(), Some(ErrorCode::Unknown));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        for body in [
            "[1,2,3]",
            "[]",
            "[true]",
            "42",
            "\"text\"",
            "null",
            r#"{"success":"yes"}"#,
            r#"{"success":true,"session_token":12345}"#,
            r#"{"error_code":["A"]}"#,
            r#"{"success":1}"#,
            r#"{"success":false,"error_code":42}"#,
        ] {
            let result = parse_response(body);
            assert!(!result.success, "body {body:?}");
            assert_eq!(result.error_code, "JSON_PARSE_ERROR", "body {body:?}");
            assert_eq!(result.error, "JSON parsing error");
        }
    }

    #[test]
    fn hint_follows_code_classification() {
        assert_eq!(parse_response(r#"{"success":true,"session_token":"t"}"#).hint(), None);

        let limited = parse_response(r#"{"success":false,"error_code":"RATE_LIMIT_EXCEEDED"}"#);
        assert_eq!(limited.hint(), Some("Please try again in a moment."));
        assert_eq!(parse_response("").hint(), Some("Please try again in a moment."));

        let banned = parse_response(r#"{"success":false,"error_code":"HWID_BANNED"}"#);
        assert_eq!(
            banned.hint(),
            Some("Check your account or device status before retrying.")
        );

        assert_eq!(AuthResult::local_failure(ErrorCode::InvalidApiKey).hint(), None);
        assert_eq!(parse_response("not json").hint(), None);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let result = parse_response(r#"{"success":true,"session_token":"t","expires_at":"e","user":{"id":7}}"#);
        assert!(result.success);
        assert_eq!(result.session_token.as_deref(), Some("t"));
    }

    #[test]
    fn describe_prefers_standard_messages() {
        let banned = parse_response(r#"{"success":false,"error_code":"USER_BANNED","error":"x"}"#);
        assert_eq!(banned.describe(), "Your account has been banned.");

        let other = parse_response(r#"{"success":false,"error":"try later"}"#);
        assert_eq!(other.describe(), "Authentication failed: try later");

        let ok = parse_response(r#"{"success":true}"#);
        assert_eq!(ok.describe(), "Authentication successful");
    }
}
