//! Error codes reported by the Autholas authentication endpoint.
//!
//! An [`AuthResult`](crate::client::responses::AuthResult) always carries the
//! server's code verbatim as a string. [`ErrorCode`] is the typed view of that
//! string, used for presentation and branching; unrecognized codes map to
//! [`ErrorCode::Unknown`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // === Server Codes ===
    /// Developer API key was rejected
    InvalidApiKey,
    /// Username or password is wrong
    InvalidCredentials,
    /// User account is banned
    UserBanned,
    /// User subscription has lapsed
    SubscriptionExpired,
    /// This device is banned
    HwidBanned,
    /// Account already has the maximum number of devices
    MaxDevicesReached,
    /// Device is registered to a different user
    HwidAlreadyUsed,
    /// Too many requests
    RateLimitExceeded,
    /// Developer account is suspended
    DeveloperSuspended,

    // === Local Codes ===
    /// Server returned an empty body
    EmptyResponse,
    /// Body was not valid JSON
    InvalidJson,
    /// Body was JSON of an unexpected shape
    JsonParseError,
    /// Login attempted without a hardware id
    PreconditionFailed,
    /// The request never completed (DNS, connect, TLS, timeout)
    NetworkError,

    /// Any code this client does not know about
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    /// Map a raw wire code to its typed form.
    pub fn from_code(code: &str) -> Self {
        match code {
            "INVALID_API_KEY" => ErrorCode::InvalidApiKey,
            "INVALID_CREDENTIALS" => ErrorCode::InvalidCredentials,
            "USER_BANNED" => ErrorCode::UserBanned,
            "SUBSCRIPTION_EXPIRED" => ErrorCode::SubscriptionExpired,
            "HWID_BANNED" => ErrorCode::HwidBanned,
            "MAX_DEVICES_REACHED" => ErrorCode::MaxDevicesReached,
            "HWID_ALREADY_USED" => ErrorCode::HwidAlreadyUsed,
            "RATE_LIMIT_EXCEEDED" => ErrorCode::RateLimitExceeded,
            "DEVELOPER_SUSPENDED" => ErrorCode::DeveloperSuspended,
            "EMPTY_RESPONSE" => ErrorCode::EmptyResponse,
            "INVALID_JSON" => ErrorCode::InvalidJson,
            "JSON_PARSE_ERROR" => ErrorCode::JsonParseError,
            "PRECONDITION_FAILED" => ErrorCode::PreconditionFailed,
            "NETWORK_ERROR" => ErrorCode::NetworkError,
            _ => ErrorCode::Unknown,
        }
    }

    /// The wire representation. `Unknown` has no wire form and yields `""`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidApiKey => "INVALID_API_KEY",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::UserBanned => "USER_BANNED",
            ErrorCode::SubscriptionExpired => "SUBSCRIPTION_EXPIRED",
            ErrorCode::HwidBanned => "HWID_BANNED",
            ErrorCode::MaxDevicesReached => "MAX_DEVICES_REACHED",
            ErrorCode::HwidAlreadyUsed => "HWID_ALREADY_USED",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::DeveloperSuspended => "DEVELOPER_SUSPENDED",
            ErrorCode::EmptyResponse => "EMPTY_RESPONSE",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::JsonParseError => "JSON_PARSE_ERROR",
            ErrorCode::PreconditionFailed => "PRECONDITION_FAILED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::Unknown => "",
        }
    }

    /// Returns a default human-readable message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidApiKey => {
                "Invalid API key. Please check your developer credentials."
            }
            ErrorCode::InvalidCredentials => "Invalid username or password.",
            ErrorCode::UserBanned => "Your account has been banned.",
            ErrorCode::SubscriptionExpired => "Your subscription has expired.",
            ErrorCode::HwidBanned => "Your device has been banned.",
            ErrorCode::MaxDevicesReached => "Maximum devices limit reached.",
            ErrorCode::HwidAlreadyUsed => "This device is already registered to another user.",
            ErrorCode::RateLimitExceeded => "API rate limit exceeded. Try again later.",
            ErrorCode::DeveloperSuspended => "Developer account has been suspended.",
            ErrorCode::EmptyResponse => "Empty response from server",
            ErrorCode::InvalidJson => "Invalid JSON response",
            ErrorCode::JsonParseError => "JSON parsing error",
            ErrorCode::PreconditionFailed => "Hardware ID is not set",
            ErrorCode::NetworkError => "Failed to connect to server",
            ErrorCode::Unknown => "Authentication failed",
        }
    }

    /// Returns true for codes produced by this client rather than the server.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ErrorCode::EmptyResponse
                | ErrorCode::InvalidJson
                | ErrorCode::JsonParseError
                | ErrorCode::PreconditionFailed
                | ErrorCode::NetworkError
        )
    }

    /// Returns true if trying again later might succeed without any change
    /// on the user's side.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::RateLimitExceeded | ErrorCode::NetworkError | ErrorCode::EmptyResponse
        )
    }

    /// Returns true if the account or device needs attention before a login
    /// can succeed.
    pub fn requires_user_action(&self) -> bool {
        matches!(
            self,
            ErrorCode::InvalidCredentials
                | ErrorCode::UserBanned
                | ErrorCode::SubscriptionExpired
                | ErrorCode::HwidBanned
                | ErrorCode::MaxDevicesReached
                | ErrorCode::HwidAlreadyUsed
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default_message())
    }
}
