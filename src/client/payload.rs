//! Request types for the authentication endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Username and password for one login attempt. Never persisted.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Identity of the device performing the login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientIdentity {
    /// Stable per-device identifier. Must be non-empty before login.
    pub hardware_id: String,
    /// Optional human-readable device name.
    pub device_name: Option<String>,
}

impl ClientIdentity {
    pub fn new(hardware_id: impl Into<String>) -> Self {
        Self {
            hardware_id: hardware_id.into(),
            device_name: None,
        }
    }

    pub fn with_device_name(mut self, device_name: impl Into<String>) -> Self {
        self.set_device_name(device_name);
        self
    }

    /// Set the device name. An empty name clears it.
    pub fn set_device_name(&mut self, device_name: impl Into<String>) {
        let name = device_name.into();
        self.device_name = if name.is_empty() { None } else { Some(name) };
    }

    pub fn has_hardware_id(&self) -> bool {
        !self.hardware_id.trim().is_empty()
    }
}

/// Body of `POST /api/auth`.
///
/// ```json
/// {"api_key": "...", "username": "...", "password": "...", "hwid": "...", "device_name": "..."}
/// ```
///
/// `device_name` is omitted entirely when not set.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthPayload {
    pub api_key: String,
    pub username: String,
    pub password: String,
    pub hwid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

impl AuthPayload {
    pub fn new(api_key: &str, identity: &ClientIdentity, credentials: &Credentials) -> Self {
        Self {
            api_key: api_key.to_string(),
            username: credentials.username.clone(),
            password: credentials.password.clone(),
            hwid: identity.hardware_id.clone(),
            device_name: identity
                .device_name
                .as_ref()
                .filter(|name| !name.is_empty())
                .cloned(),
        }
    }

    /// Compact JSON encoding used as the request body.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Debug for AuthPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthPayload")
            .field("api_key", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("hwid", &self.hwid)
            .field("device_name", &self.device_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn identity() -> ClientIdentity {
        ClientIdentity::new("HWID-1234")
    }

    #[test]
    fn payload_carries_all_required_fields() {
        let creds = Credentials::new("alice", "s3cret");
        let payload = AuthPayload::new("key-1", &identity(), &creds);
        let value: Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(value["api_key"], "key-1");
        assert_eq!(value["username"], "alice");
        assert_eq!(value["password"], "s3cret");
        assert_eq!(value["hwid"], "HWID-1234");
    }

    #[test]
    fn device_name_key_is_omitted_when_unset() {
        let creds = Credentials::new("alice", "pw");
        let json = AuthPayload::new("k", &identity(), &creds).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("device_name").is_none());

        let named = identity().with_device_name("Work Laptop");
        let json = AuthPayload::new("k", &named, &creds).to_json().unwrap();
        let decoded: AuthPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.device_name.as_deref(), Some("Work Laptop"));
        assert_eq!(decoded.username, "alice");
        assert_eq!(decoded.password, "pw");
        assert_eq!(decoded.hwid, "HWID-1234");
    }

    #[test]
    fn empty_device_name_counts_as_unset() {
        let mut id = identity().with_device_name("Phone");
        id.set_device_name("");
        assert_eq!(id.device_name, None);

        let forced = ClientIdentity {
            hardware_id: "HWID".to_string(),
            device_name: Some(String::new()),
        };
        let payload = AuthPayload::new("k", &forced, &Credentials::new("u", "p"));
        assert!(!payload.to_json().unwrap().contains("device_name"));
    }

    #[test]
    fn usernames_are_not_validated_locally() {
        let creds = Credentials::new("  weird name\u{1F600} ", "");
        let payload = AuthPayload::new("k", &identity(), &creds);
        assert_eq!(payload.username, "  weird name\u{1F600} ");
        assert_eq!(payload.password, "");
    }

    #[test]
    fn debug_redacts_secrets() {
        let payload = AuthPayload::new("key-1", &identity(), &Credentials::new("bob", "hunter2"));
        let debug = format!("{:?}", payload);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("key-1"));
        assert!(debug.contains("bob"));

        let creds = format!("{:?}", Credentials::new("bob", "hunter2"));
        assert!(!creds.contains("hunter2"));
    }

    #[test]
    fn blank_hardware_id_is_missing() {
        assert!(!ClientIdentity::new("").has_hardware_id());
        assert!(!ClientIdentity::new("   ").has_hardware_id());
        assert!(identity().has_hardware_id());
    }
}
