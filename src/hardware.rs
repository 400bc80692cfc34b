//! Device fingerprint used as the login hardware id.
//!
//! Platform sources collect stable identifiers (machine id, board serial,
//! CPU id) which are hashed together with SHA-256. The raw identifiers
//! never leave the machine.

use sha2::{Digest, Sha256};
use std::env;
use std::error::Error;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

/// Environment variable that overrides the detected hardware id.
pub const HWID_ENV: &str = "AUTHOLAS_HWID";

type IdSource = fn() -> Result<String, Box<dyn Error>>;

/// Returns a stable identifier for the current machine.
///
/// `AUTHOLAS_HWID` takes precedence when set. Otherwise the platform sources
/// are hashed; if none of them yield a value the host name is hashed instead,
/// so the result is never empty.
pub fn get_hardware_id() -> String {
    if let Ok(id) = env::var(HWID_ENV) {
        let id = id.trim();
        if !id.is_empty() {
            return id.to_string();
        }
    }

    fingerprint(&collect(PLATFORM_SOURCES))
}

/// Hash identifier components into a hex-encoded fingerprint.
pub fn fingerprint(components: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"autholas_hwid_v1");

    if components.is_empty() {
        hasher.update(host_name().as_bytes());
    } else {
        for component in components {
            hasher.update(component.as_bytes());
            hasher.update([0u8]);
        }
    }

    hex::encode(hasher.finalize())
}

fn collect(sources: &[IdSource]) -> Vec<String> {
    sources
        .iter()
        .filter_map(|source| match source() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "hardware id source failed");
                None
            }
        })
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && !value.ends_with("_unknown"))
        .collect()
}

#[cfg(target_os = "linux")]
const PLATFORM_SOURCES: &[IdSource] = &[linux::get_machine_id, linux::get_motherboard_id];

#[cfg(target_os = "macos")]
const PLATFORM_SOURCES: &[IdSource] = &[macos::get_motherboard_id, macos::get_cpu_id];

#[cfg(target_os = "windows")]
const PLATFORM_SOURCES: &[IdSource] = &[windows::get_motherboard_id, windows::get_cpu_id];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const PLATFORM_SOURCES: &[IdSource] = &[];

fn host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "unknown-host".to_string())
}
