//! Tracing subscriber setup for applications embedding the client.
//!
//! The library itself only emits `tracing` events. Binaries call
//! [`init_logging`] once at startup to print them.

use std::str::FromStr;

use tracing::Level;

use crate::config::LoggingConfig;

/// Parse a configured level name, falling back to `INFO`.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

/// Install a global fmt subscriber at the configured level.
///
/// Returns `false` when logging is disabled or a global subscriber was
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    if !config.enabled {
        return false;
    }

    tracing_subscriber::fmt()
        .with_max_level(parse_level(&config.level))
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Shorten a session token for display. Tokens are never logged in full.
pub fn redact_token(token: &str) -> String {
    const VISIBLE: usize = 8;
    if token.chars().count() <= VISIBLE {
        return "*".repeat(token.chars().count());
    }
    let prefix: String = token.chars().take(VISIBLE).collect();
    format!("{prefix}...")
}
