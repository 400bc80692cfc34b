//! Autholas - license authentication client
//!
//! Logs a user in against an Autholas endpoint with a username, password and
//! device hardware id, and keeps the issued session token in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use autholas::client::AuthSession;
//!
//! let config = autholas::config::init_config()?;
//! autholas::logging::init_logging(&config.logging);
//!
//! let mut auth = AuthSession::from_config(config);
//! auth.set_hardware_id(autholas::hardware::get_hardware_id());
//!
//! let result = auth.login("alice", "correct horse").await;
//! if !result.success {
//!     eprintln!("{} ({})", result.describe(), result.error_code);
//! }
//! ```
//!
//! Configuration is read from `config.toml` and `AUTHOLAS_*` environment
//! variables; see [`config`].

// Core modules
pub mod config;
pub mod errors;
pub mod hardware;
pub mod logging;

// Client modules
pub mod client {
    pub mod codes;
    pub mod payload;
    pub mod responses;
    pub mod session;
    pub mod transport;

    pub use codes::ErrorCode;
    pub use payload::{AuthPayload, ClientIdentity, Credentials};
    pub use responses::{parse_response, AuthResult};
    pub use session::{AuthSession, Session};
    pub use transport::{HttpTransport, PostRequest, Transport};
}
