// ufanet-api: Async Rust client for the Ufanet doorphone web session API

pub mod auth;
pub mod client;
pub mod doorphones;
pub mod error;
pub mod login;
pub mod models;
pub mod transport;

pub use auth::Credentials;
pub use client::{SessionClient, SessionState};
pub use error::Error;
pub use models::{Doorphone, DoorphoneId, UNKNOWN_DOORPHONE_NAME};
pub use transport::{TlsMode, TransportConfig};

use url::Url;

/// Public Ufanet personal-account host.
pub const DEFAULT_BASE_URL: &str = "https://dom.ufanet.ru";

/// Parsed [`DEFAULT_BASE_URL`].
pub fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}
