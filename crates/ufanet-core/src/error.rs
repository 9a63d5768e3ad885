// ── Core error types ──
//
// User-facing errors from ufanet-core. Consumers never match on HTTP
// plumbing directly; the `From<ufanet_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

use ufanet_api::DoorphoneId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Authentication errors ────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired and re-authentication did not help")]
    SessionExpired,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Doorphone not found: {id}")]
    DoorphoneNotFound { id: DoorphoneId },

    #[error("Malformed response from Ufanet: {message}")]
    MalformedResponse { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if the failure is about credentials or the session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. } | Self::SessionExpired
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ufanet_api::Error> for CoreError {
    fn from(err: ufanet_api::Error) -> Self {
        match err {
            ufanet_api::Error::Authentication { status } => CoreError::AuthenticationFailed {
                message: format!("login rejected (HTTP {status})"),
            },
            ufanet_api::Error::TransientAuth { .. } => CoreError::SessionExpired,
            ufanet_api::Error::Remote { endpoint, status } => CoreError::Api {
                message: format!("unexpected response from {endpoint}"),
                status: Some(status),
            },
            ufanet_api::Error::MalformedResponse { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
            ufanet_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ufanet_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ufanet_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_rejection_maps_to_auth_failure() {
        let err = CoreError::from(ufanet_api::Error::Authentication { status: 403 });
        assert!(err.is_auth_failure());
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn bounded_retry_maps_to_session_expired() {
        let err = CoreError::from(ufanet_api::Error::TransientAuth { retries: 1 });
        assert!(matches!(err, CoreError::SessionExpired));
    }

    #[test]
    fn remote_status_is_preserved() {
        let err = CoreError::from(ufanet_api::Error::Remote {
            endpoint: "/api/v0/skud/shared".into(),
            status: 502,
        });
        assert!(matches!(err, CoreError::Api { status: Some(502), .. }));
    }
}
