use thiserror::Error;

/// Top-level error type for the `ufanet-api` crate.
///
/// Covers login rejection, session expiry that survived a re-login,
/// unexpected HTTP statuses, unparsable bodies, and the transport layer.
/// `ufanet-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The login endpoint answered with anything but HTTP 200.
    #[error("Authentication failed (HTTP {status})")]
    Authentication { status: u16 },

    /// The server kept answering 401 after a fresh login.
    #[error("Session rejected after {retries} re-authentication attempt(s)")]
    TransientAuth { retries: u32 },

    // ── Remote ──────────────────────────────────────────────────────
    /// Unexpected (non-200, non-401) status from an API endpoint.
    #[error("Unexpected response from {endpoint} (HTTP {status})")]
    Remote { endpoint: String, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON body could not be parsed into the expected shape.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, body: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// Returns `true` if the credentials or the session were rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::TransientAuth { .. })
    }

    /// Returns `true` if this is a transient error worth retrying later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::TransientAuth { .. } => true,
            Self::Remote { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status } | Self::Remote { status, .. } => Some(*status),
            Self::TransientAuth { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_classified() {
        assert!(Error::Authentication { status: 403 }.is_auth_failure());
        assert!(Error::TransientAuth { retries: 1 }.is_auth_failure());
        assert!(
            !Error::Remote {
                endpoint: "/api".into(),
                status: 500
            }
            .is_auth_failure()
        );
    }

    #[test]
    fn server_errors_are_transient() {
        let remote = |status| Error::Remote {
            endpoint: "/api/v0/skud/shared".into(),
            status,
        };
        assert!(remote(502).is_transient());
        assert!(!remote(404).is_transient());
        assert_eq!(remote(404).status(), Some(404));
        assert_eq!(Error::TransientAuth { retries: 1 }.status(), Some(401));
    }
}
