//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ufanet_config::ConfigError;
use ufanet_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(ufanet::connection_failed),
        help(
            "Check network access to the Ufanet site.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(ufanet::timeout),
        help("Increase the timeout with --timeout or retry later.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ufanet::auth_failed),
        help(
            "Verify the contract number and password.\n\
             Test them with: ufanet login"
        )
    )]
    AuthFailed { message: String },

    #[error("Session expired and logging in again did not help")]
    #[diagnostic(
        code(ufanet::session_expired),
        help("The service keeps rejecting fresh sessions. Retry later.")
    )]
    SessionExpired,

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(ufanet::no_credentials),
        help(
            "Configure credentials with: ufanet config init\n\
             Or set the UFANET_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(ufanet::not_found),
        help("Run: ufanet {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Door actions ─────────────────────────────────────────────────
    #[error("Doorphone '{name}' did not confirm opening")]
    #[diagnostic(
        code(ufanet::open_refused),
        help("The service answered without a positive result. Try again.")
    )]
    OpenRefused { name: String },

    #[error("Failed to open doorphone '{name}': {reason}")]
    #[diagnostic(code(ufanet::open_failed))]
    OpenFailed { name: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error{}: {message}", status_suffix(*.status))]
    #[diagnostic(code(ufanet::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("Unexpected response: {message}")]
    #[diagnostic(
        code(ufanet::malformed_response),
        help("Run with -vv to log the raw response.")
    )]
    MalformedResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ufanet::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ufanet::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ufanet config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No configuration found")]
    #[diagnostic(
        code(ufanet::no_config),
        help(
            "Create one with: ufanet config init\n\
             Expected at: {path}\n\
             Or pass --contract and --password."
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(ufanet::config))]
    Config { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::SessionExpired | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

fn status_suffix(status: Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout => CliError::Timeout,
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::SessionExpired => CliError::SessionExpired,
            CoreError::DoorphoneNotFound { id } => CliError::NotFound {
                resource_type: "doorphone".into(),
                identifier: id.to_string(),
                list_command: "doorphones list".into(),
            },
            CoreError::MalformedResponse { message } => CliError::MalformedResponse { message },
            CoreError::Api { message, status } => CliError::ApiError { message, status },
            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other @ (ConfigError::Serialization(_) | ConfigError::Figment(_)) => {
                CliError::Config {
                    message: other.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ufanet_core::DoorphoneId;

    use super::*;

    #[test]
    fn auth_errors_exit_with_auth_code() {
        let err = CliError::from(CoreError::AuthenticationFailed {
            message: "login rejected (HTTP 403)".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
        assert_eq!(CliError::from(CoreError::SessionExpired).exit_code(), exit_code::AUTH);
    }

    #[test]
    fn unknown_doorphone_points_at_list_command() {
        let err = CliError::from(CoreError::DoorphoneNotFound { id: DoorphoneId(99) });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "doorphone '99' not found");
    }

    #[test]
    fn transport_failures_have_distinct_codes() {
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        let err = CliError::from(CoreError::ConnectionFailed {
            url: "https://dom.ufanet.ru/".into(),
            reason: "refused".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn api_error_shows_status() {
        let err = CliError::from(CoreError::Api {
            message: "unexpected response from /api/v0/skud/shared".into(),
            status: Some(502),
        });
        assert_eq!(
            err.to_string(),
            "API error (HTTP 502): unexpected response from /api/v0/skud/shared"
        );
    }

    #[test]
    fn missing_password_is_an_auth_problem() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "home".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
