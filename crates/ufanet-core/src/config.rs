// ── Runtime integration configuration ──
//
// These types describe *how* to reach the Ufanet service for one
// account. They carry credential data and connection tuning, but never
// touch disk. The host constructs an `IntegrationConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use ufanet_api::transport::{TlsMode, TransportConfig};
use ufanet_api::{Credentials, default_base_url};

/// Default interval between doorphone list refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default for the public cloud host.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification.
    DangerAcceptInvalid,
}

/// Configuration for one configured account ("entry").
#[derive(Debug, Clone)]
pub struct IntegrationConfig {
    /// Site root (e.g., `https://dom.ufanet.ru`).
    pub base_url: Url,
    /// Contract number and password.
    pub credentials: Credentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// How often the doorphone list is refreshed. Zero disables the timer.
    pub refresh_interval: Duration,
}

impl IntegrationConfig {
    /// Config for the public host with default timings.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            base_url: default_base_url(),
            credentials: Credentials {
                username: username.into(),
                password,
            },
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Translate into the api-level transport settings.
    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            cookie_jar: None,
        }
        .with_cookie_jar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_public_host() {
        let config = IntegrationConfig::new("user1", SecretString::from("pw".to_owned()));
        assert_eq!(config.base_url.as_str(), "https://dom.ufanet.ru/");
        assert_eq!(config.refresh_interval, Duration::from_secs(600));
        assert_eq!(config.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn transport_mirrors_tls_and_timeout() {
        let mut config = IntegrationConfig::new("user1", SecretString::from("pw".to_owned()))
            .with_timeout(Duration::from_secs(12));
        config.tls = TlsVerification::DangerAcceptInvalid;

        let transport = config.transport();
        assert_eq!(transport.timeout, Duration::from_secs(12));
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert!(transport.cookie_jar.is_some());
    }
}
