//! Shared configuration for Ufanet tools.
//!
//! TOML profiles, password resolution (env + plaintext), and translation
//! to `ufanet_core::IntegrationConfig`. The CLI adds flag-aware wrappers
//! on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ufanet_core::{IntegrationConfig, TlsVerification};

/// Environment variable consulted for the password when a profile names none.
pub const PASSWORD_ENV: &str = "UFANET_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() })
    }

    /// Comma-separated profile names, sorted.
    pub fn profile_names(&self) -> String {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_refresh_interval() -> u64 {
    600
}

/// A named account profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Site root (e.g., "https://dom.ufanet.ru").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Contract number used as the login name.
    pub contract: String,

    /// Plaintext password. Prefer `password_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable name containing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Override refresh interval (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<u64>,
}

impl Profile {
    pub fn new(contract: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            contract: contract.into(),
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            refresh_interval: None,
        }
    }
}

fn default_base_url() -> String {
    ufanet_core::DEFAULT_BASE_URL.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("ru", "ufanet", "ufanet").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ufanet");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path`, layered over defaults and under
/// `UFANET_`-prefixed env vars (`UFANET_DEFAULTS__TIMEOUT=10`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("UFANET_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the profile password: `password_env` → `UFANET_PASSWORD` → plaintext.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_password_with(profile, profile_name, |name| std::env::var(name).ok())
}

fn resolve_password_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Some(val) = env(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Global env var
    if let Some(val) = env(PASSWORD_ENV) {
        return Ok(SecretString::from(val));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build an `IntegrationConfig` from a profile without CLI flag overrides.
pub fn profile_to_integration_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<IntegrationConfig, ConfigError> {
    let password = resolve_password(profile, profile_name)?;
    build_integration_config(profile, password, defaults)
}

/// Build an `IntegrationConfig` from a profile and an already-resolved password.
pub fn build_integration_config(
    profile: &Profile,
    password: SecretString,
    defaults: &Defaults,
) -> Result<IntegrationConfig, ConfigError> {
    let base_url: url::Url = profile
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", profile.base_url),
        })?;

    if profile.contract.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "contract".into(),
            reason: "must not be empty".into(),
        });
    }

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    let refresh =
        Duration::from_secs(profile.refresh_interval.unwrap_or(defaults.refresh_interval));

    let mut config = IntegrationConfig::new(profile.contract.clone(), password)
        .with_base_url(base_url)
        .with_timeout(timeout)
        .with_refresh_interval(refresh);
    config.tls = tls;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn loads_profiles_over_defaults() {
        let file = write_config(
            r#"
default_profile = "home"

[defaults]
timeout = 15

[profiles.home]
contract = "user1"
password = "pw"
refresh_interval = 120
"#,
        );

        let cfg = load_config_from(file.path()).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("home"));
        assert_eq!(cfg.defaults.timeout, 15);
        assert_eq!(cfg.defaults.refresh_interval, 600);

        let home = cfg.profile("home").unwrap();
        assert_eq!(home.base_url, "https://dom.ufanet.ru");
        assert_eq!(home.refresh_interval, Some(120));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.profiles.is_empty());
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn unknown_profile_is_reported() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.profile("cottage"),
            Err(ConfigError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn save_then_load_keeps_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        let mut profile = Profile::new("user1");
        profile.password_env = Some("MY_UFANET_PW".into());
        cfg.profiles.insert("default".into(), profile);
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let profile = loaded.profile("default").unwrap();
        assert_eq!(profile.contract, "user1");
        assert_eq!(profile.password_env.as_deref(), Some("MY_UFANET_PW"));
        assert_eq!(profile.password, None);
    }

    #[test]
    fn password_resolution_order() {
        let mut profile = Profile::new("user1");
        profile.password = Some("plain".into());
        profile.password_env = Some("HOME_PW".into());

        let from_named = resolve_password_with(&profile, "default", |name| {
            (name == "HOME_PW").then(|| "named".to_owned())
        })
        .unwrap();
        assert_eq!(from_named.expose_secret(), "named");

        let from_global = resolve_password_with(&profile, "default", |name| {
            (name == PASSWORD_ENV).then(|| "global".to_owned())
        })
        .unwrap();
        assert_eq!(from_global.expose_secret(), "global");

        let plain = resolve_password_with(&profile, "default", |_| None).unwrap();
        assert_eq!(plain.expose_secret(), "plain");
    }

    #[test]
    fn missing_password_is_an_error() {
        let profile = Profile::new("user1");
        let result = resolve_password_with(&profile, "default", |_| None);
        assert!(matches!(result, Err(ConfigError::NoCredentials { .. })));
    }

    #[test]
    fn builds_integration_config() {
        let mut profile = Profile::new("user1");
        profile.insecure = Some(true);
        profile.timeout = Some(10);

        let config = build_integration_config(
            &profile,
            SecretString::from("pw".to_owned()),
            &Defaults::default(),
        )
        .unwrap();

        assert_eq!(config.credentials.username, "user1");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.refresh_interval, Duration::from_secs(600));
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut profile = Profile::new("user1");
        profile.base_url = "not a url".into();

        let result = build_integration_config(
            &profile,
            SecretString::from("pw".to_owned()),
            &Defaults::default(),
        );
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }
}
