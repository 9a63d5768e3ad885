//! CLI configuration: thin wrapper around `ufanet_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --contract, --password, etc.).

use secrecy::SecretString;

use ufanet_core::IntegrationConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ufanet_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the `IntegrationConfig` for this invocation.
///
/// Flags override the active profile. Without a profile, `--contract`
/// (or `UFANET_CONTRACT`) is enough to run against the public host.
pub fn resolve_integration_config(global: &GlobalOpts) -> Result<IntegrationConfig, CliError> {
    let cfg = load_config()?;
    resolve_from(&cfg, global)
}

fn resolve_from(cfg: &Config, global: &GlobalOpts) -> Result<IntegrationConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None => {
            // A named profile that doesn't exist is an error; the implicit
            // default just means "flags only".
            if global.profile.is_some() {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: cfg.profile_names(),
                });
            }
            let contract = global.contract.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            Profile::new(contract)
        }
    };

    // Flag > env > profile
    if let Some(ref base_url) = global.base_url {
        profile.base_url.clone_from(base_url);
    }
    if let Some(ref contract) = global.contract {
        profile.contract.clone_from(contract);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => ufanet_config::resolve_password(&profile, &profile_name)?,
    };

    Ok(ufanet_config::build_integration_config(
        &profile,
        password,
        &cfg.defaults,
    )?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["ufanet"];
        argv.extend_from_slice(args);
        argv.push("login");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_home() -> Config {
        let mut cfg = Config::default();
        let mut home = Profile::new("user1");
        home.password = Some("pw".into());
        home.refresh_interval = Some(120);
        cfg.profiles.insert("home".into(), home);
        cfg.default_profile = Some("home".into());
        cfg
    }

    #[test]
    fn profile_values_apply() {
        let resolved = resolve_from(&config_with_home(), &global(&[])).unwrap();
        assert_eq!(resolved.credentials.username, "user1");
        assert_eq!(resolved.base_url.as_str(), "https://dom.ufanet.ru/");
        assert_eq!(resolved.refresh_interval, Duration::from_secs(120));
    }

    #[test]
    fn flags_override_profile() {
        let resolved = resolve_from(
            &config_with_home(),
            &global(&[
                "--contract",
                "user2",
                "--password",
                "other",
                "--base-url",
                "http://127.0.0.1:8080",
                "--timeout",
                "5",
            ]),
        )
        .unwrap();
        assert_eq!(resolved.credentials.username, "user2");
        assert_eq!(resolved.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(resolved.timeout, Duration::from_secs(5));
    }

    #[test]
    fn flags_alone_are_enough() {
        let resolved = resolve_from(
            &Config::default(),
            &global(&["--contract", "user1", "--password", "pw"]),
        )
        .unwrap();
        assert_eq!(resolved.credentials.username, "user1");
    }

    #[test]
    fn unknown_named_profile_lists_alternatives() {
        let err = resolve_from(&config_with_home(), &global(&["--profile", "cottage"]))
            .unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "cottage");
                assert_eq!(available, "home");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
