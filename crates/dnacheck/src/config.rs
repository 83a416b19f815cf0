//! CLI configuration: profile lookup with flag overrides and prompts.

use std::io::IsTerminal;

use clap::ValueEnum;
use dialoguer::{Input, Password};
use secrecy::SecretString;

use dnacheck_config::Defaults;
use dnacheck_core::{AuthCredentials, CollectorConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use dnacheck_config::{Config, Profile, config_path, load_config};

/// Whether prompts can be shown.
pub fn interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// The active profile with flag overrides applied. A missing profile is
/// only an error when it was asked for by name.
pub fn resolve_profile(
    global: &GlobalOpts,
    config: &Config,
) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);
    let mut profile = match config.profiles.get(&name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: config.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
                name,
            });
        }
        None => Profile::default(),
    };

    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(port) = global.port {
        profile.port = port;
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    Ok((name, profile))
}

/// Fill output format and color from `[defaults]` where no flag or env
/// var set them. Unreadable config is left for the command to report.
pub fn apply_config_defaults(global: &mut GlobalOpts) {
    if let Ok(cfg) = load_config() {
        apply_defaults(global, &cfg.defaults);
    }
}

fn apply_defaults(global: &mut GlobalOpts, defaults: &Defaults) {
    if global.output.is_none() {
        global.output = parse_default("output", &defaults.output);
    }
    if global.color.is_none() {
        global.color = parse_default("color", &defaults.color);
    }
}

fn parse_default<T: ValueEnum>(key: &str, value: &str) -> Option<T> {
    let parsed = T::from_str(value, true).ok();
    if parsed.is_none() {
        tracing::warn!(key, value, "ignoring unknown value in [defaults]");
    }
    parsed
}

pub(crate) fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_text(label: &str) -> Result<String, CliError> {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .map_err(prompt_err)
}

/// Build the collector configuration: config file, flags, then prompts for
/// whatever is still missing.
pub fn resolve_collector_config(global: &GlobalOpts) -> Result<CollectorConfig, CliError> {
    let cfg = load_config()?;
    let (name, mut profile) = resolve_profile(global, &cfg)?;

    if profile.host.trim().is_empty() {
        if !interactive() {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
        profile.host = prompt_text("DNA Center host address")?;
    }

    let username = match profile.username.clone() {
        Some(u) => u,
        None if interactive() => prompt_text("DNA Center API username")?,
        None => {
            return Err(CliError::NoCredentials {
                what: "username".into(),
                profile: name,
            });
        }
    };

    let password = match dnacheck_config::resolve_password(&profile, &name) {
        Some(pw) => pw,
        None if interactive() => SecretString::from(
            Password::new()
                .with_prompt("DNA Center API password")
                .interact()
                .map_err(prompt_err)?,
        ),
        None => {
            return Err(CliError::NoCredentials {
                what: "password".into(),
                profile: name,
            });
        }
    };

    let auth = AuthCredentials::Credentials { username, password };
    let mut config = dnacheck_config::profile_to_collector_config(&profile, &cfg.defaults, auth)?;
    if global.yes {
        config.ask_for_permission = false;
    }
    Ok(config)
}
