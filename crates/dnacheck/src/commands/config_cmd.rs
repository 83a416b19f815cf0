//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::Password;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, prompt_err};
use crate::error::CliError;
use crate::output::{self, Reporter};

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "ask_for_permission = {}", cfg.defaults.ask_for_permission);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "host = \"{}\"", p.host);
        let _ = writeln!(out, "port = {}", p.port);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(n) = p.task_attempts {
            let _ = writeln!(out, "task_attempts = {n}");
        }
        if let Some(n) = p.task_interval_secs {
            let _ = writeln!(out, "task_interval_secs = {n}");
        }
        if let Some(n) = p.fetch_attempts {
            let _ = writeln!(out, "fetch_attempts = {n}");
        }
        if let Some(n) = p.fetch_interval_secs {
            let _ = writeln!(out, "fetch_interval_secs = {n}");
        }
        if let Some(ask) = p.ask_for_permission {
            let _ = writeln!(out, "ask_for_permission = {ask}");
        }
    }

    out.trim_end().to_owned()
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts, reporter: Reporter) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let mut cfg = config::load_config()?;
            for profile in cfg.profiles.values_mut() {
                if profile.password.is_some() {
                    profile.password = Some("****".into());
                }
            }
            let out = output::render_single(global.output(), &cfg, format_config_redacted)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::SetPassword => {
            let cfg = config::load_config()?;
            let name = config::active_profile_name(global, &cfg);
            let password = Password::new()
                .with_prompt(format!("Password for profile '{name}'"))
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "cannot be empty".into(),
                });
            }
            dnacheck_config::store_password(&name, &password)?;
            reporter.step(&format!("Password for profile '{name}' stored in system keyring"));
            Ok(())
        }
    }
}
