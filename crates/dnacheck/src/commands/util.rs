//! Shared helpers for command handlers.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use dialoguer::Confirm;
use sha2::{Digest, Sha256};

use dnacheck_core::{Collector, CollectorConfig, ConfirmationPolicy};

use crate::config;
use crate::error::CliError;
use crate::output::Reporter;

/// Asks on the terminal, defaulting to yes. A failed prompt declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl ConfirmationPolicy for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .unwrap_or(false)
    }
}

/// Resolve configuration and log in. `prompts` says whether the command
/// will run any confirmation-gated step.
pub async fn connect(
    global: &crate::cli::GlobalOpts,
    reporter: Reporter,
    prompts: bool,
) -> Result<Collector, CliError> {
    let config = config::resolve_collector_config(global)?;
    ensure_can_confirm(&config, prompts, config::interactive())?;
    reporter.step(&format!("Running activation check on {}", config.url));
    Ok(Collector::connect(config, Box::new(TerminalConfirm)).await?)
}

/// Gated steps need a terminal unless confirmation is switched off.
fn ensure_can_confirm(
    config: &CollectorConfig,
    prompts: bool,
    interactive: bool,
) -> Result<(), CliError> {
    if prompts && config.ask_for_permission && !interactive {
        return Err(CliError::NonInteractiveRequiresYes);
    }
    Ok(())
}

/// SHA-256 of the running executable, or a note saying why there is none.
pub fn executable_sha256() -> String {
    match std::env::current_exe().and_then(std::fs::read) {
        Ok(contents) => sha256_hex(&contents),
        Err(e) => format!("ERROR: could not calculate hash - {e}"),
    }
}

pub fn sha256_hex(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    format!("{:x}", hasher.finalize())
}

/// `dna-YYYYmmdd-HHMMSS`
pub fn file_stem(now: DateTime<Local>) -> String {
    format!("dna-{}", now.format("%Y%m%d-%H%M%S"))
}

/// Write `value` as JSON under `dir`, returning the full path.
pub fn write_json<T: serde::Serialize + ?Sized>(
    dir: &Path,
    file_name: &str,
    value: &T,
) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, serde_json::to_vec_pretty(value)?)?;
    Ok(path)
}

/// Write a downloaded file under `dir`, keeping only the final component
/// of the advertised name.
pub fn write_download(dir: &Path, advertised: &str, bytes: &[u8]) -> Result<PathBuf, CliError> {
    let name = Path::new(advertised)
        .file_name()
        .ok_or_else(|| CliError::Validation {
            field: "fileName".into(),
            reason: format!("unusable download name {advertised:?}"),
        })?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}
