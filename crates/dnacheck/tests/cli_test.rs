//! Integration tests for the `dnacheck` CLI binary.
//!
//! Argument parsing, help output, completions and configuration errors,
//! all without a live controller.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `dnacheck` binary with env isolation.
///
/// Clears the `DNACHECK_*` variables and points config directories at a
/// nonexistent path so tests never read the user's real configuration.
fn dnacheck_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dnacheck");
    cmd.env("HOME", "/tmp/dnacheck-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/dnacheck-cli-test-nonexistent")
        .env_remove("DNACHECK_PROFILE")
        .env_remove("DNACHECK_HOST")
        .env_remove("DNACHECK_PORT")
        .env_remove("DNACHECK_USERNAME")
        .env_remove("DNACHECK_PASSWORD")
        .env_remove("DNACHECK_INSECURE")
        .env_remove("DNACHECK_TIMEOUT")
        .env_remove("DNACHECK_OUTPUT")
        .env_remove("DNACHECK_DEFAULTS__OUTPUT")
        .env_remove("DNACHECK_DEFAULTS__COLOR")
        .env_remove("DNACHECK_EXECUTER_NAME")
        .env_remove("DNACHECK_EXECUTER_CCO");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = dnacheck_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    dnacheck_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("DNA Center")
            .and(predicate::str::contains("collect"))
            .and(predicate::str::contains("fabric"))
            .and(predicate::str::contains("run")),
    );
}

#[test]
fn test_version_flag() {
    dnacheck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dnacheck"));
}

#[test]
fn test_collect_help_lists_flags() {
    dnacheck_cmd()
        .args(["collect", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--out-dir")
                .and(predicate::str::contains("--skip-show-commands"))
                .and(predicate::str::contains("--upgrade-report")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    dnacheck_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    dnacheck_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    dnacheck_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dnacheck"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = dnacheck_cmd().arg("frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("frobnicate"), "Expected name echoed back:\n{text}");
}

#[test]
fn test_invalid_output_format() {
    let output = dnacheck_cmd()
        .args(["--output", "xml", "config", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("xml"), "Expected rejected value in output:\n{text}");
}

#[test]
fn test_run_requires_device() {
    let output = dnacheck_cmd()
        .args(["run", "--command", "show version"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("--device"), "Expected missing --device:\n{text}");
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_collect_without_host_fails() {
    let output = dnacheck_cmd().arg("collect").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("No controller host configured"),
        "Expected missing host message:\n{text}"
    );
}

#[test]
fn test_fabric_without_username_fails() {
    let output = dnacheck_cmd()
        .args(["--host", "dnac.example.com", "fabric"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("username"), "Expected username hint:\n{text}");
}

#[test]
fn test_run_without_yes_goes_straight_to_login() {
    // Nothing listens on port 1, so the run stops at the connection.
    let output = dnacheck_cmd()
        .env("DNACHECK_PASSWORD", "pw")
        .args(["--host", "127.0.0.1", "--port", "1", "--username", "admin"])
        .args(["run", "--device", "d1", "--command", "show version"])
        .output()
        .unwrap();
    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(7), "{text}");
    assert!(!text.contains("interactive terminal"), "{text}");
}

#[test]
fn test_collect_without_yes_needs_terminal() {
    let output = dnacheck_cmd()
        .env("DNACHECK_PASSWORD", "pw")
        .args(["--host", "127.0.0.1", "--port", "1", "--username", "admin"])
        .args(["collect", "--executer-name", "Ada", "--executer-cco", "ada01"])
        .output()
        .unwrap();
    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(2), "{text}");
    assert!(text.contains("interactive terminal"), "{text}");
}

#[test]
fn test_unknown_profile_fails() {
    let output = dnacheck_cmd()
        .args(["--profile", "lab", "collect"])
        .output()
        .unwrap();
    assert_ne!(output.status.code(), Some(0));
    let text = combined_output(&output);
    assert!(text.contains("lab"), "Expected profile name:\n{text}");
}

#[test]
fn test_config_show_defaults() {
    dnacheck_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[defaults]")
                .and(predicate::str::contains("ask_for_permission = true")),
        );
}

#[test]
fn test_config_show_json() {
    let output = dnacheck_cmd()
        .args(["--output", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["defaults"]["timeout"], 30);
}

#[test]
fn test_config_default_output_applies() {
    let output = dnacheck_cmd()
        .env("DNACHECK_DEFAULTS__OUTPUT", "json")
        .args(["config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["defaults"]["output"], "json");

    // An explicit flag still wins.
    dnacheck_cmd()
        .env("DNACHECK_DEFAULTS__OUTPUT", "json")
        .args(["--output", "table", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_path() {
    dnacheck_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
