//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use dnacheck_config::ConfigError;
use dnacheck_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const JOB_FAILURE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(dnacheck::connection_failed),
        help(
            "Check that the controller is reachable over HTTPS.\n\
             A self-signed certificate needs --insecure (-k) or ca_cert in the profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(dnacheck::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(dnacheck::auth_failed),
        help(
            "Verify the username and password.\n\
             Store a password with: dnacheck config set-password --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No {what} configured for profile '{profile}'")]
    #[diagnostic(
        code(dnacheck::no_credentials),
        help(
            "Pass --username, set DNACHECK_PASSWORD, or run interactively to be prompted.\n\
             Store a password with: dnacheck config set-password"
        )
    )]
    NoCredentials { what: String, profile: String },

    // ── Job protocol ─────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(dnacheck::job_failed))]
    JobFailed {
        message: String,
        #[help]
        advice: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(dnacheck::api_error))]
    Api { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dnacheck::validation))]
    Validation { field: String, reason: String },

    #[error("Collection prompts need an interactive terminal")]
    #[diagnostic(
        code(dnacheck::confirmation_required),
        help("Use --yes (-y) or set ask_for_permission = false to run unattended.")
    )]
    NonInteractiveRequiresYes,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(dnacheck::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No controller host configured")]
    #[diagnostic(
        code(dnacheck::no_config),
        help(
            "Pass --host, set DNACHECK_HOST, or add a profile to the config file.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(dnacheck::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    #[diagnostic(code(dnacheck::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    #[diagnostic(code(dnacheck::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(dnacheck::internal))]
    Internal(String),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout => exit_code::TIMEOUT,
            Self::JobFailed { .. } => exit_code::JOB_FAILURE,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if err.is_job_failure() {
            return CliError::JobFailed {
                advice: job_advice(&err).into(),
                message: err.to_string(),
            };
        }
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::Api { message, .. } => CliError::Api { message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            other => CliError::Internal(other.to_string()),
        }
    }
}

fn job_advice(err: &CoreError) -> &'static str {
    match err {
        CoreError::TaskFailed { .. } => {
            "The controller reported the task as failed.\n\
             Check the device ids and commands, and the task in the controller UI."
        }
        CoreError::ArtifactExhausted { .. } => {
            "The job finished but its result could not be downloaded.\n\
             Raise fetch_attempts / fetch_interval_secs in the profile, or retry later."
        }
        _ => {
            "The controller did not finish the job within the polling budget.\n\
             Raise task_attempts / task_interval_secs in the profile, or retry later."
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Keyring(e) => CliError::Validation {
                field: "keyring".into(),
                reason: e.to_string(),
            },
            ConfigError::Serialization(e) => {
                CliError::Internal(format!("config serialization: {e}"))
            }
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_failures_exit_nine() {
        let err: CliError = CoreError::TaskExhausted {
            task_id: "T1".into(),
            attempts: 12,
            last_reason: "progress has no `fileId`".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::JOB_FAILURE);
        assert!(err.to_string().contains("T1"));

        let err: CliError = CoreError::ArtifactExhausted {
            reference: "file F1".into(),
            attempts: 6,
            last_error: "HTTP 404".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::JOB_FAILURE);
        assert!(help_text(&err).contains("fetch_attempts"));
    }

    fn help_text(err: &CliError) -> String {
        err.help().map(|h| h.to_string()).unwrap_or_default()
    }

    #[test]
    fn job_help_follows_the_failure() {
        let failed: CliError = CoreError::TaskFailed {
            task_id: "T1".into(),
            reason: "device unreachable".into(),
        }
        .into();
        assert_eq!(failed.exit_code(), exit_code::JOB_FAILURE);
        let help = help_text(&failed);
        assert!(help.contains("reported the task as failed"), "{help}");
        assert!(!help.contains("polling budget"), "{help}");

        let exhausted: CliError = CoreError::TaskExhausted {
            task_id: "T1".into(),
            attempts: 12,
            last_reason: "task still running".into(),
        }
        .into();
        assert!(help_text(&exhausted).contains("polling budget"));
    }

    #[test]
    fn core_errors_keep_their_class() {
        let auth: CliError = CoreError::AuthenticationFailed {
            message: "token rejected".into(),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let conn: CliError = CoreError::ConnectionFailed {
            url: "https://dnac".into(),
            reason: "refused".into(),
        }
        .into();
        assert_eq!(conn.exit_code(), exit_code::CONNECTION);

        let timeout: CliError = CoreError::Timeout.into();
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let api: CliError = CoreError::Api {
            message: "HTTP 500".into(),
            status: Some(500),
        }
        .into();
        assert_eq!(api.exit_code(), exit_code::GENERAL);
    }
}
