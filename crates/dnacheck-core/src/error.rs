// ── Core error types ──
//
// Errors surfaced by collection. Transport-level failures arrive as
// `dnacheck_api::Error` and are translated by the `From` impl below;
// job-protocol failures (budget exhaustion, failed tasks) originate here.

use thiserror::Error;

/// Unified error type for the core crate.
///
/// Every variant is terminal for the run that produced it. Retrying is
/// done inside the poll loops, never by the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out")]
    Timeout,

    // ── Job protocol errors ──────────────────────────────────────────
    #[error("Task {task_id} produced no result after {attempts} attempts (last: {last_reason})")]
    TaskExhausted {
        task_id: String,
        attempts: u32,
        last_reason: String,
    },

    #[error("Task {task_id} failed on the controller: {reason}")]
    TaskFailed { task_id: String, reason: String },

    #[error("Result {reference} could not be fetched after {attempts} attempts: {last_error}")]
    ArtifactExhausted {
        reference: String,
        attempts: u32,
        last_error: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for failures of the asynchronous job protocol.
    pub fn is_job_failure(&self) -> bool {
        matches!(
            self,
            Self::TaskExhausted { .. } | Self::TaskFailed { .. } | Self::ArtifactExhausted { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dnacheck_api::Error> for CoreError {
    fn from(err: dnacheck_api::Error) -> Self {
        use dnacheck_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => CoreError::AuthenticationFailed { message },
            ApiError::NotAuthenticated => CoreError::AuthenticationFailed {
                message: "no session token".into(),
            },
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e.url().map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::Status { status, path, body } => CoreError::Api {
                message: format!("HTTP {status} on {path}: {body}"),
                status: Some(status),
            },
            ApiError::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            ApiError::MissingHeader(name) => CoreError::Api {
                message: format!("response is missing the `{name}` header"),
                status: None,
            },
        }
    }
}
