use thiserror::Error;

/// Top-level error type for the `dnacheck-api` crate.
///
/// Covers every failure mode of a controller call: authentication,
/// transport, non-success HTTP status, and malformed payloads.
/// `dnacheck-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token request rejected (wrong credentials, locked account, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A call that needs a token was made before `login()`.
    #[error("Not authenticated -- call login() or supply a token first")]
    NotAuthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Controller responses ────────────────────────────────────────
    /// The controller answered with a status outside the accepted set.
    #[error("Unexpected HTTP {status} from {path}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A required response header was absent.
    #[error("Response is missing the `{0}` header")]
    MissingHeader(&'static str),
}

impl Error {
    /// Returns `true` if this error indicates rejected credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::NotAuthenticated)
            || matches!(self, Self::Status { status: 401, .. })
    }
}
