// ── Runtime connection configuration ──
//
// These types describe *how* to reach a controller and how patient to be
// with its jobs. They carry credentials but never touch disk; the CLI
// builds a `CollectorConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::job::PollPolicy;

/// How to authenticate with the controller.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// HTTP Basic against the token endpoint.
    Credentials {
        username: String,
        password: SecretString,
    },
    /// A token obtained elsewhere.
    Token(SecretString),
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for on-prem controllers.
    #[default]
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for dnacheck_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for one collection run against a single controller.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Controller URL (e.g., `https://dnac.example.com`).
    pub url: Url,
    pub auth: AuthCredentials,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Budget for waiting on a task's result reference.
    pub task_policy: PollPolicy,
    /// Budget for fetching a result once referenced.
    pub fetch_policy: PollPolicy,
    /// Prompt before every collection step.
    pub ask_for_permission: bool,
}

impl CollectorConfig {
    pub fn new(url: Url, auth: AuthCredentials) -> Self {
        Self {
            url,
            auth,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            task_policy: PollPolicy::TASK,
            fetch_policy: PollPolicy::ARTIFACT,
            ask_for_permission: true,
        }
    }

    pub(crate) fn transport(&self) -> dnacheck_api::TransportConfig {
        dnacheck_api::TransportConfig {
            tls: (&self.tls).into(),
            timeout: self.timeout,
        }
    }
}
