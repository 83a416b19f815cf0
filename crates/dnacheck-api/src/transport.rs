// Transport configuration for building the controller's reqwest::Client.
//
// Holds TLS and timeout settings, and the URL convention the controller
// is addressed by (`https://{host}[:{port}]`).

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::Error;

const USER_AGENT: &str = concat!("dnacheck/", env!("CARGO_PKG_VERSION"));

/// The port that is never written into a controller URL.
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// TLS verification mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed controllers).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// Build the controller base URL from a host and port.
///
/// The port is omitted when it equals [`DEFAULT_HTTP_PORT`], so
/// `("dnac.example.com", 80)` yields `https://dnac.example.com`.
pub fn controller_url(host: &str, port: u16) -> Result<Url, Error> {
    let host = host.trim().trim_end_matches('/');
    let authority = if port == DEFAULT_HTTP_PORT {
        host.to_owned()
    } else {
        format!("{host}:{port}")
    };
    Ok(Url::parse(&format!("https://{authority}"))?)
}
