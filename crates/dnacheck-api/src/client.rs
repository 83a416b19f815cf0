// Controller HTTP session
//
// Wraps `reqwest::Client` with DNA Center URL construction, the
// `X-auth-token` header, status policy, and `{ "response": ... }` envelope
// unwrapping. Endpoint groups (inventory, fabric, tasks, etc.) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use bytes::Bytes;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::Envelope;
use crate::transport::TransportConfig;

/// Header carrying the session token on every authenticated call.
pub const AUTH_TOKEN_HEADER: &str = "X-auth-token";

/// Header naming a downloadable file.
pub const FILE_NAME_HEADER: &str = "fileName";

/// A binary file served by the controller.
#[derive(Debug, Clone)]
pub struct Download {
    /// Name advertised by the controller in the `fileName` header.
    pub file_name: String,
    pub bytes: Bytes,
}

/// HTTP session against one DNA Center controller.
///
/// Owns the base URL, the TLS policy (baked into `http`), and the auth
/// token. The token is the only state that changes after construction,
/// and only through [`login`](Self::login).
pub struct DnacClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl std::fmt::Debug for DnacClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnacClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl DnacClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the controller root, usually built with
    /// [`controller_url`](crate::transport::controller_url).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: None,
        }
    }

    /// Use an existing token instead of logging in.
    #[must_use]
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn set_token(&mut self, token: SecretString) {
        debug!("storing auth token");
        self.token = Some(token);
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve an API path (optionally with a query string) against the
    /// base URL. Absolute URLs are accepted unchanged.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    fn token(&self) -> Result<&str, Error> {
        self.token
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .ok_or(Error::NotAuthenticated)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET.
    ///
    /// Only HTTP 200 and 204 count as success; every other status is
    /// returned as [`Error::Status`].
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, Error> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(AUTH_TOKEN_HEADER, self.token()?)
            .send()
            .await
            .map_err(Error::Transport)?;

        match resp.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(resp),
            status => Err(status_error(status, path, resp).await),
        }
    }

    /// Send an authenticated POST with a JSON body.
    ///
    /// Any 2xx is accepted: job-submitting endpoints answer `202 Accepted`.
    pub async fn post(
        &self,
        path: &str,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(path)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .header(AUTH_TOKEN_HEADER, self.token()?)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(status_error(status, path, resp).await)
        }
    }

    /// GET a path and deserialize the whole body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self.get(path).await?;
        decode(resp).await
    }

    /// GET a path and unwrap the `response` envelope.
    pub async fn get_response<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let envelope: Envelope<T> = self.get_json(path).await?;
        Ok(envelope.response)
    }

    /// POST a JSON body and unwrap the `response` envelope.
    pub async fn post_response<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<T, Error> {
        let resp = self.post(path, body).await?;
        let envelope: Envelope<T> = decode(resp).await?;
        Ok(envelope.response)
    }

    /// GET a binary resource, keeping the file name the controller
    /// advertises in its `fileName` header.
    pub async fn download(&self, path: &str) -> Result<Download, Error> {
        let resp = self.get(path).await?;
        let file_name = resp
            .headers()
            .get(FILE_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or(Error::MissingHeader(FILE_NAME_HEADER))?;
        let bytes = resp.bytes().await.map_err(Error::Transport)?;
        debug!(file_name, size = bytes.len(), "downloaded file");
        Ok(Download { file_name, bytes })
    }
}

async fn status_error(status: StatusCode, path: &str, resp: reqwest::Response) -> Error {
    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED {
        return Error::Authentication {
            message: format!("token rejected on {path}"),
        };
    }
    Error::Status {
        status: status.as_u16(),
        path: path.to_owned(),
        body: preview(&body).to_owned(),
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(len = body.len(), "decoding response body");
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body: body.clone(),
    })
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
