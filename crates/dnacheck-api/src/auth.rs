// Token authentication
//
// A single HTTP Basic call against the system token endpoint. The token
// returned is attached as `X-auth-token` to every later request; there
// is no refresh.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::{DnacClient, decode};
use crate::error::Error;
use crate::models::AuthToken;

/// Fixed token endpoint.
pub const LOGIN_PATH: &str = "/api/system/v1/auth/token";

impl DnacClient {
    /// Authenticate with username/password and store the session token.
    ///
    /// `POST /api/system/v1/auth/token` with HTTP Basic credentials,
    /// answered by `{"Token": "..."}`.
    pub async fn login(&mut self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.url(LOGIN_PATH)?;
        debug!("requesting auth token at {}", url);

        let resp = self
            .http()
            .post(url)
            .basic_auth(username, Some(password.expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request failed (HTTP {status}): {body}"),
            });
        }

        let token: AuthToken = decode(resp).await.map_err(|e| Error::Authentication {
            message: format!("unexpected token response: {e}"),
        })?;

        self.set_token(SecretString::from(token.token));
        debug!("login successful");
        Ok(())
    }
}
