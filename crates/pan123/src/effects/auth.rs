use bytes::Bytes;

use super::client::Pan123;
use super::http::{HttpRequest, HttpTransport, Method};
use crate::core::protocol::LOGIN_OK;
use crate::core::{headers, login_body};
use crate::data::{Envelope, LoginData};
use crate::error::{Error, Result};

impl<T: HttpTransport> Pan123<T> {
    /// Exchange the configured username and password for a session token.
    ///
    /// On success the token replaces whatever the client held before. On
    /// failure the held token is left untouched.
    pub async fn login(&self) -> Result<()> {
        let mode = self.config.mode;
        let body = login_body(mode, self.credential.username(), self.credential.password());
        let request = HttpRequest {
            method: Method::Post,
            url: self.endpoints.login.clone(),
            headers: headers(mode, &self.identity, None),
            body: Some(Bytes::from(serde_json::to_vec(&body)?)),
        };

        tracing::debug!(%mode, url = %request.url, "logging in");
        let response = self.transport.send(request).await?;
        let envelope: Envelope<LoginData> = match serde_json::from_slice(&response.body) {
            Ok(envelope) => envelope,
            Err(_) if !response.is_success() => {
                return Err(Error::Authentication {
                    code: i64::from(response.status),
                    message: format!("login endpoint answered HTTP {}", response.status),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if envelope.code != LOGIN_OK {
            return Err(Error::Authentication { code: envelope.code, message: envelope.message });
        }
        let token = envelope
            .data
            .map(|d| d.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication {
                code: envelope.code,
                message: "login response carried no token".into(),
            })?;

        self.credential.set_token(token);
        tracing::info!(username = %self.credential.username(), "logged in");
        Ok(())
    }

    /// Log in unless a session token is already held.
    pub async fn ensure_login(&self) -> Result<()> {
        if self.credential.token().is_some() {
            return Ok(());
        }
        self.refresh_session(None).await
    }

    /// Replace the session that produced `stale`.
    ///
    /// Logins are serialized. A caller that waited while another caller
    /// replaced `stale` reuses the new token instead of logging in again.
    pub(crate) async fn refresh_session(&self, stale: Option<&str>) -> Result<()> {
        let _guard = self.login_guard.lock().await;
        let current = self.credential.token();
        if current.is_some() && current.as_deref() != stale {
            tracing::debug!("session already refreshed by a concurrent request");
            return Ok(());
        }
        self.login().await
    }
}
