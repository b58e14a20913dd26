use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::Instant;

use super::client::Pan123;
use super::http::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::core::protocol::{API_OK, SESSION_EXPIRED, WEB_PLATFORM, WEB_VERSION};
use crate::core::{headers, query};
use crate::data::{Envelope, Status};
use crate::error::{Error, Result};

/// Attempts per call: the first send plus a single retry after the
/// session is refreshed.
pub const MAX_ATTEMPTS: u32 = 2;

/// Per-call customization applied on top of the protocol headers.
///
/// The customizer passed to [`Pan123::execute`] runs again on every attempt,
/// so it must be repeatable.
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
    pub deadline: Option<Instant>,
}

impl RequestSpec {
    pub fn query(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn queries<I>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    pub fn header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<&mut Self> {
        self.body = Some(Bytes::from(serde_json::to_vec(body)?));
        Ok(self)
    }

    /// Abort the outbound call once `deadline` passes.
    pub fn deadline(&mut self, deadline: Instant) -> &mut Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.deadline(Instant::now() + timeout)
    }
}

impl<T: HttpTransport> Pan123<T> {
    /// Send one logical call and return the raw body of a successful
    /// response.
    ///
    /// Headers and (in browser mode) the signature are rebuilt on every
    /// attempt. A session-expired answer on the first attempt refreshes the
    /// session and retries once; any other non-zero code, or a second
    /// session-expired answer, fails with [`Error::Api`]. Transport failures
    /// are returned immediately.
    pub async fn execute<F>(&self, url: &str, method: Method, customize: F) -> Result<Bytes>
    where
        F: Fn(&mut RequestSpec) + Send + Sync,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let token = self.credential.token();
            let mut spec = RequestSpec::default();
            customize(&mut spec);
            let deadline = spec
                .deadline
                .or_else(|| self.config.request_timeout.map(|t| Instant::now() + t));

            let request = self.build_request(url, method, token.as_deref(), spec)?;
            tracing::debug!(attempt, %method, url = %request.url, "sending request");
            let response = self.send_before(request, deadline).await?;

            let status = decode_status(&response)?;
            match status.code {
                API_OK => return Ok(response.body),
                SESSION_EXPIRED if attempt < MAX_ATTEMPTS => {
                    tracing::warn!(url, "session expired, logging in again");
                    self.refresh_session(token.as_deref()).await?;
                }
                code => return Err(Error::Api { code, message: status.message }),
            }
        }
    }

    /// [`Pan123::execute`], then decode the envelope's `data` field.
    ///
    /// A missing or `null` `data` decodes as `D::default()`.
    pub async fn request<D, F>(&self, url: &str, method: Method, customize: F) -> Result<D>
    where
        D: DeserializeOwned + Default,
        F: Fn(&mut RequestSpec) + Send + Sync,
    {
        let body = self.execute(url, method, customize).await?;
        let envelope: Envelope<D> = serde_json::from_slice(&body)?;
        Ok(envelope.data.unwrap_or_default())
    }

    fn build_request(
        &self,
        url: &str,
        method: Method,
        token: Option<&str>,
        spec: RequestSpec,
    ) -> Result<HttpRequest> {
        let mut url = query::with_query(url, &spec.query)?;
        if self.config.mode.signs_requests() {
            let pair = pan123_sign::sign(query::signing_path(&url), WEB_PLATFORM, WEB_VERSION);
            query::append_signature(&mut url, pair);
        }

        let mut all_headers = headers(self.config.mode, &self.identity, token);
        all_headers.extend(spec.headers);

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers: all_headers,
            body: spec.body,
        })
    }

    async fn send_before(
        &self,
        request: HttpRequest,
        deadline: Option<Instant>,
    ) -> Result<HttpResponse> {
        let send = self.transport.send(request);
        let response = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, send)
                .await
                .map_err(|_| Error::Timeout)?,
            None => send.await,
        };
        Ok(response?)
    }
}

fn decode_status(response: &HttpResponse) -> Result<Status> {
    match serde_json::from_slice::<Status>(&response.body) {
        Ok(status) => Ok(status),
        Err(_) if !response.is_success() => Err(Error::Api {
            code: i64::from(response.status),
            message: format!("HTTP {}", response.status),
        }),
        Err(e) => Err(e.into()),
    }
}
