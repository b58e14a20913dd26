//! Scripted in-memory backend shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pan123::{
    DriverConfig, HttpRequest, HttpResponse, HttpTransport, IdentityProfile, Pan123,
    ProtocolMode, TransportError,
};
use serde_json::{Value, json};

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Transport that answers from a closure and records every request.
pub struct MockBackend {
    handler: Box<Handler>,
    delay: Option<Duration>,
    path_delays: Vec<(String, Duration)>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockBackend {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            delay: None,
            path_delays: Vec::new(),
            requests: Arc::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delay only requests to `path`, overriding [`MockBackend::with_delay`].
    pub fn with_path_delay(mut self, path: &str, delay: Duration) -> Self {
        self.path_delays.push((path.to_string(), delay));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> { self.requests.lock().unwrap().clone() }

    pub fn count(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| path_of(&r.url) == path).count()
    }
}

impl HttpTransport for MockBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let path = path_of(&request.url);
        let delay = self
            .path_delays
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, d)| *d)
            .or(self.delay);
        match delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
        (self.handler)(&request)
    }
}

pub fn path_of(url: &str) -> String { url::Url::parse(url).unwrap().path().to_string() }

pub fn query_of(url: &str, key: &str) -> Option<String> {
    url::Url::parse(url)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub fn reply(body: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(200, serde_json::to_vec(&body).unwrap()))
}

pub fn ok(data: Value) -> Result<HttpResponse, TransportError> {
    reply(json!({ "code": 0, "message": "ok", "data": data }))
}

pub fn expired() -> Result<HttpResponse, TransportError> {
    reply(json!({ "code": 401, "message": "token expired" }))
}

pub fn login_ok(token: &str) -> Result<HttpResponse, TransportError> {
    reply(json!({ "code": 200, "message": "success", "data": { "token": token } }))
}

pub fn entries(start: i64, n: i64) -> Value {
    Value::Array(
        (start..start + n)
            .map(|id| json!({ "FileId": id, "ParentFileId": 0, "FileName": format!("f{id}"), "Type": 0, "Size": id }))
            .collect(),
    )
}

pub fn body_json(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().unwrap_or(b"null")).unwrap()
}

pub fn identity() -> IdentityProfile {
    IdentityProfile::new("M2104K10I", "Android_14.0.0", uuid::Uuid::nil())
}

pub fn config(mode: ProtocolMode) -> DriverConfig {
    DriverConfig::new("13800138000", "secret").mode(mode).base_url("https://pan.test")
}

pub fn client(mode: ProtocolMode, backend: MockBackend) -> Pan123<MockBackend> {
    Pan123::with_transport(config(mode), backend).unwrap().with_identity(identity())
}

pub const LOGIN_MOBILE: &str = "/b/api/user/sign_in";
pub const LOGIN_BROWSER: &str = "/api/user/sign_in";
pub const USER_INFO: &str = "/b/api/user/info";
pub const LIST_MOBILE: &str = "/b/api/file/list/new";
pub const LIST_BROWSER: &str = "/api/file/list/new";
