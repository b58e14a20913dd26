//! Error types for pan123.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    #[error("request deadline elapsed")]
    Timeout,

    #[error("authentication failed (code {code}): {message}")]
    Authentication { code: i64, message: String },

    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    #[error("failed to decode response: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("listing did not terminate within {0} pages")]
    PageLimitExceeded(u32),
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self { Error::Transport(e) }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self { Error::InvalidUrl(e.to_string()) }
}

/// Failure below the envelope layer: connection, TLS, timeout, or body read.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self { message: message.into(), source: Some(Box::new(source)) }
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            "request timed out"
        } else if e.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        TransportError::with_source(message, e)
    }
}
