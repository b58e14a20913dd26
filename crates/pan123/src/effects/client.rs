use std::sync::Arc;

use tokio::sync::Mutex;

use super::http::HttpTransport;
use super::rate::RateLimiter;
use crate::core::Endpoints;
use crate::data::{Credential, DriverConfig, IdentityProfile};
use crate::error::Result;

/// Client for one 123pan account.
///
/// Holds the configuration resolved at construction, the device identity
/// presented on every request, and the session token. Safe to share between
/// tasks; concurrent session refreshes are serialized.
pub struct Pan123<T: HttpTransport> {
    pub(crate) config: DriverConfig,
    pub(crate) endpoints: Endpoints,
    pub(crate) identity: IdentityProfile,
    pub(crate) credential: Credential,
    pub(crate) transport: T,
    pub(crate) limiter: Option<Arc<dyn RateLimiter>>,
    pub(crate) login_guard: Mutex<()>,
}

#[cfg(feature = "reqwest")]
impl Pan123<super::http::ReqwestTransport> {
    /// Create a client backed by a default reqwest transport.
    pub fn new(config: DriverConfig) -> Result<Self> {
        let transport = super::http::ReqwestTransport::new()?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> Pan123<T> {
    /// Create a client over an explicit transport.
    ///
    /// A fresh [`IdentityProfile`] is generated; it stays fixed for the
    /// lifetime of the client.
    pub fn with_transport(config: DriverConfig, transport: T) -> Result<Self> {
        config.validate()?;
        tracing::debug!(mode = %config.mode, base_url = %config.base_url, "creating client");
        Ok(Self {
            endpoints: Endpoints::resolve(&config),
            identity: IdentityProfile::generate(),
            credential: Credential::new(&config.username, &config.password),
            config,
            transport,
            limiter: None,
            login_guard: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn with_identity(mut self, identity: IdentityProfile) -> Self {
        self.identity = identity;
        self
    }

    /// Consult `limiter` before every listing page.
    #[must_use]
    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    pub fn config(&self) -> &DriverConfig { &self.config }

    pub fn endpoints(&self) -> &Endpoints { &self.endpoints }

    pub fn identity(&self) -> &IdentityProfile { &self.identity }

    pub fn credential(&self) -> &Credential { &self.credential }

    pub fn transport(&self) -> &T { &self.transport }
}
