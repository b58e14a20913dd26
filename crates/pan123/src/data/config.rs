use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable that selects the wire emulation.
pub const PROTOCOL_ENV: &str = "PAN123_PROTOCOL";

pub const DEFAULT_BASE_URL: &str = "https://www.123pan.com";
pub const DEFAULT_LOGIN_URL: &str = "https://login.123pan.com";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Which client the adapter pretends to be.
///
/// The mode decides the header set, the login endpoint, the login body shape
/// for account-name logins, and whether URLs are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolMode {
    /// Android app emulation. Requests are not signed.
    #[default]
    Mobile,

    /// Desktop browser emulation. Every URL carries a signature pair.
    Browser,
}

impl ProtocolMode {
    /// Resolve a mode from a configuration value.
    ///
    /// Only `"web"` (any case, surrounding whitespace ignored) selects
    /// [`ProtocolMode::Browser`]; everything else, including an unset value,
    /// selects [`ProtocolMode::Mobile`].
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("web") => ProtocolMode::Browser,
            _ => ProtocolMode::Mobile,
        }
    }

    pub fn from_env() -> Self {
        Self::from_setting(std::env::var(PROTOCOL_ENV).ok().as_deref())
    }

    pub fn signs_requests(self) -> bool { matches!(self, ProtocolMode::Browser) }

    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolMode::Mobile => "mobile",
            ProtocolMode::Browser => "web",
        }
    }
}

impl fmt::Display for ProtocolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Construction-time settings for a [`crate::Pan123`] client.
///
/// # Examples
///
/// ```
/// use pan123::{DriverConfig, ProtocolMode};
///
/// let config = DriverConfig::new("alice@example.com", "secret")
///     .mode(ProtocolMode::Browser)
///     .max_pages(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct DriverConfig {
    pub username: String,
    pub password: String,

    /// Resolved once; never re-read from the environment afterwards.
    pub mode: ProtocolMode,

    /// Origin of the main API, without a trailing slash.
    ///
    /// Default: `https://www.123pan.com`
    pub base_url: String,

    /// Origin of the browser login host.
    ///
    /// Default: `https://login.123pan.com`
    pub login_url: String,

    /// Entries requested per listing page.
    ///
    /// Default: 100
    pub page_size: u32,

    /// Ceiling on pages fetched by one listing call.
    ///
    /// Guards against a backend that never reports the end sentinel.
    ///
    /// Default: 10,000
    pub max_pages: u32,

    /// Deadline applied to every outbound call that does not set its own.
    ///
    /// Default: None
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for DriverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("mode", &self.mode)
            .field("base_url", &self.base_url)
            .field("login_url", &self.login_url)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl DriverConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            mode: ProtocolMode::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout: None,
        }
    }

    /// Like [`DriverConfig::new`], with the mode taken from [`PROTOCOL_ENV`].
    pub fn from_env(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(username, password).mode(ProtocolMode::from_env())
    }

    #[must_use]
    pub fn mode(mut self, mode: ProtocolMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::InvalidConfig("username is empty".into()));
        }
        if self.password.is_empty() {
            return Err(Error::InvalidConfig("password is empty".into()));
        }
        if self.page_size == 0 {
            return Err(Error::InvalidConfig("page size must be positive".into()));
        }
        if self.max_pages == 0 {
            return Err(Error::InvalidConfig("max pages must be positive".into()));
        }
        url::Url::parse(&self.base_url)?;
        url::Url::parse(&self.login_url)?;
        Ok(())
    }
}
