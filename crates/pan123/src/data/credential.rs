use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Account credentials plus the session token obtained from them.
///
/// The token is the only mutable state; it is written by login and read when
/// building request headers.
pub struct Credential {
    username: String,
    password: String,
    token: RwLock<Option<String>>,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: RwLock::new(None),
        }
    }

    pub fn username(&self) -> &str { &self.username }

    pub fn password(&self) -> &str { &self.password }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}
