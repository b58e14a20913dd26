//! Request rate limiting consulted before each listing page.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use super::http::BoxFuture;
use crate::error::{Error, Result};

/// Gate consulted before a request is issued.
///
/// An `Err` stops the caller and is propagated unchanged.
pub trait RateLimiter: Send + Sync {
    fn acquire(&self) -> BoxFuture<'_, Result<()>>;
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Token bucket: `capacity` tokens of burst, refilled at `refill_rate`
/// tokens per second. Each request costs one token.
pub struct TokenBucket {
    capacity: f64,
    refill_rate: f64,
    max_wait: Option<Duration>,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Create a full bucket.
    pub fn new(capacity: f64, refill_rate: f64) -> Self {
        Self {
            capacity,
            refill_rate,
            max_wait: None,
            state: Mutex::new(BucketState { tokens: capacity, last_refill: Instant::now() }),
        }
    }

    /// Fail with [`Error::RateLimited`] instead of waiting longer than `max_wait`.
    #[must_use]
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    pub fn available(&self) -> f64 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut state);
        state.tokens
    }

    /// Take `tokens` if they are available right now.
    pub fn try_acquire(&self, tokens: f64) -> bool {
        self.take_or_wait(tokens).is_none()
    }

    /// Take `tokens`, sleeping until the bucket has refilled enough.
    pub async fn acquire_tokens(&self, tokens: f64) -> Result<()> {
        if tokens > self.capacity {
            return Err(Error::RateLimited(format!(
                "{tokens} tokens requested but bucket capacity is {}",
                self.capacity
            )));
        }
        loop {
            let Some(wait) = self.take_or_wait(tokens) else {
                return Ok(());
            };
            if self.refill_rate <= 0.0 {
                return Err(Error::RateLimited("bucket is empty and never refills".into()));
            }
            if self.max_wait.is_some_and(|max| wait > max) {
                return Err(Error::RateLimited(format!(
                    "next token available in {wait:?}, over the allowed wait"
                )));
            }
            tracing::debug!(?wait, "rate limited, waiting for tokens");
            tokio::time::sleep(wait).await;
        }
    }

    // Returns None when the tokens were taken, otherwise the time until they
    // will be available.
    fn take_or_wait(&self, tokens: f64) -> Option<Duration> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut state);
        if state.tokens >= tokens {
            state.tokens -= tokens;
            return None;
        }
        let deficit = tokens - state.tokens;
        if self.refill_rate <= 0.0 {
            return Some(Duration::MAX);
        }
        Some(Duration::try_from_secs_f64(deficit / self.refill_rate).unwrap_or(Duration::MAX))
    }

    fn refill(&self, state: &mut BucketState) {
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();
        state.tokens = (state.tokens + elapsed * self.refill_rate).min(self.capacity);
        state.last_refill = now;
    }
}

impl RateLimiter for TokenBucket {
    fn acquire(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.acquire_tokens(1.0))
    }
}
