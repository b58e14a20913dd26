//! I/O: transport, session handling, request execution and listing.
//!
//! Everything that talks to the network or sleeps lives here. Decisions are
//! delegated to [`crate::core`]; this layer sequences them.

mod auth;
mod client;
mod executor;
mod http;
mod lister;
mod rate;

pub use client::Pan123;
pub use executor::{MAX_ATTEMPTS, RequestSpec};
pub use http::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, Method};
pub use rate::{RateLimiter, TokenBucket};

#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;
