//! Client adapter for the 123pan cloud storage backend.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration, identity and wire types
//! - [`core`] - Pure protocol decisions (headers, login bodies, URLs, paging)
//! - `effects` - Transport, session refresh, request execution and listing
//!
//! # Key Features
//!
//! - **Two emulations**: mobile-app (unsigned) or browser (signed URLs),
//!   chosen once per client
//! - **One-shot re-authentication**: a session-expired answer triggers a
//!   single, serialized login and one retry
//! - **Bounded pagination**: listings stop on the end sentinel, an empty page,
//!   or a page ceiling
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> pan123::Result<()> {
//! use pan123::{DriverConfig, Pan123};
//!
//! let client = Pan123::new(DriverConfig::from_env("alice@example.com", "secret"))?;
//! client.login().await?;
//! for entry in client.list_directory(0).await? {
//!     println!("{} {}", entry.id, entry.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
mod effects;
mod error;

pub use crate::core::NEXT_SENTINEL;
pub use data::{
    Credential, DriverConfig, Envelope, FileEntry, FileKind, IdentityProfile, ListData, LoginData,
    ProtocolMode, Status, UserInfo, PROTOCOL_ENV,
};
pub use effects::{
    BoxFuture, HttpRequest, HttpResponse, HttpTransport, MAX_ATTEMPTS, Method, Pan123,
    RateLimiter, RequestSpec, TokenBucket,
};
pub use error::{Error, Result, TransportError};
pub use pan123_sign::{SignaturePair, sign, sign_at};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestTransport;
