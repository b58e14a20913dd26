//! Immutable data types for the 123pan client.
//!
//! Configuration, identity and wire structures live here. Apart from the
//! bearer token held by [`Credential`], nothing in this layer changes after
//! construction.

pub mod config;
pub mod credential;
pub mod identity;
pub mod model;

pub use config::{DriverConfig, ProtocolMode, PROTOCOL_ENV};
pub use credential::Credential;
pub use identity::IdentityProfile;
pub use model::{Envelope, FileEntry, FileKind, ListData, LoginData, Status, UserInfo};
