//! Pure decisions for the 123pan protocol.
//!
//! Nothing here performs I/O: header sets, login bodies, endpoint URLs, query
//! composition and pagination rules are computed from plain values so the
//! effects layer only has to send them.

pub mod account;
pub mod pagination;
pub mod protocol;
pub mod query;

pub use account::is_email;
pub use pagination::{NEXT_SENTINEL, Reconciliation, is_last_page, list_query, reconcile};
pub use protocol::{Endpoints, headers, login_body};
