//! HTTP middleware for axum.
//!
//! - `actor` - Extractor for the administrator making the request

pub mod actor;

pub use actor::{Actor, ActorRejection, REQUEST_ID_HEADER, USER_ID_HEADER};
