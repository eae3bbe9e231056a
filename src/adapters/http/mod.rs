//! HTTP adapters - REST API implementations.
//!
//! Each application area has its own HTTP adapter for endpoint exposure.

pub mod error;
pub mod import;
pub mod middleware;
pub mod router;
pub mod session;

pub use error::{ApiError, ErrorResponse};
pub use import::{import_routes, ImportHandlers};
pub use middleware::Actor;
pub use router::api_router;
pub use session::{session_routes, SessionHandlers};
