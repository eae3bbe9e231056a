//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ConflictPreviewResponse, CreateSessionRequest, ListSessionsParams, PreviewConflictsRequest,
    ScheduledSessionResponse, SessionDetailsResponse, SessionListResponse, SessionResponse,
    UpdateSessionRequest,
};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
