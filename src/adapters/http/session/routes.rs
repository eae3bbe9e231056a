//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_session, create_session, end_session, get_session, list_sessions, preview_conflicts,
    start_session, submit_log, update_session, SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(create_session).get(list_sessions))
        .route("/conflicts", post(preview_conflicts))
        .route("/:id", get(get_session).patch(update_session))
        .route("/:id/start", post(start_session))
        .route("/:id/end", post(end_session))
        .route("/:id/cancel", post(cancel_session))
        .route("/:id/log", post(submit_log))
        .with_state(handlers)
}
