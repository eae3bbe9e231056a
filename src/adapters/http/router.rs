//! Router configuration for the HTTP API.
//!
//! Nests the session and import routers under `/api` and applies request
//! ids, tracing and the request timeout.

use std::time::Duration;

use axum::{http::HeaderName, routing::get, Json, Router};
use serde_json::json;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::import::{import_routes, ImportHandlers};
use super::middleware::REQUEST_ID_HEADER;
use super::session::{session_routes, SessionHandlers};

/// Create the application router with all routes and middleware.
pub fn api_router(
    sessions: SessionHandlers,
    imports: ImportHandlers,
    request_timeout: Duration,
) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/sessions", session_routes(sessions))
        .nest("/api/imports", import_routes(imports))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
