//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::Actor;
use crate::application::handlers::{
    CreateSessionHandler, GetSessionHandler, GetSessionQuery, ListSessionsHandler,
    ListSessionsQuery, PreviewConflictsHandler, SubmitLogCommand, SubmitLogHandler,
    TransitionSessionCommand, TransitionSessionHandler, UpdateSessionHandler,
};
use crate::domain::foundation::{LifecycleAction, SessionId};
use crate::domain::session::SessionLogPayload;

use super::dto::{
    ConflictPreviewResponse, CreateSessionRequest, ListSessionsParams, PreviewConflictsRequest,
    ScheduledSessionResponse, SessionDetailsResponse, SessionListResponse, SessionResponse,
    UpdateSessionRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    pub create: Arc<CreateSessionHandler>,
    pub update: Arc<UpdateSessionHandler>,
    pub get: Arc<GetSessionHandler>,
    pub list: Arc<ListSessionsHandler>,
    pub preview: Arc<PreviewConflictsHandler>,
    pub transition: Arc<TransitionSessionHandler>,
    pub submit_log: Arc<SubmitLogHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Schedule a session
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    actor: Actor,
    Json(req): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = handlers.create.handle(req.into(), actor.metadata()).await?;
    let response = ScheduledSessionResponse {
        session: SessionResponse::from(&result.session),
        verdict: result.verdict,
        report: result.report,
        assignment: result.assignment,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/sessions - List sessions by class, subject, teacher, status or window
pub async fn list_sessions(
    State(handlers): State<SessionHandlers>,
    Query(params): Query<ListSessionsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = handlers
        .list
        .handle(ListSessionsQuery {
            filter: params.into(),
        })
        .await?;
    Ok(Json(SessionListResponse::from(sessions)))
}

/// GET /api/sessions/:id - Session with its log
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let details = handlers.get.handle(GetSessionQuery { session_id }).await?;
    Ok(Json(SessionDetailsResponse::from(details)))
}

/// PATCH /api/sessions/:id - Edit fields; status is untouched
pub async fn update_session(
    State(handlers): State<SessionHandlers>,
    actor: Actor,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = handlers
        .update
        .handle(req.into_command(session_id), actor.metadata())
        .await?;
    Ok(Json(ScheduledSessionResponse {
        session: SessionResponse::from(&result.session),
        verdict: result.verdict,
        report: result.report,
        assignment: None,
    }))
}

/// POST /api/sessions/conflicts - Evaluate a draft without saving
pub async fn preview_conflicts(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<PreviewConflictsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let preview = handlers.preview.handle(req.into()).await?;
    Ok(Json(ConflictPreviewResponse::from(preview)))
}

/// POST /api/sessions/:id/start
pub async fn start_session(
    state: State<SessionHandlers>,
    actor: Actor,
    path: Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, actor, path, LifecycleAction::Start).await
}

/// POST /api/sessions/:id/end
pub async fn end_session(
    state: State<SessionHandlers>,
    actor: Actor,
    path: Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, actor, path, LifecycleAction::End).await
}

/// POST /api/sessions/:id/cancel
pub async fn cancel_session(
    state: State<SessionHandlers>,
    actor: Actor,
    path: Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    transition(state, actor, path, LifecycleAction::Cancel).await
}

/// POST /api/sessions/:id/log - Submit the teaching log and complete the session
pub async fn submit_log(
    State(handlers): State<SessionHandlers>,
    actor: Actor,
    Path(session_id): Path<String>,
    Json(payload): Json<SessionLogPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    if payload.session_id != session_id {
        return Err(ApiError::bad_request("session_id does not match the path"));
    }
    let result = handlers
        .submit_log
        .handle(SubmitLogCommand { payload }, actor.metadata())
        .await?;
    Ok(Json(SessionDetailsResponse {
        session: SessionResponse::from(&result.session),
        log: Some(result.log),
    }))
}

async fn transition(
    State(handlers): State<SessionHandlers>,
    actor: Actor,
    Path(session_id): Path<String>,
    action: LifecycleAction,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = handlers
        .transition
        .handle(TransitionSessionCommand { session_id, action }, actor.metadata())
        .await?;
    Ok(Json(SessionResponse::from(&result.session)))
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse::<SessionId>()
        .map_err(|_| ApiError::bad_request("Invalid session ID"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_a_bad_request() {
        let err = parse_session_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
