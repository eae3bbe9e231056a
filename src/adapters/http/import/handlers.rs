//! HTTP handlers for import endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::Actor;
use crate::application::handlers::{
    CommitImportCommand, CommitImportHandler, DiscardImportCommand, DiscardImportHandler,
    GenerateTemplateHandler, ImportReview,
    OverrideTeacherCommand, OverrideTeacherHandler, ParseImportCommand, ParseImportHandler,
    ReviewImportHandler, ReviewImportQuery, TemplateKind,
};
use crate::domain::foundation::ImportJobId;

use super::dto::{CommitResponse, ImportReviewResponse, OverrideTeacherRequest};

#[derive(Clone)]
pub struct ImportHandlers {
    pub template: Arc<GenerateTemplateHandler>,
    pub parse: Arc<ParseImportHandler>,
    pub review: Arc<ReviewImportHandler>,
    pub override_teacher: Arc<OverrideTeacherHandler>,
    pub commit: Arc<CommitImportHandler>,
    pub discard: Arc<DiscardImportHandler>,
}

/// GET /api/imports/template - Empty upload template
pub async fn download_template(
    State(handlers): State<ImportHandlers>,
) -> Result<impl IntoResponse, ApiError> {
    csv_download(&handlers, TemplateKind::Upload).await
}

/// GET /api/imports/reference - Valid board, class, subject and teacher names
pub async fn download_reference(
    State(handlers): State<ImportHandlers>,
) -> Result<impl IntoResponse, ApiError> {
    csv_download(&handlers, TemplateKind::Reference).await
}

/// POST /api/imports - Upload a CSV body and parse it into a job
pub async fn upload(
    State(handlers): State<ImportHandlers>,
    actor: Actor,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let job = handlers
        .parse
        .handle(
            ParseImportCommand {
                content: body.to_vec(),
            },
            actor.metadata(),
        )
        .await?;
    let response = ImportReviewResponse::from(ImportReview::from(&job));
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/imports/:job_id - Review a parsed job
pub async fn review(
    State(handlers): State<ImportHandlers>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let job_id = parse_job_id(&job_id)?;
    let review = handlers.review.handle(ReviewImportQuery { job_id }).await?;
    Ok(Json(ImportReviewResponse::from(review)))
}

/// PUT /api/imports/:job_id/rows/:row/teacher - Override one row's teacher
pub async fn override_teacher(
    State(handlers): State<ImportHandlers>,
    Path((job_id, row_number)): Path<(String, u32)>,
    Json(req): Json<OverrideTeacherRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let job_id = parse_job_id(&job_id)?;
    let review = handlers
        .override_teacher
        .handle(OverrideTeacherCommand {
            job_id,
            row_number,
            teacher_id: req.teacher_id,
        })
        .await?;
    Ok(Json(ImportReviewResponse::from(review)))
}

/// POST /api/imports/:job_id/commit - Create sessions from the valid rows
pub async fn commit(
    State(handlers): State<ImportHandlers>,
    actor: Actor,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let job_id = parse_job_id(&job_id)?;
    let result = handlers
        .commit
        .handle(CommitImportCommand { job_id }, actor.metadata())
        .await?;
    Ok(Json(CommitResponse::from(result)))
}

/// DELETE /api/imports/:job_id - Drop a job without committing it
pub async fn discard(
    State(handlers): State<ImportHandlers>,
    Path(job_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let job_id = parse_job_id(&job_id)?;
    handlers.discard.handle(DiscardImportCommand { job_id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn csv_download(
    handlers: &ImportHandlers,
    kind: TemplateKind,
) -> Result<impl IntoResponse, ApiError> {
    let template = handlers.template.handle(kind).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", template.file_name),
            ),
        ],
        template.content,
    ))
}

fn parse_job_id(raw: &str) -> Result<ImportJobId, ApiError> {
    raw.parse::<ImportJobId>()
        .map_err(|_| ApiError::bad_request("Invalid import job ID"))
}
