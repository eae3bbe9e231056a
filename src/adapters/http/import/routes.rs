//! HTTP routes for import endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    commit, discard, download_reference, download_template, override_teacher, review, upload,
    ImportHandlers,
};

pub fn import_routes(handlers: ImportHandlers) -> Router {
    Router::new()
        .route("/", post(upload))
        .route("/template", get(download_template))
        .route("/reference", get(download_reference))
        .route("/:job_id", get(review).delete(discard))
        .route("/:job_id/rows/:row_number/teacher", put(override_teacher))
        .route("/:job_id/commit", post(commit))
        .with_state(handlers)
}
