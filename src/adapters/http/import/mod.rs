//! HTTP adapter for the bulk import pipeline.

mod dto;
mod handlers;
mod routes;

pub use dto::{CommitResponse, ImportReviewResponse, ImportRowResponse, OverrideTeacherRequest};
pub use handlers::ImportHandlers;
pub use routes::import_routes;
