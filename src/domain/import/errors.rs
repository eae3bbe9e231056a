//! Import error types.
//!
//! `ImportError` fails a whole upload or job operation. `RowError` marks a
//! single row invalid and never stops the rest of the batch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ImportJobId, ValidationError};

/// Failure of a whole import operation.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv_async::Error),
    #[error("header must be '{expected}', got '{actual}'")]
    HeaderMismatch { expected: String, actual: String },
    #[error("upload contains no data rows")]
    Empty,
    #[error("upload has more than {max} rows")]
    TooManyRows { max: usize },
    #[error("import job not found: {0}")]
    JobNotFound(ImportJobId),
    #[error("row {0} does not exist in this job")]
    UnknownRow(u32),
    #[error("row {0} has unresolved references and cannot take a teacher")]
    RowNotResolved(u32),
    #[error("unknown teacher: {0}")]
    UnknownTeacher(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ImportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ImportError::Io(_) | ImportError::Persistence(_) => ErrorCode::DatabaseError,
            ImportError::Csv(_) | ImportError::HeaderMismatch { .. } => ErrorCode::InvalidFormat,
            ImportError::Empty => ErrorCode::EmptyField,
            ImportError::TooManyRows { .. } => ErrorCode::OutOfRange,
            ImportError::JobNotFound(_) => ErrorCode::ImportJobNotFound,
            ImportError::UnknownRow(_) => ErrorCode::ValidationFailed,
            ImportError::RowNotResolved(_) => ErrorCode::InvalidStateTransition,
            ImportError::UnknownTeacher(_) => ErrorCode::UnknownReference,
        }
    }
}

impl From<DomainError> for ImportError {
    fn from(err: DomainError) -> Self {
        match (err.code, err.detail("job_id").map(str::parse)) {
            (ErrorCode::ImportJobNotFound, Some(Ok(id))) => ImportError::JobNotFound(id),
            _ => ImportError::Persistence(err.to_string()),
        }
    }
}

/// Why a single row is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    /// A name that does not resolve against the catalog.
    #[error("unknown {field}: '{value}'")]
    Reference { field: String, value: String },
    /// A cell that cannot be parsed or is out of range.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },
}

impl RowError {
    pub fn reference(field: impl Into<String>, value: impl Into<String>) -> Self {
        RowError::Reference {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RowError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            RowError::Reference { field, .. } | RowError::Validation { field, .. } => field,
        }
    }
}

impl From<ValidationError> for RowError {
    fn from(err: ValidationError) -> Self {
        RowError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Port-level error for a missing job.
pub fn job_missing(id: &ImportJobId) -> DomainError {
    DomainError::new(
        ErrorCode::ImportJobNotFound,
        format!("Import job not found: {}", id),
    )
    .with_detail("job_id", id.to_string())
}
