//! Error responses shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::domain::foundation::ErrorCode;
use crate::domain::import::ImportError;
use crate::domain::session::SessionError;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// An error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::bad_request(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn from_code(code: ErrorCode, message: String) -> Self {
        let status = status_for(code);
        if status.is_server_error() {
            error!(code = %code, message = %message, "Request failed");
        }
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::UnknownReference => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::SessionNotFound | ErrorCode::ImportJobNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let details = match &err {
            SessionError::ValidationFailed { field, .. }
            | SessionError::UnknownReference { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            SessionError::InvalidTransition { from, action } => {
                Some(serde_json::json!({ "from": from, "action": action }))
            }
            _ => None,
        };
        let mut api = Self::from_code(err.code(), err.message());
        if let Some(details) = details {
            api.body = api.body.with_details(details);
        }
        api
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        Self::from_code(err.code(), err.to_string())
    }
}
