//! Session-specific error types.

use crate::domain::foundation::{
    DomainError, ErrorCode, LifecycleAction, SessionId, SessionStatus, ValidationError,
};

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Lifecycle action is not an edge out of the current status.
    InvalidTransition {
        from: SessionStatus,
        action: LifecycleAction,
    },
    /// Required field missing or malformed.
    ValidationFailed { field: String, message: String },
    /// Id does not resolve to a known catalog record.
    UnknownReference { field: String, value: String },
    /// Store-layer failure.
    Persistence(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn invalid_transition(from: SessionStatus, action: LifecycleAction) -> Self {
        SessionError::InvalidTransition { from, action }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn unknown_reference(field: impl Into<String>, value: impl ToString) -> Self {
        SessionError::UnknownReference {
            field: field.into(),
            value: value.to_string(),
        }
    }
    pub fn persistence(message: impl Into<String>) -> Self {
        SessionError::Persistence(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::UnknownReference { .. } => ErrorCode::UnknownReference,
            SessionError::Persistence(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::InvalidTransition { from, action } => {
                format!("Cannot {} a session that is {}", action, from)
            }
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::UnknownReference { field, value } => {
                format!("Unknown {}: {}", field, value)
            }
            SessionError::Persistence(msg) => format!("Persistence error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => match err.detail("session_id").map(str::parse) {
                Some(Ok(id)) => SessionError::NotFound(id),
                _ => SessionError::Persistence(err.to_string()),
            },
            ErrorCode::InvalidStateTransition => {
                let from = err.detail("from").and_then(SessionStatus::parse);
                let action = err.detail("action").and_then(parse_action);
                match (from, action) {
                    (Some(from), Some(action)) => SessionError::InvalidTransition { from, action },
                    _ => SessionError::Persistence(err.to_string()),
                }
            }
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => SessionError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::UnknownReference => SessionError::UnknownReference {
                field: err.detail("field").unwrap_or("reference").to_string(),
                value: err.message,
            },
            _ => SessionError::Persistence(err.to_string()),
        }
    }
}

fn parse_action(s: &str) -> Option<LifecycleAction> {
    [
        LifecycleAction::Start,
        LifecycleAction::End,
        LifecycleAction::SubmitLog,
        LifecycleAction::Cancel,
    ]
    .into_iter()
    .find(|a| a.to_string() == s)
}

/// Port-level error for an action the session's status does not allow.
pub fn transition_rejected(
    id: &SessionId,
    from: SessionStatus,
    action: LifecycleAction,
) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidStateTransition,
        format!("Cannot {} session {} in status {}", action, id, from),
    )
    .with_detail("session_id", id.to_string())
    .with_detail("from", from.as_str())
    .with_detail("action", action.to_string())
}

/// Port-level error for a missing session.
pub fn session_missing(id: &SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
        .with_detail("session_id", id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_survives_the_port_boundary() {
        let id = SessionId::new();
        let err: SessionError =
            transition_rejected(&id, SessionStatus::Scheduled, LifecycleAction::SubmitLog).into();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                from: SessionStatus::Scheduled,
                action: LifecycleAction::SubmitLog,
            }
        );
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn not_found_survives_the_port_boundary() {
        let id = SessionId::new();
        let err: SessionError = session_missing(&id).into();
        assert_eq!(err, SessionError::NotFound(id));
    }

    #[test]
    fn database_errors_become_persistence_errors() {
        let err: SessionError = DomainError::database("connection reset").into();
        assert!(matches!(err, SessionError::Persistence(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn validation_errors_keep_their_field() {
        let err: SessionError = ValidationError::empty_field("topics_covered").into();
        assert!(matches!(
            err,
            SessionError::ValidationFailed { ref field, .. } if field == "topics_covered"
        ));
    }

    #[test]
    fn invalid_transition_message_names_action_and_status() {
        let err = SessionError::invalid_transition(SessionStatus::Completed, LifecycleAction::Cancel);
        assert_eq!(err.to_string(), "Cannot cancel a session that is COMPLETED");
    }
}
