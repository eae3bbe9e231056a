//! Session domain events.
//!
//! - `SessionScheduled` - New session persisted
//! - `SessionUpdated` - Session fields edited
//! - `SessionStatusChanged` - Lifecycle action applied
//! - `SessionLogSubmitted` - Teaching log recorded for a session

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, ClassId, EventId, LifecycleAction, SessionId, SessionLogId, SessionStatus,
    SubjectId, TeacherId, Timestamp, UserId,
};
use crate::domain::scheduling::ConflictVerdict;

// ════════════════════════════════════════════════════════════════════════════
// SessionScheduled
// ════════════════════════════════════════════════════════════════════════════

/// Published when a session is created, interactively or by import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionScheduled {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub scheduled_by: UserId,
    pub title: String,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: Option<TeacherId>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Conflict verdict at the moment of scheduling.
    pub verdict: ConflictVerdict,
    pub scheduled_at: Timestamp,
}

domain_event!(
    SessionScheduled,
    event_type = "session.scheduled.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = scheduled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a session's fields are edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUpdated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub updated_by: UserId,
    /// Names of the fields that changed.
    pub changed_fields: Vec<String>,
    pub verdict: ConflictVerdict,
    pub updated_at: Timestamp,
}

domain_event!(
    SessionUpdated,
    event_type = "session.updated.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = updated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionStatusChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published after a lifecycle action is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusChanged {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub action: LifecycleAction,
    pub from: SessionStatus,
    pub to: SessionStatus,
    pub changed_by: UserId,
    pub changed_at: Timestamp,
}

domain_event!(
    SessionStatusChanged,
    event_type = "session.status_changed.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = changed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SessionLogSubmitted
// ════════════════════════════════════════════════════════════════════════════

/// Published once a log is stored and the session is completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLogSubmitted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub log_id: SessionLogId,
    pub student_note_count: usize,
    pub submitted_by: UserId,
    pub submitted_at: Timestamp,
}

domain_event!(
    SessionLogSubmitted,
    event_type = "session.log_submitted.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = submitted_at,
    event_id = event_id
);
