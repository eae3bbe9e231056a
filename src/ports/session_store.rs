//! Session store port.
//!
//! Owns persisted sessions. Edits are last-write-wins; lifecycle
//! transitions are applied by the store so the status check and the
//! write happen together.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClassId, DomainError, LifecycleAction, SessionId, SessionStatus, SubjectId, TeacherId,
    Timestamp,
};
use crate::domain::session::Session;

/// Store port for Session aggregates.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, session: &Session) -> Result<(), DomainError>;

    /// Overwrite an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Sessions matching the filter, ordered by start time.
    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError>;

    /// Apply a lifecycle action and return the updated session together
    /// with the status it was read in under the same lock.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `InvalidStateTransition` if the action is not allowed; status is unchanged
    /// - `DatabaseError` on persistence failure
    async fn transition(
        &self,
        id: &SessionId,
        action: LifecycleAction,
    ) -> Result<StatusTransition, DomainError>;
}

/// A session after a lifecycle action, with the status it left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub from: SessionStatus,
    pub session: Session,
}

/// Listing filter; unset fields match everything.
///
/// `from`/`to` select sessions whose slot intersects `[from, to)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFilter {
    pub class_id: Option<ClassId>,
    pub subject_id: Option<SubjectId>,
    pub teacher_id: Option<TeacherId>,
    pub status: Option<SessionStatus>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl SessionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_teacher(teacher_id: TeacherId) -> Self {
        Self {
            teacher_id: Some(teacher_id),
            ..Self::default()
        }
    }

    pub fn between(mut self, from: Timestamp, to: Timestamp) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn matches(&self, session: &Session) -> bool {
        self.class_id.map_or(true, |c| &c == session.class_id())
            && self.subject_id.map_or(true, |s| &s == session.subject_id())
            && self
                .teacher_id
                .map_or(true, |t| session.teacher_id() == Some(&t))
            && self.status.map_or(true, |s| s == session.status())
            && self.to.map_or(true, |to| session.start_time() < to)
            && self.from.map_or(true, |from| from < session.end_time())
    }
}
