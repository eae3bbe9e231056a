//! Session log repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::SessionLog;

/// Persists teaching logs. A session has at most one log.
#[async_trait]
pub trait SessionLogRepository: Send + Sync {
    /// Store a log, replacing any earlier log for the same session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, log: &SessionLog) -> Result<(), DomainError>;

    async fn find_by_session(&self, session_id: &SessionId)
        -> Result<Option<SessionLog>, DomainError>;
}
