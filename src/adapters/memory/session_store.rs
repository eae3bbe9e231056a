//! In-memory session store.
//!
//! Suitable for tests and single-process development. Does not persist
//! across restarts.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, LifecycleAction, SessionId};
use crate::domain::session::{session_missing, transition_rejected, Session};
use crate::ports::{SessionFilter, SessionStore, StatusTransition};

/// In-memory implementation of the SessionStore port.
///
/// Transitions hold the write lock across check and write, matching the
/// row lock the Postgres adapter takes.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<Vec<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        Self {
            sessions: RwLock::new(sessions),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        self.sessions.write().await.push(session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let existing = sessions
            .iter_mut()
            .find(|s| s.id() == session.id())
            .ok_or_else(|| session_missing(session.id()))?;
        *existing = session.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
        let mut matching: Vec<Session> = self
            .sessions
            .read()
            .await
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        matching.sort_by_key(|s| s.start_time());
        Ok(matching)
    }

    async fn transition(
        &self,
        id: &SessionId,
        action: LifecycleAction,
    ) -> Result<StatusTransition, DomainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| session_missing(id))?;
        let from = session.status();
        session
            .apply(action)
            .map_err(|_| transition_rejected(id, from, action))?;
        Ok(StatusTransition {
            from,
            session: session.clone(),
        })
    }
}
