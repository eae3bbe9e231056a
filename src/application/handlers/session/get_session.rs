//! GetSessionHandler - Query handler for a session and its teaching log.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError, SessionLog};
use crate::ports::{SessionLogRepository, SessionStore};

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// A session together with its log, once one was submitted.
#[derive(Debug, Clone)]
pub struct SessionDetails {
    pub session: Session,
    pub log: Option<SessionLog>,
}

pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
    logs: Arc<dyn SessionLogRepository>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, logs: Arc<dyn SessionLogRepository>) -> Self {
        Self { store, logs }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionDetails, SessionError> {
        let session = self
            .store
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(query.session_id))?;
        let log = self.logs.find_by_session(&query.session_id).await?;

        Ok(SessionDetails { session, log })
    }
}
