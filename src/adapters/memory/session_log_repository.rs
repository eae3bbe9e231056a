use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::SessionLog;
use crate::ports::SessionLogRepository;

/// In-memory log store keyed by session.
#[derive(Default)]
pub struct InMemorySessionLogRepository {
    logs: RwLock<HashMap<SessionId, SessionLog>>,
}

impl InMemorySessionLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }
}

#[async_trait]
impl SessionLogRepository for InMemorySessionLogRepository {
    async fn save(&self, log: &SessionLog) -> Result<(), DomainError> {
        self.logs.write().await.insert(log.session_id, log.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionLog>, DomainError> {
        Ok(self.logs.read().await.get(session_id).cloned())
    }
}
