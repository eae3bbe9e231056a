//! ListSessionsHandler - Query handler for filtered session listings.

use std::sync::Arc;

use crate::domain::session::{Session, SessionError};
use crate::ports::{SessionFilter, SessionStore};

/// Query to list sessions; results are ordered by start time.
#[derive(Debug, Clone, Default)]
pub struct ListSessionsQuery {
    pub filter: SessionFilter,
}

pub struct ListSessionsHandler {
    store: Arc<dyn SessionStore>,
}

impl ListSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListSessionsQuery) -> Result<Vec<Session>, SessionError> {
        if let (Some(from), Some(to)) = (query.filter.from, query.filter.to) {
            if to <= from {
                return Err(SessionError::validation("to", "window end must be after its start"));
            }
        }
        Ok(self.store.list(&query.filter).await?)
    }
}
