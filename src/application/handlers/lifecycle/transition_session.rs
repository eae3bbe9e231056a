//! TransitionSessionHandler - Command handler for start, end and cancel.
//!
//! The store applies the action so the status check and the write happen
//! together. Completing a session goes through `SubmitLogHandler`.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{
    CommandMetadata, EventId, LifecycleAction, SerializableDomainEvent, SessionId, Timestamp,
};
use crate::domain::session::{Session, SessionError, SessionStatusChanged};
use crate::ports::{EventPublisher, SessionStore, StatusTransition};

/// Command to move a session along its lifecycle.
#[derive(Debug, Clone)]
pub struct TransitionSessionCommand {
    pub session_id: SessionId,
    pub action: LifecycleAction,
}

#[derive(Debug, Clone)]
pub struct TransitionSessionResult {
    pub session: Session,
    pub event: SessionStatusChanged,
}

pub struct TransitionSessionHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl TransitionSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: TransitionSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<TransitionSessionResult, SessionError> {
        if cmd.action == LifecycleAction::SubmitLog {
            return Err(SessionError::validation(
                "action",
                "sessions are completed by submitting their log",
            ));
        }

        let StatusTransition { from, session } =
            self.store.transition(&cmd.session_id, cmd.action).await?;

        info!(
            session_id = %cmd.session_id,
            action = %cmd.action,
            from = %from,
            to = %session.status(),
            "Session status changed"
        );

        let event = SessionStatusChanged {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            action: cmd.action,
            from,
            to: session.status(),
            changed_by: metadata.user_id.clone(),
            changed_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(TransitionSessionResult { session, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::adapters::memory::InMemorySessionStore;
    use crate::application::handlers::test_support::{metadata, Harness};
    use crate::domain::foundation::{DomainError, SessionStatus};
    use crate::domain::session::fixtures::{at, session_with, slot};
    use crate::ports::SessionFilter;

    async fn scheduled(h: &Harness) -> Session {
        let s = session_with(Some(h.sample.asha), slot(at(2026, 1, 5, 9, 0), 45));
        h.store.create(&s).await.unwrap();
        s
    }

    fn handler(h: &Harness) -> TransitionSessionHandler {
        TransitionSessionHandler::new(h.store.clone(), h.bus.clone())
    }

    fn cmd(session: &Session, action: LifecycleAction) -> TransitionSessionCommand {
        TransitionSessionCommand {
            session_id: *session.id(),
            action,
        }
    }

    #[tokio::test]
    async fn start_then_end_reaches_pending_log() {
        let h = Harness::new();
        let s = scheduled(&h).await;

        let started = handler(&h).handle(cmd(&s, LifecycleAction::Start), metadata()).await.unwrap();
        assert_eq!(started.session.status(), SessionStatus::InProgress);
        assert_eq!(started.event.from, SessionStatus::Scheduled);

        let ended = handler(&h).handle(cmd(&s, LifecycleAction::End), metadata()).await.unwrap();
        assert_eq!(ended.session.status(), SessionStatus::PendingLog);
        assert_eq!(h.bus.events_of_type("session.status_changed.v1").len(), 2);
    }

    #[tokio::test]
    async fn cancel_from_in_progress() {
        let h = Harness::new();
        let s = scheduled(&h).await;
        handler(&h).handle(cmd(&s, LifecycleAction::Start), metadata()).await.unwrap();

        let result = handler(&h).handle(cmd(&s, LifecycleAction::Cancel), metadata()).await.unwrap();
        assert_eq!(result.session.status(), SessionStatus::Cancelled);
    }

    #[tokio::test]
    async fn invalid_transition_leaves_status_unchanged() {
        let h = Harness::new();
        let s = scheduled(&h).await;

        let result = handler(&h).handle(cmd(&s, LifecycleAction::End), metadata()).await;

        assert_eq!(
            result.unwrap_err(),
            SessionError::invalid_transition(SessionStatus::Scheduled, LifecycleAction::End)
        );
        let stored = h.store.find_by_id(s.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), SessionStatus::Scheduled);
        assert_eq!(h.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn cancelled_session_cannot_start() {
        let h = Harness::new();
        let s = scheduled(&h).await;
        handler(&h).handle(cmd(&s, LifecycleAction::Cancel), metadata()).await.unwrap();

        let result = handler(&h).handle(cmd(&s, LifecycleAction::Start), metadata()).await;
        assert!(matches!(result, Err(SessionError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn submit_log_is_not_a_plain_transition() {
        let h = Harness::new();
        let s = scheduled(&h).await;
        let result = handler(&h).handle(cmd(&s, LifecycleAction::SubmitLog), metadata()).await;
        assert!(matches!(result, Err(SessionError::ValidationFailed { .. })));
    }

    /// Store whose plain reads lag behind its writes.
    struct LaggingReads(InMemorySessionStore);

    #[async_trait]
    impl SessionStore for LaggingReads {
        async fn create(&self, session: &Session) -> Result<(), DomainError> {
            self.0.create(session).await
        }

        async fn update(&self, session: &Session) -> Result<(), DomainError> {
            self.0.update(session).await
        }

        async fn find_by_id(&self, _id: &SessionId) -> Result<Option<Session>, DomainError> {
            Ok(None)
        }

        async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
            self.0.list(filter).await
        }

        async fn transition(
            &self,
            id: &SessionId,
            action: LifecycleAction,
        ) -> Result<StatusTransition, DomainError> {
            self.0.transition(id, action).await
        }
    }

    #[tokio::test]
    async fn event_records_the_status_the_store_transitioned_from() {
        let h = Harness::new();
        let store = Arc::new(LaggingReads(InMemorySessionStore::new()));
        let s = session_with(Some(h.sample.asha), slot(at(2026, 1, 5, 9, 0), 45));
        store.create(&s).await.unwrap();
        store.0.transition(s.id(), LifecycleAction::Start).await.unwrap();

        let result = TransitionSessionHandler::new(store.clone(), h.bus.clone())
            .handle(cmd(&s, LifecycleAction::End), metadata())
            .await
            .unwrap();

        assert_eq!(result.event.from, SessionStatus::InProgress);
        assert_eq!(result.event.to, SessionStatus::PendingLog);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let h = Harness::new();
        let id = SessionId::new();
        let result = handler(&h)
            .handle(
                TransitionSessionCommand {
                    session_id: id,
                    action: LifecycleAction::Start,
                },
                metadata(),
            )
            .await;
        assert_eq!(result.unwrap_err(), SessionError::NotFound(id));
    }
}
