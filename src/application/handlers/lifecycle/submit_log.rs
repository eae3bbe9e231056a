//! SubmitLogHandler - Stores a teaching log and completes the session.
//!
//! The log is saved before the session moves from PENDING_LOG to
//! COMPLETED. Saving is an upsert per session, so a retry after a failed
//! transition replaces the earlier log.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{
    CommandMetadata, EventId, LifecycleAction, SerializableDomainEvent, SessionStatus, StudentId,
};
use crate::domain::session::{
    Session, SessionError, SessionLog, SessionLogPayload, SessionLogSubmitted,
};
use crate::ports::{EventPublisher, SessionLogRepository, SessionStore, StudentRoster};

#[derive(Debug, Clone)]
pub struct SubmitLogCommand {
    pub payload: SessionLogPayload,
}

#[derive(Debug, Clone)]
pub struct SubmitLogResult {
    pub session: Session,
    pub log: SessionLog,
    pub event: SessionLogSubmitted,
}

pub struct SubmitLogHandler {
    store: Arc<dyn SessionStore>,
    logs: Arc<dyn SessionLogRepository>,
    roster: Arc<dyn StudentRoster>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitLogHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        logs: Arc<dyn SessionLogRepository>,
        roster: Arc<dyn StudentRoster>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            logs,
            roster,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitLogCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitLogResult, SessionError> {
        let session_id = cmd.payload.session_id;
        let session = self
            .store
            .find_by_id(&session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(session_id))?;
        if session.status() != SessionStatus::PendingLog {
            return Err(SessionError::invalid_transition(
                session.status(),
                LifecycleAction::SubmitLog,
            ));
        }

        let roster: Vec<StudentId> = self
            .roster
            .list_by_class(session.class_id())
            .await?
            .into_iter()
            .map(|student| student.id)
            .collect();
        let log = SessionLog::from_payload(cmd.payload, &roster)?;

        self.logs.save(&log).await?;
        let session = self
            .store
            .transition(&session_id, LifecycleAction::SubmitLog)
            .await?
            .session;

        info!(
            session_id = %session_id,
            log_id = %log.id,
            student_notes = log.student_notes.len(),
            absent = log.absent_students().count(),
            "Session log submitted"
        );

        let event = SessionLogSubmitted {
            event_id: EventId::new(),
            session_id,
            log_id: log.id,
            student_note_count: log.student_notes.len(),
            submitted_by: metadata.user_id.clone(),
            submitted_at: log.submitted_at,
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(SubmitLogResult {
            session,
            log,
            event,
        })
    }
}
