//! UpdateSessionHandler - Command handler for editing a session.
//!
//! Edits are allowed in every status and never move the lifecycle. The
//! title is never regenerated and the teacher is never auto-assigned on
//! edit. The session is excluded from its own overlap check.

use std::sync::Arc;

use tracing::info;

use super::conflict_inputs::{check_references, ConflictInputs, References};
use crate::domain::foundation::{
    ChapterId, ClassId, CommandMetadata, EventId, SchoolClock, SerializableDomainEvent,
    SessionId, SubjectId, TeacherId, TimeSlot, Timestamp, TopicId,
};
use crate::domain::scheduling::{ConflictReport, ConflictVerdict};
use crate::domain::session::{Session, SessionError, SessionUpdated};
use crate::ports::{AllocationRegistry, CalendarService, CatalogReader, EventPublisher, SessionStore};

/// New class/subject placement, replacing the outline as a whole.
#[derive(Debug, Clone, Copy)]
pub struct SubjectChange {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub chapter_id: Option<ChapterId>,
    pub topic_id: Option<TopicId>,
}

/// Command to edit a session. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSessionCommand {
    pub session_id: SessionId,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    /// Moving only the start keeps the duration.
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub subject: Option<SubjectChange>,
    /// `Some(None)` unassigns the teacher.
    pub teacher_id: Option<Option<TeacherId>>,
}

/// Result of a session edit.
#[derive(Debug, Clone)]
pub struct UpdateSessionResult {
    pub session: Session,
    pub verdict: ConflictVerdict,
    pub report: ConflictReport,
    /// `None` when the command changed nothing.
    pub event: Option<SessionUpdated>,
}

pub struct UpdateSessionHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<dyn CatalogReader>,
    registry: Arc<dyn AllocationRegistry>,
    calendar: Arc<dyn CalendarService>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: SchoolClock,
}

impl UpdateSessionHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<dyn CatalogReader>,
        registry: Arc<dyn AllocationRegistry>,
        calendar: Arc<dyn CalendarService>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: SchoolClock,
    ) -> Self {
        Self {
            store,
            catalog,
            registry,
            calendar,
            event_publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateSessionResult, SessionError> {
        let mut session = self
            .store
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;

        if cmd.subject.is_some() || matches!(cmd.teacher_id, Some(Some(_))) {
            let catalog = self.catalog.load().await?;
            let placement = cmd.subject.unwrap_or(SubjectChange {
                class_id: *session.class_id(),
                subject_id: *session.subject_id(),
                chapter_id: session.chapter_id().copied(),
                topic_id: session.topic_id().copied(),
            });
            check_references(
                &catalog,
                &References {
                    class_id: placement.class_id,
                    subject_id: placement.subject_id,
                    chapter_id: placement.chapter_id,
                    topic_id: placement.topic_id,
                    teacher_id: cmd.teacher_id.flatten(),
                },
            )?;
        }

        let mut changed_fields = Vec::new();

        if let Some(title) = cmd.title {
            if title != session.title() {
                session.rename(title)?;
                changed_fields.push("title".to_string());
            }
        }
        if let Some(description) = cmd.description {
            if description.as_deref() != session.description() {
                session.update_description(description);
                changed_fields.push("description".to_string());
            }
        }
        if cmd.start_time.is_some() || cmd.end_time.is_some() {
            let slot = moved_slot(session.slot(), cmd.start_time, cmd.end_time)?;
            if &slot != session.slot() {
                session.reschedule(slot);
                changed_fields.push("time".to_string());
            }
        }
        if let Some(change) = cmd.subject {
            session.change_subject(
                change.class_id,
                change.subject_id,
                change.chapter_id,
                change.topic_id,
            )?;
            changed_fields.push("subject".to_string());
        }
        if let Some(teacher_id) = cmd.teacher_id {
            if teacher_id.as_ref() != session.teacher_id() {
                session.assign_teacher(teacher_id);
                changed_fields.push("teacher".to_string());
            }
        }

        let candidate = session.candidate();
        let allocations = ConflictInputs::allocations_for(
            self.registry.as_ref(),
            candidate.class_id,
            candidate.subject_id,
        )
        .await?;
        let inputs = ConflictInputs::gather(
            self.store.as_ref(),
            self.calendar.as_ref(),
            allocations,
            &candidate,
            &self.clock,
        )
        .await?;
        let report = inputs.report(&candidate, self.clock);
        let verdict = report.verdict();

        if changed_fields.is_empty() {
            return Ok(UpdateSessionResult {
                session,
                verdict,
                report,
                event: None,
            });
        }

        self.store.update(&session).await?;

        info!(
            session_id = %session.id(),
            changed = ?changed_fields,
            conflict = ?verdict.conflict_type,
            "Session updated"
        );

        let event = SessionUpdated {
            event_id: EventId::new(),
            session_id: *session.id(),
            updated_by: metadata.user_id.clone(),
            changed_fields,
            verdict,
            updated_at: *session.updated_at(),
        };

        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());

        self.event_publisher.publish(envelope).await?;

        Ok(UpdateSessionResult {
            session,
            verdict,
            report,
            event: Some(event),
        })
    }
}

fn moved_slot(
    current: &TimeSlot,
    start: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Result<TimeSlot, SessionError> {
    let slot = match (start, end) {
        (Some(start), None) => TimeSlot::starting_at(start, current.minutes())?,
        (start, end) => TimeSlot::new(
            start.unwrap_or_else(|| current.start()),
            end.unwrap_or_else(|| current.end()),
        )?,
    };
    Ok(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{metadata, Harness};
    use crate::domain::foundation::{LifecycleAction, SessionStatus};
    use crate::domain::scheduling::ConflictType;
    use crate::domain::session::fixtures::{at, slot};
    use crate::domain::session::NewSession;

    fn handler(h: &Harness) -> UpdateSessionHandler {
        UpdateSessionHandler::new(
            h.store.clone(),
            h.catalog.clone(),
            h.registry.clone(),
            h.calendar.clone(),
            h.bus.clone(),
            SchoolClock::utc(),
        )
    }

    async fn seeded(h: &Harness, teacher: Option<TeacherId>, start: Timestamp) -> Session {
        let session = Session::schedule(
            SessionId::new(),
            NewSession {
                title: "2601050900-CBSE-Class 5B-Science (2526)".into(),
                description: None,
                slot: slot(start, 45),
                class_id: h.sample.class_5b,
                subject_id: h.sample.science,
                chapter_id: None,
                topic_id: None,
                teacher_id: teacher,
            },
        )
        .unwrap();
        h.store.create(&session).await.unwrap();
        session
    }

    fn edit(id: SessionId) -> UpdateSessionCommand {
        UpdateSessionCommand {
            session_id: id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn moving_start_keeps_duration_and_title() {
        let h = Harness::new();
        let s = seeded(&h, Some(h.sample.asha), at(2026, 1, 5, 9, 0)).await;
        let mut cmd = edit(*s.id());
        cmd.start_time = Some(at(2026, 1, 5, 11, 0));
        let result = handler(&h).handle(cmd, metadata()).await.unwrap();

        assert_eq!(result.session.end_time(), at(2026, 1, 5, 11, 45));
        assert_eq!(result.session.title(), s.title());
        assert_eq!(
            result.event.unwrap().changed_fields,
            vec!["time".to_string()]
        );
    }

    #[tokio::test]
    async fn session_does_not_overlap_itself() {
        let h = Harness::new();
        let s = seeded(&h, Some(h.sample.asha), at(2026, 1, 5, 9, 0)).await;
        let mut cmd = edit(*s.id());
        cmd.end_time = Some(at(2026, 1, 5, 10, 0));
        let result = handler(&h).handle(cmd, metadata()).await.unwrap();
        assert!(!result.verdict.has_conflict);
    }

    #[tokio::test]
    async fn moving_onto_another_booking_overlaps() {
        let h = Harness::new();
        seeded(&h, Some(h.sample.asha), at(2026, 1, 5, 11, 0)).await;
        let s = seeded(&h, Some(h.sample.asha), at(2026, 1, 5, 9, 0)).await;
        let mut cmd = edit(*s.id());
        cmd.start_time = Some(at(2026, 1, 5, 11, 30));
        let result = handler(&h).handle(cmd, metadata()).await.unwrap();
        assert_eq!(result.verdict.conflict_type, Some(ConflictType::Overlap));
    }

    #[tokio::test]
    async fn edits_are_allowed_after_completion() {
        let h = Harness::new();
        let s = seeded(&h, Some(h.sample.asha), at(2026, 1, 5, 9, 0)).await;
        for action in [LifecycleAction::Start, LifecycleAction::End, LifecycleAction::SubmitLog] {
            h.store.transition(s.id(), action).await.unwrap();
        }
        let mut cmd = edit(*s.id());
        cmd.teacher_id = Some(Some(h.sample.ravi));
        let result = handler(&h).handle(cmd, metadata()).await.unwrap();

        assert_eq!(result.session.status(), SessionStatus::Completed);
        assert_eq!(result.session.teacher_id(), Some(&h.sample.ravi));
        assert!(result.report.teacher_unallocated);
    }

    #[tokio::test]
    async fn changing_subject_does_not_auto_assign() {
        let h = Harness::new();
        let s = seeded(&h, None, at(2026, 1, 5, 9, 0)).await;
        let mut cmd = edit(*s.id());
        cmd.subject = Some(SubjectChange {
            class_id: h.sample.class_5b,
            subject_id: h.sample.maths,
            chapter_id: None,
            topic_id: None,
        });
        let result = handler(&h).handle(cmd, metadata()).await.unwrap();

        assert!(result.session.teacher_id().is_none());
        assert_eq!(result.verdict.conflict_type, Some(ConflictType::NoTeacher));
    }

    #[tokio::test]
    async fn topic_without_its_chapter_is_rejected() {
        let h = Harness::new();
        let s = seeded(&h, None, at(2026, 1, 5, 9, 0)).await;
        let mut cmd = edit(*s.id());
        cmd.subject = Some(SubjectChange {
            class_id: h.sample.class_5b,
            subject_id: h.sample.science,
            chapter_id: None,
            topic_id: Some(h.sample.topic),
        });
        let result = handler(&h).handle(cmd, metadata()).await;
        assert!(matches!(result, Err(SessionError::UnknownReference { .. })));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let h = Harness::new();
        let result = handler(&h).handle(edit(SessionId::new()), metadata()).await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn no_op_edit_publishes_nothing() {
        let h = Harness::new();
        let s = seeded(&h, Some(h.sample.asha), at(2026, 1, 5, 9, 0)).await;
        let mut cmd = edit(*s.id());
        cmd.title = Some(s.title().to_string());
        let result = handler(&h).handle(cmd, metadata()).await.unwrap();

        assert!(result.event.is_none());
        assert_eq!(h.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn end_before_start_is_rejected() {
        let h = Harness::new();
        let s = seeded(&h, Some(h.sample.asha), at(2026, 1, 5, 9, 0)).await;
        let mut cmd = edit(*s.id());
        cmd.end_time = Some(at(2026, 1, 5, 8, 0));
        let result = handler(&h).handle(cmd, metadata()).await;
        assert!(matches!(result, Err(SessionError::ValidationFailed { .. })));
    }
}
