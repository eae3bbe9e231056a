//! CreateSessionHandler - Command handler for scheduling a session.
//!
//! Reference and validation errors block the save. Conflicts never do:
//! the session is saved and returned together with its verdict.

use std::sync::Arc;

use tracing::{info, warn};

use super::conflict_inputs::{check_references, ConflictInputs, References};
use crate::domain::calendar::OperatingSchedule;
use crate::domain::foundation::{
    ChapterId, ClassId, CommandMetadata, EventId, SchoolClock, SerializableDomainEvent,
    SessionId, SubjectId, TeacherId, TimeSlot, Timestamp, TopicId,
};
use crate::domain::scheduling::{AutoAssignment, ConflictReport, ConflictVerdict};
use crate::domain::session::{Session, SessionDraft, SessionError, SessionScheduled};
use crate::ports::{AllocationRegistry, CalendarService, CatalogReader, EventPublisher, SessionStore};

/// Command to schedule a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub chapter_id: Option<ChapterId>,
    pub topic_id: Option<TopicId>,
    /// Chosen teacher; `None` asks for auto-assignment.
    pub teacher_id: Option<TeacherId>,
    pub start_time: Timestamp,
    /// Defaults to one period after `start_time`.
    pub end_time: Option<Timestamp>,
    /// Overrides the generated title.
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: Session,
    pub verdict: ConflictVerdict,
    pub report: ConflictReport,
    /// Outcome of auto-assignment, when no teacher was chosen.
    pub assignment: Option<AutoAssignment>,
    pub event: SessionScheduled,
}

/// Handler for scheduling sessions.
pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<dyn CatalogReader>,
    registry: Arc<dyn AllocationRegistry>,
    calendar: Arc<dyn CalendarService>,
    event_publisher: Arc<dyn EventPublisher>,
    schedule: OperatingSchedule,
    clock: SchoolClock,
}

impl CreateSessionHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<dyn CatalogReader>,
        registry: Arc<dyn AllocationRegistry>,
        calendar: Arc<dyn CalendarService>,
        event_publisher: Arc<dyn EventPublisher>,
        schedule: OperatingSchedule,
        clock: SchoolClock,
    ) -> Self {
        Self {
            store,
            catalog,
            registry,
            calendar,
            event_publisher,
            schedule,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSessionResult, SessionError> {
        // 1. Resolve references against the catalog
        let catalog = self.catalog.load().await?;
        check_references(
            &catalog,
            &References {
                class_id: cmd.class_id,
                subject_id: cmd.subject_id,
                chapter_id: cmd.chapter_id,
                topic_id: cmd.topic_id,
                teacher_id: cmd.teacher_id,
            },
        )?;
        let labels = catalog
            .title_labels(&cmd.class_id, &cmd.subject_id)
            .ok_or_else(|| SessionError::unknown_reference("class_id", cmd.class_id))?;

        // 2. Compose the draft: slot, teacher, outline, title
        let end = cmd
            .end_time
            .unwrap_or_else(|| self.schedule.default_end_for(cmd.start_time));
        let slot = TimeSlot::new(cmd.start_time, end)?;
        let mut draft = SessionDraft::new(cmd.class_id, cmd.subject_id, slot);

        if cmd.teacher_id.is_some() {
            draft.select_teacher(cmd.teacher_id);
        }
        let allocations =
            ConflictInputs::allocations_for(self.registry.as_ref(), cmd.class_id, cmd.subject_id)
                .await?;
        let assignment = draft.select_class_subject(cmd.class_id, cmd.subject_id, &allocations);
        if let Some(AutoAssignment::FirstOfMany { chosen, candidates }) = &assignment {
            warn!(
                teacher_id = %chosen,
                candidates = candidates.len(),
                "Several teachers allocated; picked the first"
            );
        }
        draft.select_outline(cmd.chapter_id, cmd.topic_id);
        match cmd.title {
            Some(title) => draft.set_title(title),
            None => draft.refresh_title(&labels, &self.clock),
        }
        draft.set_description(cmd.description);

        // 3. Evaluate conflicts (advisory)
        let candidate = draft.candidate();
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

        // 4. Persist
        let session = Session::schedule(SessionId::new(), draft.into_new_session()?)?;
        self.store.create(&session).await?;

        info!(
            session_id = %session.id(),
            conflict = ?verdict.conflict_type,
            "Session scheduled"
        );

        // 5. Publish
        let event = SessionScheduled {
            event_id: EventId::new(),
            session_id: *session.id(),
            scheduled_by: metadata.user_id.clone(),
            title: session.title().to_string(),
            class_id: *session.class_id(),
            subject_id: *session.subject_id(),
            teacher_id: session.teacher_id().copied(),
            start_time: session.start_time(),
            end_time: session.end_time(),
            verdict,
            scheduled_at: *session.created_at(),
        };

        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());

        self.event_publisher.publish(envelope).await?;

        Ok(CreateSessionResult {
            session,
            verdict,
            report,
            assignment,
            event,
        })
    }
}
