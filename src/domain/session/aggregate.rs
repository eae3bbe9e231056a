//! Session aggregate entity.
//!
//! A session is one teaching period for a class and subject between two
//! instants. Field edits are allowed in every status; only lifecycle
//! actions move the status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ChapterId, ClassId, InvalidTransition, LifecycleAction, SessionId, SessionStatus,
    StateMachine, SubjectId, TeacherId, TimeSlot, Timestamp, TopicId, ValidationError,
};
use crate::domain::scheduling::{ScheduleCandidate, SlotOwner};

/// Maximum length for session title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Values needed to schedule a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub title: String,
    pub description: Option<String>,
    pub slot: TimeSlot,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub chapter_id: Option<ChapterId>,
    pub topic_id: Option<TopicId>,
    pub teacher_id: Option<TeacherId>,
}

/// Session aggregate.
///
/// # Invariants
///
/// - `title` is 1-500 characters, non-blank
/// - `slot` is non-empty (`start < end`)
/// - `topic_id` is only set together with `chapter_id`
/// - `status` only moves along the lifecycle graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    title: String,
    description: Option<String>,
    slot: TimeSlot,
    status: SessionStatus,
    class_id: ClassId,
    subject_id: SubjectId,
    chapter_id: Option<ChapterId>,
    topic_id: Option<TopicId>,
    teacher_id: Option<TeacherId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Create a new session in `Scheduled` status.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the title is blank or too long, or a topic is
    ///   given without a chapter
    pub fn schedule(id: SessionId, new: NewSession) -> Result<Self, ValidationError> {
        Self::validate_title(&new.title)?;
        Self::validate_outline(new.chapter_id, new.topic_id)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            title: new.title,
            description: new.description,
            slot: new.slot,
            status: SessionStatus::Scheduled,
            class_id: new.class_id,
            subject_id: new.subject_id,
            chapter_id: new.chapter_id,
            topic_id: new.topic_id,
            teacher_id: new.teacher_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        title: String,
        description: Option<String>,
        slot: TimeSlot,
        status: SessionStatus,
        class_id: ClassId,
        subject_id: SubjectId,
        chapter_id: Option<ChapterId>,
        topic_id: Option<TopicId>,
        teacher_id: Option<TeacherId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            description,
            slot,
            status,
            class_id,
            subject_id,
            chapter_id,
            topic_id,
            teacher_id,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn start_time(&self) -> Timestamp {
        self.slot.start()
    }

    pub fn end_time(&self) -> Timestamp {
        self.slot.end()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn chapter_id(&self) -> Option<&ChapterId> {
        self.chapter_id.as_ref()
    }

    pub fn topic_id(&self) -> Option<&TopicId> {
        self.topic_id.as_ref()
    }

    pub fn teacher_id(&self) -> Option<&TeacherId> {
        self.teacher_id.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// This session as an input to conflict evaluation.
    pub fn candidate(&self) -> ScheduleCandidate {
        ScheduleCandidate {
            owner: SlotOwner::Session(self.id),
            class_id: self.class_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            slot: self.slot,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Field edits (allowed in any status)
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the title. Titles are never regenerated on edit.
    pub fn rename(&mut self, new_title: String) -> Result<String, ValidationError> {
        Self::validate_title(&new_title)?;
        let old = std::mem::replace(&mut self.title, new_title);
        self.touch();
        Ok(old)
    }

    pub fn update_description(&mut self, description: Option<String>) -> Option<String> {
        let old = std::mem::replace(&mut self.description, description);
        self.touch();
        old
    }

    pub fn reschedule(&mut self, slot: TimeSlot) -> TimeSlot {
        let old = std::mem::replace(&mut self.slot, slot);
        self.touch();
        old
    }

    /// Move the session to another class/subject and outline.
    pub fn change_subject(
        &mut self,
        class_id: ClassId,
        subject_id: SubjectId,
        chapter_id: Option<ChapterId>,
        topic_id: Option<TopicId>,
    ) -> Result<(), ValidationError> {
        Self::validate_outline(chapter_id, topic_id)?;
        self.class_id = class_id;
        self.subject_id = subject_id;
        self.chapter_id = chapter_id;
        self.topic_id = topic_id;
        self.touch();
        Ok(())
    }

    pub fn assign_teacher(&mut self, teacher_id: Option<TeacherId>) -> Option<TeacherId> {
        let old = std::mem::replace(&mut self.teacher_id, teacher_id);
        self.touch();
        old
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a lifecycle action, returning the previous status.
    ///
    /// On error the status is unchanged.
    pub fn apply(&mut self, action: LifecycleAction) -> Result<SessionStatus, InvalidTransition> {
        let next = self.status.transition_to(action.target())?;
        let previous = std::mem::replace(&mut self.status, next);
        self.touch();
        Ok(previous)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_title(title: &str) -> Result<(), ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let len = title.chars().count();
        if len > MAX_TITLE_LENGTH {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH as i64,
                len as i64,
            ));
        }
        Ok(())
    }

    fn validate_outline(
        chapter_id: Option<ChapterId>,
        topic_id: Option<TopicId>,
    ) -> Result<(), ValidationError> {
        if topic_id.is_some() && chapter_id.is_none() {
            return Err(ValidationError::invalid_format(
                "topic_id",
                "a topic requires its chapter",
            ));
        }
        Ok(())
    }
}
