//! An unsaved session being composed by the interactive form.
//!
//! The draft owns the creation-only behavior: teacher auto-assignment
//! when class and subject are chosen, and title regeneration when the
//! inputs of the title change. Neither applies once a session exists.

use serde::{Deserialize, Serialize};

use crate::domain::allocation::Allocation;
use crate::domain::catalog::TitleLabels;
use crate::domain::foundation::{
    ChapterId, ClassId, SchoolClock, SubjectId, TeacherId, TimeSlot, TopicId, ValidationError,
};
use crate::domain::scheduling::{
    auto_assign, generate_title, AutoAssignment, ScheduleCandidate, SlotOwner,
};

use super::NewSession;

/// How the draft's teacher was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherSource {
    /// No teacher yet.
    #[default]
    Unassigned,
    /// Filled in from the allocation registry.
    Auto,
    /// Chosen by the user; never overwritten.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    class_id: ClassId,
    subject_id: SubjectId,
    chapter_id: Option<ChapterId>,
    topic_id: Option<TopicId>,
    teacher_id: Option<TeacherId>,
    teacher_source: TeacherSource,
    slot: TimeSlot,
    title: Option<String>,
    custom_title: bool,
    description: Option<String>,
}

impl SessionDraft {
    pub fn new(class_id: ClassId, subject_id: SubjectId, slot: TimeSlot) -> Self {
        Self {
            class_id,
            subject_id,
            chapter_id: None,
            topic_id: None,
            teacher_id: None,
            teacher_source: TeacherSource::Unassigned,
            slot,
            title: None,
            custom_title: false,
            description: None,
        }
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn teacher_id(&self) -> Option<&TeacherId> {
        self.teacher_id.as_ref()
    }

    pub fn teacher_source(&self) -> TeacherSource {
        self.teacher_source
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Choose class and subject, auto-assigning unless the teacher is manual.
    pub fn select_class_subject(
        &mut self,
        class_id: ClassId,
        subject_id: SubjectId,
        allocations: &[Allocation],
    ) -> Option<AutoAssignment> {
        self.class_id = class_id;
        self.subject_id = subject_id;
        self.chapter_id = None;
        self.topic_id = None;
        if self.teacher_source == TeacherSource::Manual {
            return None;
        }
        let assignment = auto_assign(allocations, &class_id, &subject_id);
        self.teacher_id = assignment.teacher();
        self.teacher_source = match self.teacher_id {
            Some(_) => TeacherSource::Auto,
            None => TeacherSource::Unassigned,
        };
        Some(assignment)
    }

    /// User picks (or clears) the teacher.
    pub fn select_teacher(&mut self, teacher_id: Option<TeacherId>) {
        self.teacher_id = teacher_id;
        self.teacher_source = TeacherSource::Manual;
    }

    pub fn select_outline(&mut self, chapter_id: Option<ChapterId>, topic_id: Option<TopicId>) {
        self.chapter_id = chapter_id;
        self.topic_id = topic_id;
    }

    /// A user-typed title; stops further regeneration.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
        self.custom_title = true;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Regenerate the title from the current inputs, unless the user typed one.
    pub fn refresh_title(&mut self, labels: &TitleLabels, clock: &SchoolClock) {
        if !self.custom_title {
            self.title = Some(generate_title(&self.slot.start(), labels, clock));
        }
    }

    pub fn candidate(&self) -> ScheduleCandidate {
        ScheduleCandidate {
            owner: SlotOwner::Draft,
            class_id: self.class_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            slot: self.slot,
        }
    }

    /// Fields for `Session::schedule`.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if no title was generated or typed
    pub fn into_new_session(self) -> Result<NewSession, ValidationError> {
        let title = self.title.ok_or_else(|| ValidationError::empty_field("title"))?;
        Ok(NewSession {
            title,
            description: self.description,
            slot: self.slot,
            class_id: self.class_id,
            subject_id: self.subject_id,
            chapter_id: self.chapter_id,
            topic_id: self.topic_id,
            teacher_id: self.teacher_id,
        })
    }
}
