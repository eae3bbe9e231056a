//! Structured teaching log submitted when a session is completed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, SessionLogId, StudentId, Timestamp, ValidationError};

/// Per-student marker recorded in a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentFlag {
    Excellent,
    Good,
    NeedsAttention,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentNote {
    pub student_id: StudentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<StudentFlag>,
}

/// Log payload as submitted by the teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogPayload {
    pub session_id: SessionId,
    pub topics_covered: String,
    #[serde(default)]
    pub homework: Option<String>,
    #[serde(default)]
    pub class_notes: Option<String>,
    #[serde(default)]
    pub challenges: Option<String>,
    #[serde(default)]
    pub next_steps: Option<String>,
    #[serde(default)]
    pub student_notes: Vec<StudentNote>,
}

/// A validated, persisted session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLog {
    pub id: SessionLogId,
    pub session_id: SessionId,
    pub topics_covered: String,
    pub homework: Option<String>,
    pub class_notes: Option<String>,
    pub challenges: Option<String>,
    pub next_steps: Option<String>,
    pub student_notes: Vec<StudentNote>,
    pub submitted_at: Timestamp,
}

impl SessionLog {
    /// Validate a payload against the class roster.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `topics_covered` is blank
    /// - `InvalidFormat` if a student is not on the roster or appears twice
    pub fn from_payload(
        payload: SessionLogPayload,
        roster: &[StudentId],
    ) -> Result<Self, ValidationError> {
        if payload.topics_covered.trim().is_empty() {
            return Err(ValidationError::empty_field("topics_covered"));
        }

        let enrolled: HashSet<&StudentId> = roster.iter().collect();
        let mut seen = HashSet::new();
        for note in &payload.student_notes {
            if !enrolled.contains(&note.student_id) {
                return Err(ValidationError::invalid_format(
                    "student_notes",
                    format!("student {} is not enrolled in this class", note.student_id),
                ));
            }
            if !seen.insert(note.student_id) {
                return Err(ValidationError::invalid_format(
                    "student_notes",
                    format!("student {} appears more than once", note.student_id),
                ));
            }
        }

        Ok(Self {
            id: SessionLogId::new(),
            session_id: payload.session_id,
            topics_covered: payload.topics_covered.trim().to_string(),
            homework: non_blank(payload.homework),
            class_notes: non_blank(payload.class_notes),
            challenges: non_blank(payload.challenges),
            next_steps: non_blank(payload.next_steps),
            student_notes: payload.student_notes,
            submitted_at: Timestamp::now(),
        })
    }

    pub fn absent_students(&self) -> impl Iterator<Item = &StudentId> {
        self.student_notes
            .iter()
            .filter(|n| n.flag == Some(StudentFlag::Absent))
            .map(|n| &n.student_id)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
