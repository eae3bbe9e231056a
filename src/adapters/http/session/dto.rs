//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::{
    ConflictPreview, CreateSessionCommand, PreviewConflictsQuery, SessionDetails, SubjectChange,
    UpdateSessionCommand,
};
use crate::domain::foundation::{
    ChapterId, ClassId, SessionId, SessionStatus, SubjectId, TeacherId, Timestamp, TopicId,
};
use crate::domain::scheduling::{AutoAssignment, ConflictReport, ConflictVerdict};
use crate::domain::session::{Session, SessionLog};
use crate::ports::SessionFilter;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to schedule a session. A missing teacher asks for auto-assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    #[serde(default)]
    pub chapter_id: Option<ChapterId>,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    pub start_time: Timestamp,
    #[serde(default)]
    pub end_time: Option<Timestamp>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateSessionRequest> for CreateSessionCommand {
    fn from(req: CreateSessionRequest) -> Self {
        Self {
            class_id: req.class_id,
            subject_id: req.subject_id,
            chapter_id: req.chapter_id,
            topic_id: req.topic_id,
            teacher_id: req.teacher_id,
            start_time: req.start_time,
            end_time: req.end_time,
            title: req.title,
            description: req.description,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SubjectChangeRequest {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    #[serde(default)]
    pub chapter_id: Option<ChapterId>,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
}

/// Partial edit. An absent field is unchanged; an explicit `null` clears
/// `description` or `teacher_id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub start_time: Option<Timestamp>,
    #[serde(default)]
    pub end_time: Option<Timestamp>,
    #[serde(default)]
    pub subject: Option<SubjectChangeRequest>,
    #[serde(default, deserialize_with = "present")]
    pub teacher_id: Option<Option<TeacherId>>,
}

impl UpdateSessionRequest {
    pub fn into_command(self, session_id: SessionId) -> UpdateSessionCommand {
        UpdateSessionCommand {
            session_id,
            title: self.title,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            subject: self.subject.map(|s| SubjectChange {
                class_id: s.class_id,
                subject_id: s.subject_id,
                chapter_id: s.chapter_id,
                topic_id: s.topic_id,
            }),
            teacher_id: self.teacher_id,
        }
    }
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query parameters for listing sessions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSessionsParams {
    #[serde(default)]
    pub class_id: Option<ClassId>,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub status: Option<SessionStatus>,
    #[serde(default)]
    pub from: Option<Timestamp>,
    #[serde(default)]
    pub to: Option<Timestamp>,
}

impl From<ListSessionsParams> for SessionFilter {
    fn from(params: ListSessionsParams) -> Self {
        Self {
            class_id: params.class_id,
            subject_id: params.subject_id,
            teacher_id: params.teacher_id,
            status: params.status,
            from: params.from,
            to: params.to,
        }
    }
}

/// Draft evaluated without saving.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConflictsRequest {
    /// Set when the draft edits an existing session.
    #[serde(default)]
    pub session_id: Option<SessionId>,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    pub start_time: Timestamp,
    #[serde(default)]
    pub end_time: Option<Timestamp>,
}

impl From<PreviewConflictsRequest> for PreviewConflictsQuery {
    fn from(req: PreviewConflictsRequest) -> Self {
        Self {
            session_id: req.session_id,
            class_id: req.class_id,
            subject_id: req.subject_id,
            teacher_id: req.teacher_id,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: SessionId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: SessionStatus,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<ChapterId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    pub teacher_id: Option<TeacherId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: *session.id(),
            title: session.title().to_string(),
            description: session.description().map(str::to_string),
            start_time: session.start_time(),
            end_time: session.end_time(),
            status: session.status(),
            class_id: *session.class_id(),
            subject_id: *session.subject_id(),
            chapter_id: session.chapter_id().copied(),
            topic_id: session.topic_id().copied(),
            teacher_id: session.teacher_id().copied(),
            created_at: *session.created_at(),
            updated_at: *session.updated_at(),
        }
    }
}

/// A saved session with the warnings that applied when it was saved.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledSessionResponse {
    pub session: SessionResponse,
    pub verdict: ConflictVerdict,
    pub report: ConflictReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<AutoAssignment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDetailsResponse {
    pub session: SessionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<SessionLog>,
}

impl From<SessionDetails> for SessionDetailsResponse {
    fn from(details: SessionDetails) -> Self {
        Self {
            session: SessionResponse::from(&details.session),
            log: details.log,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub items: Vec<SessionResponse>,
    pub total: usize,
}

impl From<Vec<Session>> for SessionListResponse {
    fn from(sessions: Vec<Session>) -> Self {
        Self {
            total: sessions.len(),
            items: sessions.iter().map(SessionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConflictPreviewResponse {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub verdict: ConflictVerdict,
    pub report: ConflictReport,
    pub within_school_day: bool,
}

impl From<ConflictPreview> for ConflictPreviewResponse {
    fn from(preview: ConflictPreview) -> Self {
        Self {
            start_time: preview.slot.start(),
            end_time: preview.slot.end(),
            verdict: preview.verdict,
            report: preview.report,
            within_school_day: preview.within_school_day,
        }
    }
}
