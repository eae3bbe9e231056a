//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the scheduling domain.

mod command;
mod errors;
mod events;
mod ids;
mod session_status;
mod state_machine;
mod time_slot;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{
    BoardId, CalendarEntryId, ChapterId, ClassId, ImportJobId, SessionId, SessionLogId,
    StudentId, SubjectId, TeacherId, TopicId, UserId,
};
pub use session_status::{LifecycleAction, SessionStatus};
pub use state_machine::{InvalidTransition, StateMachine};
pub use time_slot::{SchoolClock, TimeSlot};
pub use timestamp::Timestamp;
