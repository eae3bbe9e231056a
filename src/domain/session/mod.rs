//! Session domain module.
//!
//! A session is one scheduled teaching period. This module holds the
//! aggregate, the creation draft, the teaching log and the events the
//! lifecycle publishes.
//!
//! # Events
//!
//! - `SessionScheduled` - Published when a new session is created
//! - `SessionUpdated` - Published when fields are edited
//! - `SessionStatusChanged` - Published after a lifecycle action
//! - `SessionLogSubmitted` - Published when the teaching log completes a session

mod aggregate;
mod draft;
mod errors;
mod events;
mod log;

pub use aggregate::{NewSession, Session, MAX_TITLE_LENGTH};
pub use draft::{SessionDraft, TeacherSource};
pub use errors::{session_missing, transition_rejected, SessionError};
pub use events::{SessionLogSubmitted, SessionScheduled, SessionStatusChanged, SessionUpdated};
pub use log::{SessionLog, SessionLogPayload, StudentFlag, StudentNote};

#[cfg(test)]
pub(crate) use aggregate::fixtures;
