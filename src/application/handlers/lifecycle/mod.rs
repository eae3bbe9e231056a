//! Session lifecycle handlers.
//!
//! `SCHEDULED -> IN_PROGRESS -> PENDING_LOG -> COMPLETED`, with
//! `CANCELLED` reachable from the first two.

mod submit_log;
mod transition_session;

pub use submit_log::{SubmitLogCommand, SubmitLogHandler, SubmitLogResult};
pub use transition_session::{
    TransitionSessionCommand, TransitionSessionHandler, TransitionSessionResult,
};
