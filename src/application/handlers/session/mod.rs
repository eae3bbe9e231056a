//! Session command and query handlers.

mod conflict_inputs;
mod create_session;
mod get_session;
mod list_sessions;
mod preview_conflicts;
mod update_session;

pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use get_session::{GetSessionHandler, GetSessionQuery, SessionDetails};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery};
pub use preview_conflicts::{ConflictPreview, PreviewConflictsHandler, PreviewConflictsQuery};
pub use update_session::{
    SubjectChange, UpdateSessionCommand, UpdateSessionHandler, UpdateSessionResult,
};
