//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod import;
pub mod lifecycle;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use import::{
    CommitImportCommand, CommitImportHandler, CommitImportResult, DiscardImportCommand,
    DiscardImportHandler, GenerateTemplateHandler,
    GeneratedTemplate, ImportReview, ImportSettings, OverrideTeacherCommand,
    OverrideTeacherHandler, ParseImportCommand, ParseImportHandler, ReviewImportHandler,
    ReviewImportQuery, TemplateKind,
};
pub use lifecycle::{
    SubmitLogCommand, SubmitLogHandler, SubmitLogResult, TransitionSessionCommand,
    TransitionSessionHandler, TransitionSessionResult,
};
pub use session::{
    ConflictPreview, CreateSessionCommand, CreateSessionHandler, CreateSessionResult,
    GetSessionHandler, GetSessionQuery, ListSessionsHandler, ListSessionsQuery,
    PreviewConflictsHandler, PreviewConflictsQuery, SessionDetails, SubjectChange,
    UpdateSessionCommand, UpdateSessionHandler, UpdateSessionResult,
};
