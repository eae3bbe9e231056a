//! Bulk import handlers from template download to commit.

mod commit_import;
mod generate_template;
mod parse_import;
mod review_import;

pub use commit_import::{CommitImportCommand, CommitImportHandler, CommitImportResult};
pub use generate_template::{GenerateTemplateHandler, GeneratedTemplate, TemplateKind};
pub use parse_import::{ImportSettings, ParseImportCommand, ParseImportHandler};
pub use review_import::{
    DiscardImportCommand, DiscardImportHandler, ImportReview, OverrideTeacherCommand,
    OverrideTeacherHandler, ReviewImportHandler, ReviewImportQuery,
};
