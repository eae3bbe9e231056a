//! Bulk import pipeline: template, parse, review, commit.
//!
//! An upload is read into raw rows, each row is resolved against the
//! catalog and evaluated against a snapshot captured once at parse time.
//! Failures stay on their row; only file-level problems fail the upload.

mod errors;
mod events;
mod job;
mod parser;
mod policy;
mod row;
mod template;

pub use errors::{job_missing, ImportError, RowError};
pub use events::ImportCommitted;
pub use job::{CommitReport, ImportJob, ImportSummary, RowCommitOutcome, RowCommitResult};
pub use parser::{
    parse_duration_minutes, parse_local_date_time, read_rows, RawImportRow, MAX_DURATION_MINUTES,
};
pub use policy::RowValidityPolicy;
pub use row::{ImportRow, ResolvedRow};
pub use template::{reference_csv, template_csv, IMPORT_HEADER, REFERENCE_HEADER};
