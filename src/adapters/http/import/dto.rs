//! HTTP DTOs for import endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{CommitImportResult, ImportReview};
use crate::domain::foundation::{ImportJobId, TeacherId, Timestamp};
use crate::domain::import::{
    ImportRow, ImportSummary, RawImportRow, RowCommitResult, RowError,
};
use crate::domain::scheduling::{AutoAssignment, ConflictReport, ConflictVerdict};
use crate::domain::session::TeacherSource;

/// Body of a teacher override; `null` clears the teacher.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideTeacherRequest {
    pub teacher_id: Option<TeacherId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRowResponse {
    pub title: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub teacher_id: Option<TeacherId>,
    pub teacher_source: TeacherSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<AutoAssignment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportRowResponse {
    pub row_number: u32,
    pub raw: RawImportRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedRowResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RowError>,
    pub verdict: ConflictVerdict,
    pub report: ConflictReport,
    pub valid: bool,
}

impl From<ImportRow> for ImportRowResponse {
    fn from(row: ImportRow) -> Self {
        Self {
            row_number: row.row_number(),
            resolved: row.resolved.map(|r| ResolvedRowResponse {
                start_time: r.slot.start(),
                end_time: r.slot.end(),
                title: r.title,
                teacher_id: r.teacher_id,
                teacher_source: r.teacher_source,
                assignment: r.assignment,
            }),
            raw: row.raw,
            error: row.error,
            verdict: row.verdict,
            report: row.report,
            valid: row.valid,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportReviewResponse {
    pub job_id: ImportJobId,
    pub policy: &'static str,
    pub summary: ImportSummary,
    pub rows: Vec<ImportRowResponse>,
    pub snapshot_captured_at: Timestamp,
    pub commit_count: u32,
}

impl From<ImportReview> for ImportReviewResponse {
    fn from(review: ImportReview) -> Self {
        Self {
            job_id: review.job_id,
            policy: review.policy.as_str(),
            summary: review.summary,
            rows: review.rows.into_iter().map(Into::into).collect(),
            snapshot_captured_at: review.snapshot_captured_at,
            commit_count: review.commit_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitResponse {
    pub job_id: ImportJobId,
    pub run: u32,
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<RowCommitResult>,
}

impl From<CommitImportResult> for CommitResponse {
    fn from(result: CommitImportResult) -> Self {
        Self {
            job_id: result.report.job_id,
            run: result.run,
            created: result.report.created,
            failed: result.report.failed,
            skipped: result.report.skipped,
            results: result.report.results,
        }
    }
}
