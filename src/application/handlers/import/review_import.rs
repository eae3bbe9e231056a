//! Review handlers: read a parsed job, override a row's teacher, or drop
//! the job before it is committed.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{ImportJobId, TeacherId, Timestamp};
use crate::domain::import::{ImportError, ImportJob, ImportRow, ImportSummary, RowValidityPolicy};
use crate::ports::{CatalogReader, ImportJobRepository};

#[derive(Debug, Clone)]
pub struct ReviewImportQuery {
    pub job_id: ImportJobId,
}

/// Everything the review screen shows for one job.
#[derive(Debug, Clone)]
pub struct ImportReview {
    pub job_id: ImportJobId,
    pub policy: RowValidityPolicy,
    pub summary: ImportSummary,
    pub rows: Vec<ImportRow>,
    pub snapshot_captured_at: Timestamp,
    pub commit_count: u32,
}

impl From<&ImportJob> for ImportReview {
    fn from(job: &ImportJob) -> Self {
        Self {
            job_id: *job.id(),
            policy: job.policy(),
            summary: job.summary(),
            rows: job.rows().to_vec(),
            snapshot_captured_at: *job.snapshot().captured_at(),
            commit_count: job.commit_count(),
        }
    }
}

pub(super) async fn load_job(
    jobs: &dyn ImportJobRepository,
    job_id: ImportJobId,
) -> Result<ImportJob, ImportError> {
    jobs.find_by_id(&job_id)
        .await?
        .ok_or(ImportError::JobNotFound(job_id))
}

pub struct ReviewImportHandler {
    jobs: Arc<dyn ImportJobRepository>,
}

impl ReviewImportHandler {
    pub fn new(jobs: Arc<dyn ImportJobRepository>) -> Self {
        Self { jobs }
    }

    pub async fn handle(&self, query: ReviewImportQuery) -> Result<ImportReview, ImportError> {
        let job = load_job(self.jobs.as_ref(), query.job_id).await?;
        Ok(ImportReview::from(&job))
    }
}

/// Replace one row's teacher; `None` clears it.
#[derive(Debug, Clone)]
pub struct OverrideTeacherCommand {
    pub job_id: ImportJobId,
    pub row_number: u32,
    pub teacher_id: Option<TeacherId>,
}

pub struct OverrideTeacherHandler {
    jobs: Arc<dyn ImportJobRepository>,
    catalog: Arc<dyn CatalogReader>,
}

impl OverrideTeacherHandler {
    pub fn new(jobs: Arc<dyn ImportJobRepository>, catalog: Arc<dyn CatalogReader>) -> Self {
        Self { jobs, catalog }
    }

    /// Re-evaluates the whole batch against the job's snapshot and returns
    /// the updated review.
    pub async fn handle(&self, cmd: OverrideTeacherCommand) -> Result<ImportReview, ImportError> {
        let mut job = load_job(self.jobs.as_ref(), cmd.job_id).await?;
        let catalog = self.catalog.load().await?;

        let row = job.override_teacher(cmd.row_number, cmd.teacher_id, &catalog)?;
        info!(
            job_id = %cmd.job_id,
            row = cmd.row_number,
            conflict = ?row.verdict.conflict_type,
            valid = row.valid,
            "Import row teacher overridden"
        );

        self.jobs.save(&job).await?;
        Ok(ImportReview::from(&job))
    }
}

#[derive(Debug, Clone)]
pub struct DiscardImportCommand {
    pub job_id: ImportJobId,
}

pub struct DiscardImportHandler {
    jobs: Arc<dyn ImportJobRepository>,
}

impl DiscardImportHandler {
    pub fn new(jobs: Arc<dyn ImportJobRepository>) -> Self {
        Self { jobs }
    }

    pub async fn handle(&self, cmd: DiscardImportCommand) -> Result<(), ImportError> {
        if !self.jobs.delete(&cmd.job_id).await? {
            return Err(ImportError::JobNotFound(cmd.job_id));
        }
        info!(job_id = %cmd.job_id, "Import job discarded");
        Ok(())
    }
}
