//! CommitImportHandler - Persists the valid rows of a parsed job.
//!
//! Rows are created one at a time in upload order. A failed row is
//! reported and the rest continue; nothing is rolled back and nothing is
//! re-validated. Committing the same job again creates the sessions again.
//! The stored job is never overwritten from the copy read at the start.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{
    CommandMetadata, EventId, ImportJobId, SerializableDomainEvent, SessionId, Timestamp,
};
use crate::domain::import::{
    CommitReport, ImportCommitted, ImportError, RowCommitOutcome, RowCommitResult,
};
use crate::domain::session::Session;
use crate::ports::{EventPublisher, ImportJobRepository, SessionStore};

use super::review_import::load_job;

#[derive(Debug, Clone)]
pub struct CommitImportCommand {
    pub job_id: ImportJobId,
}

#[derive(Debug, Clone)]
pub struct CommitImportResult {
    pub report: CommitReport,
    /// 1 for the first commit of the job.
    pub run: u32,
}

pub struct CommitImportHandler {
    store: Arc<dyn SessionStore>,
    jobs: Arc<dyn ImportJobRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CommitImportHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        jobs: Arc<dyn ImportJobRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            jobs,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CommitImportCommand,
        metadata: CommandMetadata,
    ) -> Result<CommitImportResult, ImportError> {
        let job = load_job(self.jobs.as_ref(), cmd.job_id).await?;

        let mut results: Vec<RowCommitResult> = job
            .skipped_rows()
            .map(|(row_number, reason)| RowCommitResult {
                row_number,
                outcome: RowCommitOutcome::Skipped { reason },
            })
            .collect();

        for (row_number, row) in job.committable_rows() {
            let outcome = match Session::schedule(SessionId::new(), row.to_new_session()) {
                Ok(session) => match self.store.create(&session).await {
                    Ok(()) => RowCommitOutcome::Created {
                        session_id: *session.id(),
                    },
                    Err(err) => {
                        warn!(job_id = %cmd.job_id, row = row_number, error = %err, "Import row failed");
                        RowCommitOutcome::Failed {
                            reason: err.to_string(),
                        }
                    }
                },
                Err(err) => RowCommitOutcome::Failed {
                    reason: err.to_string(),
                },
            };
            results.push(RowCommitResult { row_number, outcome });
        }

        // Only the counter is written back; the job may have been reviewed
        // while rows were being created.
        let run = match self.jobs.record_commit(&cmd.job_id).await.map_err(ImportError::from) {
            Ok(run) => run,
            Err(ImportError::JobNotFound(_)) => {
                warn!(job_id = %cmd.job_id, "Import job discarded during commit");
                job.commit_count() + 1
            }
            Err(err) => return Err(err),
        };
        let report = CommitReport::new(cmd.job_id, results);

        info!(
            job_id = %cmd.job_id,
            run = run,
            created = report.created,
            failed = report.failed,
            skipped = report.skipped,
            "Import committed"
        );

        let event = ImportCommitted {
            event_id: EventId::new(),
            job_id: cmd.job_id,
            run,
            created: report.created,
            failed: report.failed,
            skipped: report.skipped,
            committed_by: metadata.user_id.clone(),
            committed_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        // Sessions are already stored; a lost notification must not turn
        // the commit into an error.
        if let Err(err) = self.event_publisher.publish(envelope).await {
            warn!(job_id = %cmd.job_id, error = %err, "Failed to publish ImportCommitted");
        }

        Ok(CommitImportResult { report, run })
    }
}
