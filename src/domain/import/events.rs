use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, ImportJobId, Timestamp, UserId};

/// Published after every commit run of an import job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCommitted {
    pub event_id: EventId,
    pub job_id: ImportJobId,
    /// 1 for the first commit of the job; re-runs create duplicates.
    pub run: u32,
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
    pub committed_by: UserId,
    pub committed_at: Timestamp,
}

domain_event!(
    ImportCommitted,
    event_type = "import.committed.v1",
    schema_version = 1,
    aggregate_id = job_id,
    aggregate_type = "ImportJob",
    occurred_at = committed_at,
    event_id = event_id
);
