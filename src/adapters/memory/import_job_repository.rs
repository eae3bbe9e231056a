use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::{DomainError, ImportJobId};
use crate::domain::import::{job_missing, ImportJob};
use crate::ports::ImportJobRepository;

/// Jobs kept when no capacity is configured.
pub const DEFAULT_MAX_JOBS: usize = 100;

#[derive(Default)]
struct JobTable {
    jobs: HashMap<ImportJobId, ImportJob>,
    /// Job ids, oldest upload first.
    order: VecDeque<ImportJobId>,
}

/// Parsed import jobs. Once more than `max_jobs` are held, the oldest
/// upload is evicted.
pub struct InMemoryImportJobRepository {
    table: RwLock<JobTable>,
    max_jobs: usize,
}

impl InMemoryImportJobRepository {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_JOBS)
    }

    pub fn with_capacity(max_jobs: usize) -> Self {
        Self {
            table: RwLock::new(JobTable::default()),
            max_jobs: max_jobs.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.jobs.len()
    }
}

impl Default for InMemoryImportJobRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImportJobRepository for InMemoryImportJobRepository {
    async fn save(&self, job: &ImportJob) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        if table.jobs.insert(*job.id(), job.clone()).is_none() {
            table.order.push_back(*job.id());
        }
        while table.order.len() > self.max_jobs {
            if let Some(oldest) = table.order.pop_front() {
                table.jobs.remove(&oldest);
                debug!(job_id = %oldest, "Evicted import job");
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ImportJobId) -> Result<Option<ImportJob>, DomainError> {
        Ok(self.table.read().await.jobs.get(id).cloned())
    }

    async fn record_commit(&self, id: &ImportJobId) -> Result<u32, DomainError> {
        let mut table = self.table.write().await;
        let job = table.jobs.get_mut(id).ok_or_else(|| job_missing(id))?;
        Ok(job.record_commit())
    }

    async fn delete(&self, id: &ImportJobId) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        let removed = table.jobs.remove(id).is_some();
        if removed {
            table.order.retain(|kept| kept != id);
        }
        Ok(removed)
    }
}
