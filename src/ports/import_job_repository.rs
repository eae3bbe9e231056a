//! Import job repository port.
//!
//! Holds parsed jobs between upload, review and commit, until they are
//! discarded or evicted.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ImportJobId};
use crate::domain::import::ImportJob;

#[async_trait]
pub trait ImportJobRepository: Send + Sync {
    /// Store a job, replacing an earlier version with the same id.
    async fn save(&self, job: &ImportJob) -> Result<(), DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ImportJobId) -> Result<Option<ImportJob>, DomainError>;

    /// Bumps the stored job's commit counter in place and returns the new
    /// run number. Rows and overrides saved concurrently are left intact.
    ///
    /// # Errors
    ///
    /// - `ImportJobNotFound` if the job does not exist
    async fn record_commit(&self, id: &ImportJobId) -> Result<u32, DomainError>;

    /// Removes a job. Returns `false` if it did not exist.
    async fn delete(&self, id: &ImportJobId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_job_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ImportJobRepository) {}
    }
}
