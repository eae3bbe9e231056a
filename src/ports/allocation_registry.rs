//! Allocation registry port (read-only).

use async_trait::async_trait;

use crate::domain::allocation::{Allocation, AllocationQuery};
use crate::domain::foundation::DomainError;

/// Read port for (teacher, class, subject) allocations.
///
/// Results are returned in registry order and may contain duplicates.
#[async_trait]
pub trait AllocationRegistry: Send + Sync {
    async fn list(&self, query: &AllocationQuery) -> Result<Vec<Allocation>, DomainError>;
}
