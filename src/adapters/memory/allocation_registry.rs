use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::allocation::{Allocation, AllocationQuery};
use crate::domain::foundation::DomainError;
use crate::ports::AllocationRegistry;

/// In-memory allocation registry. Keeps insertion order and duplicates.
#[derive(Default)]
pub struct InMemoryAllocationRegistry {
    allocations: RwLock<Vec<Allocation>>,
}

impl InMemoryAllocationRegistry {
    pub fn new(allocations: Vec<Allocation>) -> Self {
        Self {
            allocations: RwLock::new(allocations),
        }
    }

    pub async fn add(&self, allocation: Allocation) {
        self.allocations.write().await.push(allocation);
    }
}

#[async_trait]
impl AllocationRegistry for InMemoryAllocationRegistry {
    async fn list(&self, query: &AllocationQuery) -> Result<Vec<Allocation>, DomainError> {
        Ok(self
            .allocations
            .read()
            .await
            .iter()
            .filter(|a| query.matches(a))
            .copied()
            .collect())
    }
}
