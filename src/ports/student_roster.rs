//! Student roster port (read-only).

use async_trait::async_trait;

use crate::domain::catalog::Student;
use crate::domain::foundation::{ClassId, DomainError};

#[async_trait]
pub trait StudentRoster: Send + Sync {
    /// Students enrolled in the class. Empty for unknown classes.
    async fn list_by_class(&self, class_id: &ClassId) -> Result<Vec<Student>, DomainError>;
}
