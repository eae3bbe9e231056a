use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::Student;
use crate::domain::foundation::{ClassId, DomainError};
use crate::ports::StudentRoster;

#[derive(Default)]
pub struct InMemoryStudentRoster {
    students: RwLock<Vec<Student>>,
}

impl InMemoryStudentRoster {
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            students: RwLock::new(students),
        }
    }
}

#[async_trait]
impl StudentRoster for InMemoryStudentRoster {
    async fn list_by_class(&self, class_id: &ClassId) -> Result<Vec<Student>, DomainError> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .filter(|s| &s.class_id == class_id)
            .cloned()
            .collect())
    }
}
