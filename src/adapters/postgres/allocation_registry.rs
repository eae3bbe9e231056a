//! PostgreSQL implementation of AllocationRegistry.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::allocation::{Allocation, AllocationQuery};
use crate::domain::foundation::{ClassId, DomainError, ErrorCode, SubjectId, TeacherId};
use crate::ports::AllocationRegistry;

/// Reads allocations in insertion order.
#[derive(Clone)]
pub struct PostgresAllocationRegistry {
    pool: PgPool,
}

impl PostgresAllocationRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AllocationRegistry for PostgresAllocationRegistry {
    async fn list(&self, query: &AllocationQuery) -> Result<Vec<Allocation>, DomainError> {
        let mut sql: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT teacher_id, class_id, subject_id FROM allocations WHERE TRUE");
        if let Some(teacher_id) = query.teacher_id {
            sql.push(" AND teacher_id = ").push_bind(*teacher_id.as_uuid());
        }
        if let Some(class_id) = query.class_id {
            sql.push(" AND class_id = ").push_bind(*class_id.as_uuid());
        }
        if let Some(subject_id) = query.subject_id {
            sql.push(" AND subject_id = ").push_bind(*subject_id.as_uuid());
        }
        sql.push(" ORDER BY position ASC");

        let rows = sql.build().fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list allocations: {}", e),
            )
        })?;

        rows.into_iter()
            .map(|row| {
                let read = |name: &str| -> Result<uuid::Uuid, DomainError> {
                    row.try_get(name).map_err(|e| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Failed to get {}: {}", name, e),
                        )
                    })
                };
                Ok(Allocation::new(
                    TeacherId::from_uuid(read("teacher_id")?),
                    ClassId::from_uuid(read("class_id")?),
                    SubjectId::from_uuid(read("subject_id")?),
                ))
            })
            .collect()
    }
}
