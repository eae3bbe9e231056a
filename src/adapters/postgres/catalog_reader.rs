//! PostgreSQL catalog and roster readers.
//!
//! The catalog tables are owned by the school administration system and
//! only read here.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::catalog::{
    Board, Catalog, Chapter, SchoolClass, Student, Subject, Teacher, Topic,
};
use crate::domain::foundation::{
    BoardId, ChapterId, ClassId, DomainError, ErrorCode, StudentId, SubjectId, TeacherId, TopicId,
};
use crate::ports::{CatalogReader, StudentRoster};

#[derive(Clone)]
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, sql: &str, what: &str) -> Result<Vec<PgRow>, DomainError> {
        sqlx::query(sql).fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load {}: {}", what, e),
            )
        })
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalogReader {
    async fn load(&self) -> Result<Catalog, DomainError> {
        let boards = self
            .fetch("SELECT id, name FROM boards ORDER BY name", "boards")
            .await?
            .iter()
            .map(|row| {
                Ok(Board {
                    id: BoardId::from_uuid(get(row, "id")?),
                    name: get(row, "name")?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let classes = self
            .fetch(
                "SELECT id, board_id, name, section FROM classes ORDER BY name, section",
                "classes",
            )
            .await?
            .iter()
            .map(|row| {
                Ok(SchoolClass {
                    id: ClassId::from_uuid(get(row, "id")?),
                    board_id: BoardId::from_uuid(get(row, "board_id")?),
                    name: get(row, "name")?,
                    section: get(row, "section")?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let subjects = self
            .fetch("SELECT id, class_id, name FROM subjects ORDER BY name", "subjects")
            .await?
            .iter()
            .map(|row| {
                Ok(Subject {
                    id: SubjectId::from_uuid(get(row, "id")?),
                    class_id: ClassId::from_uuid(get(row, "class_id")?),
                    name: get(row, "name")?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let chapters = self
            .fetch("SELECT id, subject_id, name FROM chapters ORDER BY name", "chapters")
            .await?
            .iter()
            .map(|row| {
                Ok(Chapter {
                    id: ChapterId::from_uuid(get(row, "id")?),
                    subject_id: SubjectId::from_uuid(get(row, "subject_id")?),
                    name: get(row, "name")?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let topics = self
            .fetch("SELECT id, chapter_id, name FROM topics ORDER BY name", "topics")
            .await?
            .iter()
            .map(|row| {
                Ok(Topic {
                    id: TopicId::from_uuid(get(row, "id")?),
                    chapter_id: ChapterId::from_uuid(get(row, "chapter_id")?),
                    name: get(row, "name")?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let teachers = self
            .fetch("SELECT id, name FROM teachers ORDER BY name", "teachers")
            .await?
            .iter()
            .map(|row| {
                Ok(Teacher {
                    id: TeacherId::from_uuid(get(row, "id")?),
                    name: get(row, "name")?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Catalog {
            boards,
            classes,
            subjects,
            chapters,
            topics,
            teachers,
        })
    }
}

/// PostgreSQL implementation of StudentRoster.
#[derive(Clone)]
pub struct PostgresStudentRoster {
    pool: PgPool,
}

impl PostgresStudentRoster {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRoster for PostgresStudentRoster {
    async fn list_by_class(&self, class_id: &ClassId) -> Result<Vec<Student>, DomainError> {
        let rows = sqlx::query("SELECT id, class_id, name FROM students WHERE class_id = $1 ORDER BY name")
            .bind(*class_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list students: {}", e),
                )
            })?;

        rows.iter()
            .map(|row| {
                Ok(Student {
                    id: StudentId::from_uuid(get(row, "id")?),
                    class_id: ClassId::from_uuid(get(row, "class_id")?),
                    name: get(row, "name")?,
                })
            })
            .collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn get<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}
