//! PostgreSQL implementation of SessionStore.
//!
//! Persists Session aggregates to PostgreSQL. Lifecycle transitions lock
//! the row so concurrent actions on one session are serialised.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::foundation::{
    ChapterId, ClassId, DomainError, ErrorCode, LifecycleAction, SessionId, SessionStatus,
    SubjectId, TeacherId, TimeSlot, Timestamp, TopicId,
};
use crate::domain::session::{session_missing, transition_rejected, Session};
use crate::ports::{SessionFilter, SessionStore, StatusTransition};

const SESSION_COLUMNS: &str = "id, title, description, start_time, end_time, status, \
     class_id, subject_id, chapter_id, topic_id, teacher_id, created_at, updated_at";

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, title, description, start_time, end_time, status,
                class_id, subject_id, chapter_id, topic_id, teacher_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(*session.id().as_uuid())
        .bind(session.title())
        .bind(session.description())
        .bind(*session.start_time().as_datetime())
        .bind(*session.end_time().as_datetime())
        .bind(session.status().as_str())
        .bind(*session.class_id().as_uuid())
        .bind(*session.subject_id().as_uuid())
        .bind(session.chapter_id().map(|c| *c.as_uuid()))
        .bind(session.topic_id().map(|t| *t.as_uuid()))
        .bind(session.teacher_id().map(|t| *t.as_uuid()))
        .bind(*session.created_at().as_datetime())
        .bind(*session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                title = $2,
                description = $3,
                start_time = $4,
                end_time = $5,
                class_id = $6,
                subject_id = $7,
                chapter_id = $8,
                topic_id = $9,
                teacher_id = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(*session.id().as_uuid())
        .bind(session.title())
        .bind(session.description())
        .bind(*session.start_time().as_datetime())
        .bind(*session.end_time().as_datetime())
        .bind(*session.class_id().as_uuid())
        .bind(*session.subject_id().as_uuid())
        .bind(session.chapter_id().map(|c| *c.as_uuid()))
        .bind(session.topic_id().map(|t| *t.as_uuid()))
        .bind(session.teacher_id().map(|t| *t.as_uuid()))
        .bind(*session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(session_missing(session.id()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE id = $1",
            SESSION_COLUMNS
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        row.map(row_to_session).transpose()
    }

    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM sessions WHERE TRUE",
            SESSION_COLUMNS
        ));
        if let Some(class_id) = filter.class_id {
            query.push(" AND class_id = ").push_bind(*class_id.as_uuid());
        }
        if let Some(subject_id) = filter.subject_id {
            query.push(" AND subject_id = ").push_bind(*subject_id.as_uuid());
        }
        if let Some(teacher_id) = filter.teacher_id {
            query.push(" AND teacher_id = ").push_bind(*teacher_id.as_uuid());
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(to) = filter.to {
            query.push(" AND start_time < ").push_bind(*to.as_datetime());
        }
        if let Some(from) = filter.from {
            query.push(" AND end_time > ").push_bind(*from.as_datetime());
        }
        query.push(" ORDER BY start_time ASC");

        let rows = query.build().fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list sessions: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn transition(
        &self,
        id: &SessionId,
        action: LifecycleAction,
    ) -> Result<StatusTransition, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to begin transaction: {}", e))
        })?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE id = $1 FOR UPDATE",
            SESSION_COLUMNS
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to lock session: {}", e),
            )
        })?;

        let mut session = row_to_session(row.ok_or_else(|| session_missing(id))?)?;
        let from = session.status();
        session
            .apply(action)
            .map_err(|_| transition_rejected(id, from, action))?;

        sqlx::query("UPDATE sessions SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(*id.as_uuid())
            .bind(session.status().as_str())
            .bind(*session.updated_at().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to update session status: {}", e),
                )
            })?;

        tx.commit().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to commit transaction: {}", e))
        })?;

        Ok(StatusTransition { from, session })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

fn str_to_session_status(s: &str) -> Result<SessionStatus, DomainError> {
    SessionStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )
    })
}

fn row_to_session(row: PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let title: String = column(&row, "title")?;
    let description: Option<String> = column(&row, "description")?;
    let start_time: chrono::DateTime<chrono::Utc> = column(&row, "start_time")?;
    let end_time: chrono::DateTime<chrono::Utc> = column(&row, "end_time")?;
    let status_str: String = column(&row, "status")?;
    let status = str_to_session_status(&status_str)?;
    let class_id: uuid::Uuid = column(&row, "class_id")?;
    let subject_id: uuid::Uuid = column(&row, "subject_id")?;
    let chapter_id: Option<uuid::Uuid> = column(&row, "chapter_id")?;
    let topic_id: Option<uuid::Uuid> = column(&row, "topic_id")?;
    let teacher_id: Option<uuid::Uuid> = column(&row, "teacher_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(&row, "updated_at")?;

    let slot = TimeSlot::new(
        Timestamp::from_datetime(start_time),
        Timestamp::from_datetime(end_time),
    )
    .map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored time slot: {}", e),
        )
    })?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        title,
        description,
        slot,
        status,
        ClassId::from_uuid(class_id),
        SubjectId::from_uuid(subject_id),
        chapter_id.map(ChapterId::from_uuid),
        topic_id.map(TopicId::from_uuid),
        teacher_id.map(TeacherId::from_uuid),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_statuses_parse() {
        for status in SessionStatus::ALL {
            assert_eq!(str_to_session_status(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_a_database_error() {
        let err = str_to_session_status("active").unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
