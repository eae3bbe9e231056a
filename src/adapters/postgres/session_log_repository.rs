//! PostgreSQL implementation of SessionLogRepository.
//!
//! Student notes are stored as a JSONB array alongside the log. Saving
//! again for the same session replaces the earlier log, so a submission
//! whose status change failed can be retried.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, SessionLogId, Timestamp,
};
use crate::domain::session::{SessionLog, StudentNote};
use crate::ports::SessionLogRepository;

#[derive(Clone)]
pub struct PostgresSessionLogRepository {
    pool: PgPool,
}

impl PostgresSessionLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionLogRepository for PostgresSessionLogRepository {
    async fn save(&self, log: &SessionLog) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO session_logs (
                id, session_id, topics_covered, homework, class_notes,
                challenges, next_steps, student_notes, submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (session_id) DO UPDATE SET
                id = EXCLUDED.id,
                topics_covered = EXCLUDED.topics_covered,
                homework = EXCLUDED.homework,
                class_notes = EXCLUDED.class_notes,
                challenges = EXCLUDED.challenges,
                next_steps = EXCLUDED.next_steps,
                student_notes = EXCLUDED.student_notes,
                submitted_at = EXCLUDED.submitted_at
            "#,
        )
        .bind(*log.id.as_uuid())
        .bind(*log.session_id.as_uuid())
        .bind(&log.topics_covered)
        .bind(&log.homework)
        .bind(&log.class_notes)
        .bind(&log.challenges)
        .bind(&log.next_steps)
        .bind(Json(&log.student_notes))
        .bind(*log.submitted_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session log: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionLog>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, topics_covered, homework, class_notes,
                   challenges, next_steps, student_notes, submitted_at
            FROM session_logs
            WHERE session_id = $1
            "#,
        )
        .bind(*session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session log: {}", e),
            )
        })?;

        row.map(row_to_log).transpose()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_log(row: sqlx::postgres::PgRow) -> Result<SessionLog, DomainError> {
    let db_err = |e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read session log: {}", e),
        )
    };

    let id: uuid::Uuid = row.try_get("id").map_err(db_err)?;
    let session_id: uuid::Uuid = row.try_get("session_id").map_err(db_err)?;
    let Json(student_notes): Json<Vec<StudentNote>> =
        row.try_get("student_notes").map_err(db_err)?;
    let submitted_at: chrono::DateTime<chrono::Utc> =
        row.try_get("submitted_at").map_err(db_err)?;

    Ok(SessionLog {
        id: SessionLogId::from_uuid(id),
        session_id: SessionId::from_uuid(session_id),
        topics_covered: row.try_get("topics_covered").map_err(db_err)?,
        homework: row.try_get("homework").map_err(db_err)?,
        class_notes: row.try_get("class_notes").map_err(db_err)?,
        challenges: row.try_get("challenges").map_err(db_err)?,
        next_steps: row.try_get("next_steps").map_err(db_err)?,
        student_notes,
        submitted_at: Timestamp::from_datetime(submitted_at),
    })
}
