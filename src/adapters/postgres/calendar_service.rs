//! PostgreSQL implementation of CalendarService.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

use crate::domain::calendar::{CalendarEntry, CalendarEntryType, DateRange};
use crate::domain::foundation::{CalendarEntryId, DomainError, ErrorCode};
use crate::ports::CalendarService;

#[derive(Clone)]
pub struct PostgresCalendarService {
    pool: PgPool,
}

impl PostgresCalendarService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarService for PostgresCalendarService {
    async fn list(&self, range: &DateRange) -> Result<Vec<CalendarEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, end_date, entry_type, title, description
            FROM calendar_entries
            WHERE date <= $2 AND COALESCE(end_date, date) >= $1
            ORDER BY date ASC
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list calendar entries: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_entry).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_entry(row: sqlx::postgres::PgRow) -> Result<CalendarEntry, DomainError> {
    let db_err = |e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read calendar entry: {}", e),
        )
    };

    let id: uuid::Uuid = row.try_get("id").map_err(db_err)?;
    let date: NaiveDate = row.try_get("date").map_err(db_err)?;
    let end_date: Option<NaiveDate> = row.try_get("end_date").map_err(db_err)?;
    let type_str: String = row.try_get("entry_type").map_err(db_err)?;
    let title: String = row.try_get("title").map_err(db_err)?;
    let description: Option<String> = row.try_get("description").map_err(db_err)?;

    let entry_type = CalendarEntryType::parse(&type_str).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid calendar entry type: {}", type_str),
        )
    })?;

    Ok(CalendarEntry {
        id: CalendarEntryId::from_uuid(id),
        date,
        end_date,
        entry_type,
        title,
        description,
    })
}
