//! ParseImportHandler - Turns an upload into a reviewable import job.
//!
//! Sessions, calendar entries and allocations are captured once, into a
//! snapshot the job keeps until it is discarded or evicted. Review and
//! commit never refresh it.

use std::sync::Arc;

use tracing::info;

use crate::domain::allocation::AllocationQuery;
use crate::domain::calendar::DateRange;
use crate::domain::foundation::{CommandMetadata, SchoolClock, Timestamp};
use crate::domain::import::{
    parse_local_date_time, read_rows, ImportError, ImportJob, RawImportRow, RowValidityPolicy,
    MAX_DURATION_MINUTES,
};
use crate::domain::scheduling::ScheduleSnapshot;
use crate::ports::{
    AllocationRegistry, CalendarService, CatalogReader, ImportJobRepository, SessionFilter,
    SessionStore,
};

/// Upload limits and row policy for parsing.
#[derive(Debug, Clone, Copy)]
pub struct ImportSettings {
    pub max_rows: usize,
    pub policy: RowValidityPolicy,
    pub clock: SchoolClock,
}

#[derive(Debug, Clone)]
pub struct ParseImportCommand {
    /// Raw CSV bytes.
    pub content: Vec<u8>,
}

pub struct ParseImportHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<dyn CatalogReader>,
    registry: Arc<dyn AllocationRegistry>,
    calendar: Arc<dyn CalendarService>,
    jobs: Arc<dyn ImportJobRepository>,
    settings: ImportSettings,
}

impl ParseImportHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<dyn CatalogReader>,
        registry: Arc<dyn AllocationRegistry>,
        calendar: Arc<dyn CalendarService>,
        jobs: Arc<dyn ImportJobRepository>,
        settings: ImportSettings,
    ) -> Self {
        Self {
            store,
            catalog,
            registry,
            calendar,
            jobs,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: ParseImportCommand,
        metadata: CommandMetadata,
    ) -> Result<ImportJob, ImportError> {
        let raw_rows = read_rows(cmd.content.as_slice(), self.settings.max_rows).await?;
        let catalog = self.catalog.load().await?;
        let snapshot = self.capture_snapshot(&raw_rows).await?;

        let job = ImportJob::build(
            metadata.user_id.clone(),
            raw_rows,
            &catalog,
            Arc::new(snapshot),
            self.settings.clock,
            self.settings.policy,
        );
        self.jobs.save(&job).await?;

        let summary = job.summary();
        info!(
            job_id = %job.id(),
            rows = summary.total,
            valid = summary.valid,
            invalid = summary.invalid,
            policy = job.policy().as_str(),
            "Import parsed"
        );
        Ok(job)
    }

    /// Captures everything the rows can conflict with. Rows whose date does
    /// not parse are invalid anyway and do not widen the window.
    async fn capture_snapshot(&self, rows: &[RawImportRow]) -> Result<ScheduleSnapshot, ImportError> {
        let allocations = self.registry.list(&AllocationQuery::all()).await?;
        let dates = rows
            .iter()
            .filter_map(|row| parse_local_date_time(&row.date_time).ok())
            .map(|local| local.date());
        let Some(range) = DateRange::covering(dates) else {
            return Ok(ScheduleSnapshot::capture(&[], Vec::new(), allocations));
        };

        let clock = self.settings.clock;
        let from = clock.from_local(range.from.and_time(chrono::NaiveTime::MIN));
        let to: Timestamp = clock
            .from_local(range.to.and_time(chrono::NaiveTime::MIN))
            .add_days(1)
            .plus_minutes(MAX_DURATION_MINUTES);
        let sessions = self
            .store
            .list(&SessionFilter::all().between(from, to))
            .await?;
        let calendar = self.calendar.list(&range).await?;

        Ok(ScheduleSnapshot::capture(&sessions, calendar, allocations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{date, metadata, Harness};
    use crate::domain::calendar::CalendarEntryType;
    use crate::domain::scheduling::{ConflictType, SlotOwner};
    use crate::domain::session::fixtures::{at, session_with, slot};

    const HEADER: &str = "Date/Time,Board,Class,Subject,Duration (minutes),Teacher\n";

    fn handler(h: &Harness, policy: RowValidityPolicy, max_rows: usize) -> ParseImportHandler {
        ParseImportHandler::new(
            h.store.clone(),
            h.catalog.clone(),
            h.registry.clone(),
            h.calendar.clone(),
            h.jobs.clone(),
            ImportSettings {
                max_rows,
                policy,
                clock: SchoolClock::utc(),
            },
        )
    }

    fn upload(rows: &[&str]) -> ParseImportCommand {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        ParseImportCommand {
            content: text.into_bytes(),
        }
    }

    #[tokio::test]
    async fn parses_and_stores_the_job() {
        let h = Harness::new();
        let job = handler(&h, RowValidityPolicy::AdvisoryConflicts, 100)
            .handle(
                upload(&[
                    "2026-01-05 09:00,CBSE,Class 5B,Science,45,",
                    "2026-01-05 10:00,CBSE,Class 5B,Art,45,",
                    "05/01/2026 11:00,CBSE,Class 5B,Maths,abc,",
                ]),
                metadata(),
            )
            .await
            .unwrap();

        let summary = job.summary();
        assert_eq!((summary.total, summary.valid, summary.invalid), (3, 1, 2));
        let row = job.row(1).unwrap();
        assert_eq!(row.resolved.as_ref().unwrap().teacher_id, Some(h.sample.asha));
        assert!(h.jobs.find_by_id(job.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn snapshot_holds_existing_sessions_and_calendar() {
        let h = Harness::new();
        h.add_calendar(CalendarEntryType::ExamDay, date(2026, 1, 5), "Unit Test").await;
        let existing = session_with(Some(h.sample.asha), slot(at(2026, 1, 5, 9, 0), 60));
        h.store.create(&existing).await.unwrap();

        let job = handler(&h, RowValidityPolicy::AdvisoryConflicts, 100)
            .handle(upload(&["2026-01-05 09:30,CBSE,Class 5B,Science,45,"]), metadata())
            .await
            .unwrap();

        let row = job.row(1).unwrap();
        assert_eq!(row.verdict.conflict_type, Some(ConflictType::ExamDay));
        assert_eq!(row.report.overlapping, vec![SlotOwner::Session(*existing.id())]);
        assert_eq!(job.snapshot().bookings().len(), 1);
    }

    #[tokio::test]
    async fn blocking_policy_invalidates_conflicted_rows() {
        let h = Harness::new();
        h.add_calendar(CalendarEntryType::Holiday, date(2026, 1, 26), "Republic Day").await;
        let job = handler(&h, RowValidityPolicy::BlockCalendarConflicts, 100)
            .handle(upload(&["2026-01-26 09:00,CBSE,Class 5B,Science,45,"]), metadata())
            .await
            .unwrap();
        assert!(!job.row(1).unwrap().valid);
    }

    #[tokio::test]
    async fn wrong_header_fails_the_upload() {
        let h = Harness::new();
        let result = handler(&h, RowValidityPolicy::AdvisoryConflicts, 100)
            .handle(
                ParseImportCommand {
                    content: b"Date,Board\n2026-01-05 09:00,CBSE\n".to_vec(),
                },
                metadata(),
            )
            .await;
        assert!(matches!(result, Err(ImportError::HeaderMismatch { .. })));
    }

    #[tokio::test]
    async fn row_limit_is_enforced() {
        let h = Harness::new();
        let result = handler(&h, RowValidityPolicy::AdvisoryConflicts, 1)
            .handle(
                upload(&[
                    "2026-01-05 09:00,CBSE,Class 5B,Science,45,",
                    "2026-01-05 10:00,CBSE,Class 5B,Science,45,",
                ]),
                metadata(),
            )
            .await;
        assert!(matches!(result, Err(ImportError::TooManyRows { max: 1 })));
    }
}
