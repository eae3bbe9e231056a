//! Import job: a parsed batch held between upload, review and commit.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalog;
use crate::domain::foundation::{ImportJobId, SchoolClock, SessionId, TeacherId, Timestamp, UserId};
use crate::domain::scheduling::{ScheduleCandidate, ScheduleSnapshot};
use crate::domain::session::TeacherSource;

use super::{ImportError, ImportRow, RawImportRow, ResolvedRow, RowValidityPolicy};

/// Row counts for the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Resolved rows with any conflict, valid or not.
    pub with_conflicts: usize,
}

/// A parsed upload.
///
/// # Invariants
///
/// - rows are evaluated against `snapshot` plus the other resolved rows
/// - `snapshot` never changes after `build`
#[derive(Debug, Clone)]
pub struct ImportJob {
    id: ImportJobId,
    created_by: UserId,
    created_at: Timestamp,
    snapshot: Arc<ScheduleSnapshot>,
    clock: SchoolClock,
    policy: RowValidityPolicy,
    rows: Vec<ImportRow>,
    commit_count: u32,
}

impl ImportJob {
    /// Resolves and evaluates every row of an upload.
    pub fn build(
        created_by: UserId,
        raw_rows: Vec<RawImportRow>,
        catalog: &Catalog,
        snapshot: Arc<ScheduleSnapshot>,
        clock: SchoolClock,
        policy: RowValidityPolicy,
    ) -> Self {
        let rows = raw_rows
            .into_iter()
            .map(|raw| {
                let resolution = ResolvedRow::resolve(&raw, catalog, &snapshot, &clock);
                ImportRow::new(raw, resolution)
            })
            .collect();

        let mut job = Self {
            id: ImportJobId::new(),
            created_by,
            created_at: Timestamp::now(),
            snapshot,
            clock,
            policy,
            rows,
            commit_count: 0,
        };
        job.evaluate_rows();
        job
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ImportJobId {
        &self.id
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn snapshot(&self) -> &Arc<ScheduleSnapshot> {
        &self.snapshot
    }

    pub fn policy(&self) -> RowValidityPolicy {
        self.policy
    }

    pub fn rows(&self) -> &[ImportRow] {
        &self.rows
    }

    pub fn row(&self, row_number: u32) -> Option<&ImportRow> {
        self.rows.iter().find(|r| r.row_number() == row_number)
    }

    pub fn commit_count(&self) -> u32 {
        self.commit_count
    }

    pub fn summary(&self) -> ImportSummary {
        let valid = self.rows.iter().filter(|r| r.valid).count();
        ImportSummary {
            total: self.rows.len(),
            valid,
            invalid: self.rows.len() - valid,
            with_conflicts: self
                .rows
                .iter()
                .filter(|r| r.resolved.is_some() && r.verdict.has_conflict)
                .count(),
        }
    }

    /// Rows commit will persist, in upload order.
    pub fn committable_rows(&self) -> impl Iterator<Item = (u32, &ResolvedRow)> {
        self.rows
            .iter()
            .filter(|r| r.valid)
            .filter_map(|r| r.resolved.as_ref().map(|res| (r.row_number(), res)))
    }

    /// Rows commit will skip, with the reason.
    pub fn skipped_rows(&self) -> impl Iterator<Item = (u32, String)> + '_ {
        self.rows.iter().filter(|r| !r.valid).map(|r| {
            let reason = match (&r.error, r.verdict.conflict_type) {
                (Some(err), _) => err.to_string(),
                (None, Some(conflict)) => format!("blocked by {} conflict", conflict),
                (None, None) => "row is invalid".to_string(),
            };
            (r.row_number(), reason)
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Review
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces a row's teacher and re-evaluates the batch against the same
    /// snapshot. `None` clears the teacher.
    pub fn override_teacher(
        &mut self,
        row_number: u32,
        teacher_id: Option<TeacherId>,
        catalog: &Catalog,
    ) -> Result<&ImportRow, ImportError> {
        if let Some(id) = teacher_id {
            if catalog.teacher(&id).is_none() {
                return Err(ImportError::UnknownTeacher(id.to_string()));
            }
        }
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.row_number() == row_number)
            .ok_or(ImportError::UnknownRow(row_number))?;
        let resolved = row
            .resolved
            .as_mut()
            .ok_or(ImportError::RowNotResolved(row_number))?;
        resolved.teacher_id = teacher_id;
        resolved.teacher_source = TeacherSource::Manual;
        resolved.assignment = None;

        self.evaluate_rows();
        self.row(row_number).ok_or(ImportError::UnknownRow(row_number))
    }

    /// Records one commit run; a job may be committed again.
    pub fn record_commit(&mut self) -> u32 {
        self.commit_count += 1;
        self.commit_count
    }

    fn evaluate_rows(&mut self) {
        let mut others: Vec<ScheduleCandidate> = self.snapshot.bookings().to_vec();
        others.extend(self.rows.iter().filter_map(ImportRow::candidate));

        let evaluator = self.snapshot.evaluator(self.clock);
        for row in &mut self.rows {
            match row.candidate() {
                Some(candidate) => {
                    row.report = evaluator.report(&candidate, &others);
                    row.verdict = row.report.verdict();
                    row.valid = self.policy.admits(&row.verdict);
                }
                None => row.valid = false,
            }
        }
    }
}

/// What commit did with one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowCommitOutcome {
    Created { session_id: SessionId },
    Failed { reason: String },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCommitResult {
    pub row_number: u32,
    #[serde(flatten)]
    pub outcome: RowCommitOutcome,
}

/// Result of one commit run. Partial failure is a value, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReport {
    pub job_id: ImportJobId,
    pub results: Vec<RowCommitResult>,
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl CommitReport {
    pub fn new(job_id: ImportJobId, mut results: Vec<RowCommitResult>) -> Self {
        results.sort_by_key(|r| r.row_number);
        let count = |f: fn(&RowCommitOutcome) -> bool| results.iter().filter(|r| f(&r.outcome)).count();
        let created = count(|o| matches!(o, RowCommitOutcome::Created { .. }));
        let failed = count(|o| matches!(o, RowCommitOutcome::Failed { .. }));
        let skipped = count(|o| matches!(o, RowCommitOutcome::Skipped { .. }));
        Self {
            job_id,
            results,
            created,
            failed,
            skipped,
        }
    }

    /// Rows that did not produce a session.
    pub fn errors(&self) -> usize {
        self.failed + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allocation::Allocation;
    use crate::domain::calendar::{CalendarEntry, CalendarEntryType};
    use crate::domain::catalog::fixtures::{sample, SampleCatalog};
    use crate::domain::scheduling::{ConflictType, SlotOwner};
    use crate::domain::session::fixtures::{at, session_with, slot};
    use chrono::NaiveDate;

    fn raw(row_number: u32, date_time: &str, subject: &str, teacher: &str) -> RawImportRow {
        RawImportRow {
            row_number,
            date_time: date_time.into(),
            board: "CBSE".into(),
            class: "Class 5B".into(),
            subject: subject.into(),
            duration_minutes: "45".into(),
            teacher: teacher.into(),
            encoding_error: None,
        }
    }

    fn job_with(
        s: &SampleCatalog,
        snapshot: ScheduleSnapshot,
        policy: RowValidityPolicy,
        rows: Vec<RawImportRow>,
    ) -> ImportJob {
        ImportJob::build(
            UserId::system(),
            rows,
            &s.catalog,
            Arc::new(snapshot),
            SchoolClock::utc(),
            policy,
        )
    }

    fn allocations(s: &SampleCatalog) -> Vec<Allocation> {
        vec![
            Allocation::new(s.asha, s.class_5b, s.science),
            Allocation::new(s.ravi, s.class_5b, s.maths),
        ]
    }

    #[test]
    fn reference_and_validation_failures_are_invalid_rows() {
        let s = sample();
        let job = job_with(
            &s,
            ScheduleSnapshot::capture(&[], vec![], allocations(&s)),
            RowValidityPolicy::AdvisoryConflicts,
            vec![
                raw(1, "2026-01-05 09:00", "Science", ""),
                raw(2, "not a date", "Science", ""),
                raw(3, "2026-01-05 10:00", "Art", ""),
                raw(4, "2026-01-05 11:00", "Maths", ""),
            ],
        );
        let summary = job.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 2);
        assert_eq!(
            job.committable_rows().map(|(n, _)| n).collect::<Vec<_>>(),
            vec![1, 4]
        );
        assert_eq!(job.skipped_rows().map(|(n, _)| n).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn rows_in_the_same_batch_overlap_each_other() {
        let s = sample();
        let job = job_with(
            &s,
            ScheduleSnapshot::capture(&[], vec![], allocations(&s)),
            RowValidityPolicy::AdvisoryConflicts,
            vec![
                raw(1, "2026-01-05 09:00", "Science", ""),
                raw(2, "2026-01-05 09:30", "Science", ""),
            ],
        );
        for row in job.rows() {
            assert_eq!(row.verdict.conflict_type, Some(ConflictType::Overlap));
            assert!(row.valid);
        }
        assert_eq!(job.row(1).unwrap().report.overlapping, vec![SlotOwner::ImportRow(2)]);
        assert_eq!(job.summary().with_conflicts, 2);
    }

    #[test]
    fn rows_overlap_snapshot_sessions() {
        let s = sample();
        let existing = session_with(Some(s.asha), slot(at(2026, 1, 5, 9, 0), 60));
        let job = job_with(
            &s,
            ScheduleSnapshot::capture(&[existing.clone()], vec![], allocations(&s)),
            RowValidityPolicy::BlockAllConflicts,
            vec![raw(1, "2026-01-05 09:15", "Science", "")],
        );
        let row = job.row(1).unwrap();
        assert_eq!(row.report.overlapping, vec![SlotOwner::Session(*existing.id())]);
        assert!(!row.valid);
    }

    #[test]
    fn calendar_policy_blocks_holidays_but_not_missing_teachers() {
        let s = sample();
        let holiday = CalendarEntry::new(
            NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
            None,
            CalendarEntryType::Holiday,
            "Republic Day",
        )
        .unwrap();
        let job = job_with(
            &s,
            ScheduleSnapshot::capture(&[], vec![holiday], vec![]),
            RowValidityPolicy::BlockCalendarConflicts,
            vec![
                raw(1, "2026-01-26 09:00", "Science", "Asha Rao"),
                raw(2, "2026-01-27 09:00", "Science", ""),
            ],
        );
        assert!(!job.row(1).unwrap().valid);
        assert_eq!(job.row(1).unwrap().report.calendar_titles, vec!["Republic Day".to_string()]);
        assert_eq!(job.row(2).unwrap().verdict.conflict_type, Some(ConflictType::NoTeacher));
        assert!(job.row(2).unwrap().valid);
    }

    #[test]
    fn teacher_override_reevaluates_the_batch() {
        let s = sample();
        let mut job = job_with(
            &s,
            ScheduleSnapshot::capture(&[], vec![], allocations(&s)),
            RowValidityPolicy::BlockAllConflicts,
            vec![
                raw(1, "2026-01-05 09:00", "Science", ""),
                raw(2, "2026-01-05 09:30", "Science", ""),
            ],
        );
        assert_eq!(job.summary().valid, 0);

        let row = job.override_teacher(2, Some(s.ravi), &s.catalog).unwrap();
        assert_eq!(row.resolved.as_ref().unwrap().teacher_source, TeacherSource::Manual);
        assert_eq!(job.summary().valid, 2);
    }

    #[test]
    fn override_rejects_unknown_rows_teachers_and_unresolved_rows() {
        let s = sample();
        let mut job = job_with(
            &s,
            ScheduleSnapshot::capture(&[], vec![], allocations(&s)),
            RowValidityPolicy::AdvisoryConflicts,
            vec![raw(1, "2026-01-05 09:00", "Art", "")],
        );
        assert!(matches!(
            job.override_teacher(9, Some(s.asha), &s.catalog),
            Err(ImportError::UnknownRow(9))
        ));
        assert!(matches!(
            job.override_teacher(1, Some(s.asha), &s.catalog),
            Err(ImportError::RowNotResolved(1))
        ));
        assert!(matches!(
            job.override_teacher(1, Some(TeacherId::new()), &s.catalog),
            Err(ImportError::UnknownTeacher(_))
        ));
    }

    #[test]
    fn commit_report_counts_outcomes() {
        let report = CommitReport::new(
            ImportJobId::new(),
            vec![
                RowCommitResult {
                    row_number: 2,
                    outcome: RowCommitOutcome::Skipped { reason: "bad".into() },
                },
                RowCommitResult {
                    row_number: 1,
                    outcome: RowCommitOutcome::Created { session_id: SessionId::new() },
                },
                RowCommitResult {
                    row_number: 3,
                    outcome: RowCommitOutcome::Failed { reason: "db".into() },
                },
            ],
        );
        assert_eq!((report.created, report.failed, report.skipped), (1, 1, 1));
        assert_eq!(report.errors(), 2);
        assert_eq!(report.results[0].row_number, 1);
    }
}
