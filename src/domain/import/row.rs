//! Import rows: resolution against the catalog and per-row review state.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalog;
use crate::domain::foundation::{BoardId, ClassId, SchoolClock, SubjectId, TeacherId, TimeSlot};
use crate::domain::scheduling::{
    auto_assign, generate_title, AutoAssignment, ConflictReport, ConflictVerdict, ScheduleCandidate,
    ScheduleSnapshot, SlotOwner,
};
use crate::domain::session::{NewSession, TeacherSource};

use super::parser::{parse_duration_minutes, parse_local_date_time};
use super::{RawImportRow, RowError};

/// A row whose names all resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRow {
    pub board_id: BoardId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: Option<TeacherId>,
    pub teacher_source: TeacherSource,
    /// Present when the teacher came from the allocation registry.
    pub assignment: Option<AutoAssignment>,
    pub slot: TimeSlot,
    pub title: String,
}

impl ResolvedRow {
    /// Resolves a raw row, reporting the first failing cell in column order.
    pub fn resolve(
        raw: &RawImportRow,
        catalog: &Catalog,
        snapshot: &ScheduleSnapshot,
        clock: &SchoolClock,
    ) -> Result<Self, RowError> {
        if let Some(err) = &raw.encoding_error {
            return Err(err.clone());
        }
        let local_start = parse_local_date_time(&raw.date_time)?;
        let board = catalog
            .find_board(&raw.board)
            .ok_or_else(|| RowError::reference("board", raw.board.as_str()))?;
        let class = catalog
            .find_class(&board.id, &raw.class)
            .ok_or_else(|| RowError::reference("class", raw.class.as_str()))?;
        let subject = catalog
            .find_subject(&class.id, &raw.subject)
            .ok_or_else(|| RowError::reference("subject", raw.subject.as_str()))?;
        let minutes = parse_duration_minutes(&raw.duration_minutes)?;
        let slot = TimeSlot::starting_at(clock.from_local(local_start), minutes)?;

        let (teacher_id, teacher_source, assignment) = if raw.teacher.trim().is_empty() {
            let assignment = auto_assign(snapshot.allocations(), &class.id, &subject.id);
            let teacher_id = assignment.teacher();
            let source = if teacher_id.is_some() {
                TeacherSource::Auto
            } else {
                TeacherSource::Unassigned
            };
            (teacher_id, source, Some(assignment))
        } else {
            let teacher = catalog
                .find_teacher(&raw.teacher)
                .ok_or_else(|| RowError::reference("teacher", raw.teacher.as_str()))?;
            (Some(teacher.id), TeacherSource::Manual, None)
        };

        let labels = catalog
            .title_labels(&class.id, &subject.id)
            .ok_or_else(|| RowError::reference("subject", raw.subject.as_str()))?;

        Ok(Self {
            board_id: board.id,
            class_id: class.id,
            subject_id: subject.id,
            teacher_id,
            teacher_source,
            assignment,
            slot,
            title: generate_title(&slot.start(), &labels, clock),
        })
    }

    pub fn candidate(&self, row_number: u32) -> ScheduleCandidate {
        ScheduleCandidate {
            owner: SlotOwner::ImportRow(row_number),
            class_id: self.class_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            slot: self.slot,
        }
    }

    pub fn to_new_session(&self) -> NewSession {
        NewSession {
            title: self.title.clone(),
            description: None,
            slot: self.slot,
            class_id: self.class_id,
            subject_id: self.subject_id,
            chapter_id: None,
            topic_id: None,
            teacher_id: self.teacher_id,
        }
    }
}

/// One row of an import job as shown on the review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub raw: RawImportRow,
    pub resolved: Option<ResolvedRow>,
    pub error: Option<RowError>,
    /// Every conflict condition; empty for unresolved rows.
    pub report: ConflictReport,
    pub verdict: ConflictVerdict,
    /// Whether commit will create a session from this row.
    pub valid: bool,
}

impl ImportRow {
    pub fn new(raw: RawImportRow, resolution: Result<ResolvedRow, RowError>) -> Self {
        let (resolved, error) = match resolution {
            Ok(row) => (Some(row), None),
            Err(err) => (None, Some(err)),
        };
        Self {
            raw,
            resolved,
            error,
            report: ConflictReport::default(),
            verdict: ConflictVerdict::clear(),
            valid: false,
        }
    }

    pub fn row_number(&self) -> u32 {
        self.raw.row_number
    }

    pub fn candidate(&self) -> Option<ScheduleCandidate> {
        self.resolved
            .as_ref()
            .map(|r| r.candidate(self.raw.row_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allocation::Allocation;
    use crate::domain::catalog::fixtures::{sample, SampleCatalog};

    fn raw(date_time: &str, board: &str, class: &str, subject: &str, minutes: &str, teacher: &str) -> RawImportRow {
        RawImportRow {
            row_number: 1,
            date_time: date_time.into(),
            board: board.into(),
            class: class.into(),
            subject: subject.into(),
            duration_minutes: minutes.into(),
            teacher: teacher.into(),
            encoding_error: None,
        }
    }

    fn snapshot(s: &SampleCatalog) -> ScheduleSnapshot {
        ScheduleSnapshot::capture(
            &[],
            vec![],
            vec![Allocation::new(s.asha, s.class_5b, s.science)],
        )
    }

    fn resolve(row: RawImportRow) -> Result<ResolvedRow, RowError> {
        let s = sample();
        ResolvedRow::resolve(&row, &s.catalog, &snapshot(&s), &SchoolClock::utc())
    }

    #[test]
    fn blank_teacher_is_auto_assigned_and_titled() {
        let s = sample();
        let row = ResolvedRow::resolve(
            &raw("2026-01-05 14:30", "CBSE", "Class 5B", "Science", "45", ""),
            &s.catalog,
            &snapshot(&s),
            &SchoolClock::utc(),
        )
        .unwrap();
        assert_eq!(row.teacher_id, Some(s.asha));
        assert_eq!(row.teacher_source, TeacherSource::Auto);
        assert_eq!(row.title, "2601051430-CBSE-Class 5B-Science (2526)");
        assert_eq!(row.slot.minutes(), 45);
    }

    #[test]
    fn named_teacher_is_used_as_given() {
        let s = sample();
        let row = ResolvedRow::resolve(
            &raw("2026-01-05 14:30", "CBSE", "Class 5B", "Science", "45", "ravi kumar"),
            &s.catalog,
            &snapshot(&s),
            &SchoolClock::utc(),
        )
        .unwrap();
        assert_eq!(row.teacher_id, Some(s.ravi));
        assert_eq!(row.teacher_source, TeacherSource::Manual);
        assert!(row.assignment.is_none());
    }

    #[test]
    fn unallocated_subject_leaves_teacher_absent() {
        let row = resolve(raw("2026-01-05 14:30", "CBSE", "Class 5B", "Maths", "45", "")).unwrap();
        assert!(row.teacher_id.is_none());
        assert_eq!(row.assignment, Some(AutoAssignment::NoMatch));
    }

    #[test]
    fn unknown_names_are_reference_errors() {
        let cases = [
            (raw("2026-01-05 14:30", "ICSE", "Class 5B", "Science", "45", ""), "board"),
            (raw("2026-01-05 14:30", "CBSE", "Class 9A", "Science", "45", ""), "class"),
            (raw("2026-01-05 14:30", "CBSE", "Class 5B", "Art", "45", ""), "subject"),
            (raw("2026-01-05 14:30", "CBSE", "Class 5B", "Science", "45", "Nobody"), "teacher"),
        ];
        for (row, field) in cases {
            let err = resolve(row).unwrap_err();
            assert!(matches!(err, RowError::Reference { .. }), "{:?}", err);
            assert_eq!(err.field(), field);
        }
    }

    #[test]
    fn undecodable_cell_invalidates_the_row() {
        let mut row = raw("2026-01-05 14:30", "CBSE", "Class 5B", "Sci\u{FFFD}ence", "45", "");
        row.encoding_error = Some(RowError::validation("subject", "is not valid UTF-8"));
        let err = resolve(row).unwrap_err();
        assert!(matches!(err, RowError::Validation { .. }));
        assert_eq!(err.field(), "subject");
    }

    #[test]
    fn unparsable_cells_are_validation_errors() {
        let bad_date = resolve(raw("5th Jan", "CBSE", "Class 5B", "Science", "45", "")).unwrap_err();
        let bad_duration = resolve(raw("2026-01-05 14:30", "CBSE", "Class 5B", "Science", "x", "")).unwrap_err();
        assert!(matches!(bad_date, RowError::Validation { .. }));
        assert_eq!(bad_duration.field(), "duration_minutes");
    }
}
