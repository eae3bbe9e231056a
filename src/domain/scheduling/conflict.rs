//! Conflict evaluation for session drafts.
//!
//! The evaluator is a pure function of its inputs. Conditions are ranked
//! and the first match wins:
//!
//! 1. `NoTeacher` - no teacher on the draft (advisory)
//! 2. `Holiday` - local start date inside a HOLIDAY entry
//! 3. `ExamDay` - local start date inside an EXAM_DAY entry
//! 4. `Overlap` - another booking for the same teacher intersects the slot
//!
//! HALF_DAY and SCHOOL_EVENT entries are informational only.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::allocation::{is_allocated, Allocation};
use crate::domain::calendar::{CalendarEntry, CalendarEntryType};
use crate::domain::foundation::{ClassId, SchoolClock, SessionId, SubjectId, TeacherId, TimeSlot};
use crate::domain::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictType {
    NoTeacher,
    Holiday,
    ExamDay,
    Overlap,
}

impl ConflictType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictType::NoTeacher => "NO_TEACHER",
            ConflictType::Holiday => "HOLIDAY",
            ConflictType::ExamDay => "EXAM_DAY",
            ConflictType::Overlap => "OVERLAP",
        }
    }

    /// Holiday and exam-day conflicts come from the school calendar.
    pub fn is_calendar(&self) -> bool {
        matches!(self, ConflictType::Holiday | ConflictType::ExamDay)
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one draft. A verdict is a warning, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConflictVerdict {
    pub has_conflict: bool,
    pub conflict_type: Option<ConflictType>,
}

impl ConflictVerdict {
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn conflict(conflict_type: ConflictType) -> Self {
        Self {
            has_conflict: true,
            conflict_type: Some(conflict_type),
        }
    }
}

/// Who a booking belongs to. Used to skip self-comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SlotOwner {
    /// A persisted session.
    Session(SessionId),
    /// A row of an import batch, by 1-based row number.
    ImportRow(u32),
    /// An unsaved interactive draft.
    Draft,
}

impl SlotOwner {
    /// Whether `other` is the same booking. Drafts have no identity.
    fn is_same_as(&self, other: &SlotOwner) -> bool {
        *self != SlotOwner::Draft && self == other
    }
}

/// The fields of a session or draft that conflict evaluation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCandidate {
    pub owner: SlotOwner,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: Option<TeacherId>,
    pub slot: TimeSlot,
}

/// Every condition that applies to a draft, for review screens.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Matching conflict types in rank order.
    pub conditions: Vec<ConflictType>,
    /// Titles of the HOLIDAY and EXAM_DAY entries covering the start date.
    pub calendar_titles: Vec<String>,
    /// Bookings that overlap the draft for the same teacher.
    pub overlapping: Vec<SlotOwner>,
    /// The assigned teacher has no allocation for the class and subject.
    pub teacher_unallocated: bool,
    /// The start date is a half day.
    pub half_day: bool,
}

impl ConflictReport {
    /// The ranked verdict: the first condition, if any.
    pub fn verdict(&self) -> ConflictVerdict {
        self.conditions
            .first()
            .copied()
            .map_or_else(ConflictVerdict::clear, ConflictVerdict::conflict)
    }
}

/// Evaluates drafts against a fixed calendar and allocation set.
#[derive(Debug, Clone, Copy)]
pub struct ConflictEvaluator<'a> {
    calendar: &'a [CalendarEntry],
    allocations: &'a [Allocation],
    clock: SchoolClock,
}

impl<'a> ConflictEvaluator<'a> {
    pub fn new(
        calendar: &'a [CalendarEntry],
        allocations: &'a [Allocation],
        clock: SchoolClock,
    ) -> Self {
        Self {
            calendar,
            allocations,
            clock,
        }
    }

    /// Ranked verdict for `draft` against the other bookings.
    pub fn evaluate(&self, draft: &ScheduleCandidate, others: &[ScheduleCandidate]) -> ConflictVerdict {
        let Some(teacher_id) = draft.teacher_id else {
            return ConflictVerdict::conflict(ConflictType::NoTeacher);
        };
        if self.covered_by(draft, CalendarEntryType::Holiday).next().is_some() {
            return ConflictVerdict::conflict(ConflictType::Holiday);
        }
        if self.covered_by(draft, CalendarEntryType::ExamDay).next().is_some() {
            return ConflictVerdict::conflict(ConflictType::ExamDay);
        }
        if overlapping(draft, &teacher_id, others).next().is_some() {
            return ConflictVerdict::conflict(ConflictType::Overlap);
        }
        ConflictVerdict::clear()
    }

    /// All conditions for `draft`; `report(..).verdict() == evaluate(..)`.
    pub fn report(&self, draft: &ScheduleCandidate, others: &[ScheduleCandidate]) -> ConflictReport {
        let mut report = ConflictReport::default();

        if draft.teacher_id.is_none() {
            report.conditions.push(ConflictType::NoTeacher);
        }
        for (entry_type, conflict_type) in [
            (CalendarEntryType::Holiday, ConflictType::Holiday),
            (CalendarEntryType::ExamDay, ConflictType::ExamDay),
        ] {
            let titles: Vec<String> = self
                .covered_by(draft, entry_type)
                .map(|e| e.title.clone())
                .collect();
            if !titles.is_empty() {
                report.conditions.push(conflict_type);
                report.calendar_titles.extend(titles);
            }
        }
        if let Some(teacher_id) = draft.teacher_id {
            report.overlapping = overlapping(draft, &teacher_id, others)
                .map(|o| o.owner)
                .collect();
            if !report.overlapping.is_empty() {
                report.conditions.push(ConflictType::Overlap);
            }
            report.teacher_unallocated =
                !is_allocated(self.allocations, &teacher_id, &draft.class_id, &draft.subject_id);
        }
        report.half_day = self
            .covered_by(draft, CalendarEntryType::HalfDay)
            .next()
            .is_some();

        report
    }

    fn covered_by(
        &self,
        draft: &ScheduleCandidate,
        entry_type: CalendarEntryType,
    ) -> impl Iterator<Item = &'a CalendarEntry> {
        let date = self.clock.local_date(&draft.slot.start());
        self.calendar
            .iter()
            .filter(move |e| e.entry_type == entry_type && e.covers(date))
    }
}

fn overlapping<'o>(
    draft: &'o ScheduleCandidate,
    teacher_id: &'o TeacherId,
    others: &'o [ScheduleCandidate],
) -> impl Iterator<Item = &'o ScheduleCandidate> {
    others.iter().filter(move |other| {
        !draft.owner.is_same_as(&other.owner)
            && other.teacher_id.as_ref() == Some(teacher_id)
            && draft.slot.overlaps(&other.slot)
    })
}

/// Evaluates a draft against persisted sessions.
pub fn evaluate_conflicts(
    draft: &ScheduleCandidate,
    sessions: &[Session],
    calendar: &[CalendarEntry],
    allocations: &[Allocation],
    clock: SchoolClock,
) -> ConflictVerdict {
    let others: Vec<ScheduleCandidate> = sessions.iter().map(Session::candidate).collect();
    ConflictEvaluator::new(calendar, allocations, clock).evaluate(draft, &others)
}
