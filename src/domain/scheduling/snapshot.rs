//! Immutable scheduling state captured for an import job.

use serde::{Deserialize, Serialize};

use crate::domain::allocation::Allocation;
use crate::domain::calendar::CalendarEntry;
use crate::domain::foundation::{SchoolClock, Timestamp};
use crate::domain::session::Session;

use super::{ConflictEvaluator, ScheduleCandidate};

/// Sessions, calendar and allocations as they were at parse time.
///
/// Held behind an `Arc` by the job and never refreshed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    bookings: Vec<ScheduleCandidate>,
    calendar: Vec<CalendarEntry>,
    allocations: Vec<Allocation>,
    captured_at: Timestamp,
}

impl ScheduleSnapshot {
    pub fn capture(
        sessions: &[Session],
        calendar: Vec<CalendarEntry>,
        allocations: Vec<Allocation>,
    ) -> Self {
        Self {
            bookings: sessions.iter().map(Session::candidate).collect(),
            calendar,
            allocations,
            captured_at: Timestamp::now(),
        }
    }

    pub fn bookings(&self) -> &[ScheduleCandidate] {
        &self.bookings
    }

    pub fn calendar(&self) -> &[CalendarEntry] {
        &self.calendar
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn captured_at(&self) -> &Timestamp {
        &self.captured_at
    }

    pub fn evaluator(&self, clock: SchoolClock) -> ConflictEvaluator<'_> {
        ConflictEvaluator::new(&self.calendar, &self.allocations, clock)
    }
}
