//! PreviewConflictsHandler - Evaluates a draft without saving anything.
//!
//! Used by the form to show warnings as fields change. When the draft is
//! an edit of an existing session, that session is left out of the
//! overlap check.

use std::sync::Arc;

use super::conflict_inputs::ConflictInputs;
use crate::domain::calendar::OperatingSchedule;
use crate::domain::foundation::{
    ClassId, SchoolClock, SessionId, SubjectId, TeacherId, TimeSlot, Timestamp,
};
use crate::domain::scheduling::{ConflictReport, ConflictVerdict, ScheduleCandidate, SlotOwner};
use crate::domain::session::SessionError;
use crate::ports::{AllocationRegistry, CalendarService, SessionStore};

#[derive(Debug, Clone)]
pub struct PreviewConflictsQuery {
    /// The session being edited, if any.
    pub session_id: Option<SessionId>,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: Option<TeacherId>,
    pub start_time: Timestamp,
    /// Defaults to one period after `start_time`.
    pub end_time: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct ConflictPreview {
    pub slot: TimeSlot,
    pub verdict: ConflictVerdict,
    pub report: ConflictReport,
    /// Whether the slot sits inside school hours on a working day.
    pub within_school_day: bool,
}

pub struct PreviewConflictsHandler {
    store: Arc<dyn SessionStore>,
    registry: Arc<dyn AllocationRegistry>,
    calendar: Arc<dyn CalendarService>,
    schedule: OperatingSchedule,
    clock: SchoolClock,
}

impl PreviewConflictsHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        registry: Arc<dyn AllocationRegistry>,
        calendar: Arc<dyn CalendarService>,
        schedule: OperatingSchedule,
        clock: SchoolClock,
    ) -> Self {
        Self {
            store,
            registry,
            calendar,
            schedule,
            clock,
        }
    }

    pub async fn handle(&self, query: PreviewConflictsQuery) -> Result<ConflictPreview, SessionError> {
        let end = query
            .end_time
            .unwrap_or_else(|| self.schedule.default_end_for(query.start_time));
        let slot = TimeSlot::new(query.start_time, end)?;
        let candidate = ScheduleCandidate {
            owner: query.session_id.map_or(SlotOwner::Draft, SlotOwner::Session),
            class_id: query.class_id,
            subject_id: query.subject_id,
            teacher_id: query.teacher_id,
            slot,
        };

        let allocations =
            ConflictInputs::allocations_for(self.registry.as_ref(), query.class_id, query.subject_id)
                .await?;
        let inputs = ConflictInputs::gather(
            self.store.as_ref(),
            self.calendar.as_ref(),
            allocations,
            &candidate,
            &self.clock,
        )
        .await?;
        let report = inputs.report(&candidate, self.clock);

        Ok(ConflictPreview {
            slot,
            verdict: report.verdict(),
            within_school_day: self.schedule.fits_school_day(&slot, &self.clock),
            report,
        })
    }
}
