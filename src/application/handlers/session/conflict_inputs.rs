//! Loads what the conflict evaluator needs for one candidate.

use crate::domain::allocation::{Allocation, AllocationQuery};
use crate::domain::calendar::{CalendarEntry, DateRange};
use crate::domain::catalog::Catalog;
use crate::domain::foundation::{
    ChapterId, ClassId, DomainError, SchoolClock, SubjectId, TeacherId, TopicId,
};
use crate::domain::scheduling::{ConflictEvaluator, ConflictReport, ScheduleCandidate};
use crate::domain::session::SessionError;
use crate::ports::{AllocationRegistry, CalendarService, SessionFilter, SessionStore};

/// Bookings, calendar entries and allocations relevant to a candidate.
#[derive(Debug, Clone, Default)]
pub(crate) struct ConflictInputs {
    pub others: Vec<ScheduleCandidate>,
    pub calendar: Vec<CalendarEntry>,
    pub allocations: Vec<Allocation>,
}

impl ConflictInputs {
    /// Allocations for the candidate's class and subject, in registry order.
    pub async fn allocations_for(
        registry: &dyn AllocationRegistry,
        class_id: ClassId,
        subject_id: SubjectId,
    ) -> Result<Vec<Allocation>, DomainError> {
        registry
            .list(&AllocationQuery::for_class_subject(class_id, subject_id))
            .await
    }

    /// Fetch the teacher's bookings in the candidate's window and the
    /// calendar entries for its local start date.
    pub async fn gather(
        store: &dyn SessionStore,
        calendar: &dyn CalendarService,
        allocations: Vec<Allocation>,
        candidate: &ScheduleCandidate,
        clock: &SchoolClock,
    ) -> Result<Self, DomainError> {
        let others = match candidate.teacher_id {
            Some(teacher_id) => store
                .list(
                    &SessionFilter::for_teacher(teacher_id)
                        .between(candidate.slot.start(), candidate.slot.end()),
                )
                .await?
                .iter()
                .map(|s| s.candidate())
                .collect(),
            None => Vec::new(),
        };
        let date = clock.local_date(&candidate.slot.start());
        let calendar = calendar.list(&DateRange::single(date)).await?;

        Ok(Self {
            others,
            calendar,
            allocations,
        })
    }

    pub fn report(&self, candidate: &ScheduleCandidate, clock: SchoolClock) -> ConflictReport {
        ConflictEvaluator::new(&self.calendar, &self.allocations, clock)
            .report(candidate, &self.others)
    }
}

/// Catalog references named by a create or update.
#[derive(Debug, Clone, Copy)]
pub(crate) struct References {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub chapter_id: Option<ChapterId>,
    pub topic_id: Option<TopicId>,
    pub teacher_id: Option<TeacherId>,
}

/// Checks the class → subject → chapter → topic chain and the teacher.
pub(crate) fn check_references(catalog: &Catalog, refs: &References) -> Result<(), SessionError> {
    if catalog.class(&refs.class_id).is_none() {
        return Err(SessionError::unknown_reference("class_id", refs.class_id));
    }
    if !catalog.subject_belongs_to_class(&refs.subject_id, &refs.class_id) {
        return Err(SessionError::unknown_reference("subject_id", refs.subject_id));
    }
    if let Some(chapter_id) = refs.chapter_id {
        if !catalog.chapter_belongs_to_subject(&chapter_id, &refs.subject_id) {
            return Err(SessionError::unknown_reference("chapter_id", chapter_id));
        }
    }
    if let Some(topic_id) = refs.topic_id {
        let chapter_ok = refs
            .chapter_id
            .is_some_and(|chapter_id| catalog.topic_belongs_to_chapter(&topic_id, &chapter_id));
        if !chapter_ok {
            return Err(SessionError::unknown_reference("topic_id", topic_id));
        }
    }
    if let Some(teacher_id) = refs.teacher_id {
        if catalog.teacher(&teacher_id).is_none() {
            return Err(SessionError::unknown_reference("teacher_id", teacher_id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::fixtures::sample;

    #[test]
    fn sample_chain_is_accepted() {
        let s = sample();
        let refs = References {
            class_id: s.class_5b,
            subject_id: s.science,
            chapter_id: Some(s.chapter),
            topic_id: Some(s.topic),
            teacher_id: Some(s.asha),
        };
        assert!(check_references(&s.catalog, &refs).is_ok());
    }

    #[test]
    fn subject_of_another_class_is_unknown() {
        let s = sample();
        let refs = References {
            class_id: ClassId::new(),
            subject_id: s.science,
            chapter_id: None,
            topic_id: None,
            teacher_id: None,
        };
        assert!(matches!(
            check_references(&s.catalog, &refs),
            Err(SessionError::UnknownReference { field, .. }) if field == "class_id"
        ));
    }

    #[test]
    fn chapter_must_belong_to_subject() {
        let s = sample();
        let refs = References {
            class_id: s.class_5b,
            subject_id: s.maths,
            chapter_id: Some(s.chapter),
            topic_id: None,
            teacher_id: None,
        };
        assert!(matches!(
            check_references(&s.catalog, &refs),
            Err(SessionError::UnknownReference { field, .. }) if field == "chapter_id"
        ));
    }

    #[test]
    fn unknown_teacher_is_rejected() {
        let s = sample();
        let refs = References {
            class_id: s.class_5b,
            subject_id: s.science,
            chapter_id: None,
            topic_id: None,
            teacher_id: Some(TeacherId::new()),
        };
        assert!(matches!(
            check_references(&s.catalog, &refs),
            Err(SessionError::UnknownReference { field, .. }) if field == "teacher_id"
        ));
    }
}
