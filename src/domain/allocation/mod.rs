//! Teacher allocations.
//!
//! An allocation declares that a teacher may teach a subject to a class.
//! The registry does not enforce uniqueness, so every lookup here treats
//! the input as a set of triples.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassId, SubjectId, TeacherId};

/// A (teacher, class, subject) capability triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allocation {
    pub teacher_id: TeacherId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
}

impl Allocation {
    pub fn new(teacher_id: TeacherId, class_id: ClassId, subject_id: SubjectId) -> Self {
        Self {
            teacher_id,
            class_id,
            subject_id,
        }
    }

    /// Whether this allocation covers the class/subject pair.
    pub fn covers(&self, class_id: &ClassId, subject_id: &SubjectId) -> bool {
        &self.class_id == class_id && &self.subject_id == subject_id
    }
}

/// Filter for registry lookups; unset keys match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationQuery {
    pub teacher_id: Option<TeacherId>,
    pub class_id: Option<ClassId>,
    pub subject_id: Option<SubjectId>,
}

impl AllocationQuery {
    /// Matches every allocation.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches allocations for a class/subject pair.
    pub fn for_class_subject(class_id: ClassId, subject_id: SubjectId) -> Self {
        Self {
            teacher_id: None,
            class_id: Some(class_id),
            subject_id: Some(subject_id),
        }
    }

    pub fn for_teacher(teacher_id: TeacherId) -> Self {
        Self {
            teacher_id: Some(teacher_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, allocation: &Allocation) -> bool {
        self.teacher_id.map_or(true, |t| t == allocation.teacher_id)
            && self.class_id.map_or(true, |c| c == allocation.class_id)
            && self.subject_id.map_or(true, |s| s == allocation.subject_id)
    }
}

/// Distinct teachers allocated to a class/subject, in first-seen order.
pub fn teachers_for(
    allocations: &[Allocation],
    class_id: &ClassId,
    subject_id: &SubjectId,
) -> Vec<TeacherId> {
    let mut seen = HashSet::new();
    allocations
        .iter()
        .filter(|a| a.covers(class_id, subject_id))
        .filter(|a| seen.insert(a.teacher_id))
        .map(|a| a.teacher_id)
        .collect()
}

/// Number of distinct triples.
pub fn distinct_count(allocations: &[Allocation]) -> usize {
    allocations.iter().collect::<HashSet<_>>().len()
}

/// Whether the exact triple is declared.
pub fn is_allocated(
    allocations: &[Allocation],
    teacher_id: &TeacherId,
    class_id: &ClassId,
    subject_id: &SubjectId,
) -> bool {
    allocations
        .iter()
        .any(|a| &a.teacher_id == teacher_id && a.covers(class_id, subject_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_with_no_keys_matches_everything() {
        let a = Allocation::new(TeacherId::new(), ClassId::new(), SubjectId::new());
        assert!(AllocationQuery::all().matches(&a));
    }

    #[test]
    fn query_matches_on_every_set_key() {
        let a = Allocation::new(TeacherId::new(), ClassId::new(), SubjectId::new());
        assert!(AllocationQuery::for_class_subject(a.class_id, a.subject_id).matches(&a));
        assert!(AllocationQuery::for_teacher(a.teacher_id).matches(&a));
        assert!(!AllocationQuery::for_teacher(TeacherId::new()).matches(&a));
        assert!(!AllocationQuery::for_class_subject(a.class_id, SubjectId::new()).matches(&a));
    }

    #[test]
    fn teachers_for_dedupes_and_keeps_first_seen_order() {
        let class = ClassId::new();
        let subject = SubjectId::new();
        let first = TeacherId::new();
        let second = TeacherId::new();
        let allocations = vec![
            Allocation::new(first, class, subject),
            Allocation::new(second, class, subject),
            Allocation::new(first, class, subject),
            Allocation::new(TeacherId::new(), class, SubjectId::new()),
        ];

        assert_eq!(teachers_for(&allocations, &class, &subject), vec![first, second]);
    }

    #[test]
    fn distinct_count_ignores_duplicate_triples() {
        let a = Allocation::new(TeacherId::new(), ClassId::new(), SubjectId::new());
        let b = Allocation::new(TeacherId::new(), a.class_id, a.subject_id);
        assert_eq!(distinct_count(&[a, a, b, a]), 2);
    }

    #[test]
    fn is_allocated_checks_full_triple() {
        let a = Allocation::new(TeacherId::new(), ClassId::new(), SubjectId::new());
        assert!(is_allocated(&[a], &a.teacher_id, &a.class_id, &a.subject_id));
        assert!(!is_allocated(&[a], &TeacherId::new(), &a.class_id, &a.subject_id));
    }
}
