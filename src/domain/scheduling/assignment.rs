//! Teacher auto-assignment from the allocation registry.

use serde::{Deserialize, Serialize};

use crate::domain::allocation::{teachers_for, Allocation};
use crate::domain::foundation::{ClassId, SubjectId, TeacherId};

/// Result of looking up teachers for a class/subject pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AutoAssignment {
    /// Exactly one teacher is allocated.
    Unique { teacher_id: TeacherId },
    /// Several teachers are allocated; the first one seen was chosen.
    FirstOfMany {
        chosen: TeacherId,
        candidates: Vec<TeacherId>,
    },
    /// No allocation covers the pair.
    NoMatch,
}

impl AutoAssignment {
    pub fn teacher(&self) -> Option<TeacherId> {
        match self {
            AutoAssignment::Unique { teacher_id } => Some(*teacher_id),
            AutoAssignment::FirstOfMany { chosen, .. } => Some(*chosen),
            AutoAssignment::NoMatch => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, AutoAssignment::FirstOfMany { .. })
    }
}

/// Picks a teacher for the pair in registry iteration order.
pub fn auto_assign(
    allocations: &[Allocation],
    class_id: &ClassId,
    subject_id: &SubjectId,
) -> AutoAssignment {
    let candidates = teachers_for(allocations, class_id, subject_id);
    match candidates.as_slice() {
        [] => AutoAssignment::NoMatch,
        [only] => AutoAssignment::Unique { teacher_id: *only },
        [first, ..] => AutoAssignment::FirstOfMany {
            chosen: *first,
            candidates: candidates.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_teacher_is_assigned() {
        let (t, c, s) = (TeacherId::new(), ClassId::new(), SubjectId::new());
        let allocations = [Allocation::new(t, c, s)];
        assert_eq!(auto_assign(&allocations, &c, &s), AutoAssignment::Unique { teacher_id: t });
    }

    #[test]
    fn duplicate_triples_count_once() {
        let (t, c, s) = (TeacherId::new(), ClassId::new(), SubjectId::new());
        let allocations = [Allocation::new(t, c, s), Allocation::new(t, c, s)];
        assert_eq!(auto_assign(&allocations, &c, &s).teacher(), Some(t));
        assert!(!auto_assign(&allocations, &c, &s).is_ambiguous());
    }

    #[test]
    fn several_teachers_pick_first_in_registry_order() {
        let (c, s) = (ClassId::new(), SubjectId::new());
        let (first, second) = (TeacherId::new(), TeacherId::new());
        let allocations = [
            Allocation::new(first, c, SubjectId::new()),
            Allocation::new(first, c, s),
            Allocation::new(second, c, s),
        ];
        let result = auto_assign(&allocations, &c, &s);
        assert_eq!(result.teacher(), Some(first));
        assert_eq!(
            result,
            AutoAssignment::FirstOfMany {
                chosen: first,
                candidates: vec![first, second],
            }
        );
    }

    #[test]
    fn no_allocation_leaves_teacher_absent() {
        let allocations = [Allocation::new(TeacherId::new(), ClassId::new(), SubjectId::new())];
        assert_eq!(
            auto_assign(&allocations, &ClassId::new(), &SubjectId::new()),
            AutoAssignment::NoMatch
        );
    }
}
