//! Scheduling rules: conflict evaluation, teacher auto-assignment and
//! title generation. Everything here is pure.

mod assignment;
mod conflict;
mod snapshot;
mod title;

pub use assignment::{auto_assign, AutoAssignment};
pub use conflict::{
    evaluate_conflicts, ConflictEvaluator, ConflictReport, ConflictType, ConflictVerdict,
    ScheduleCandidate, SlotOwner,
};
pub use snapshot::ScheduleSnapshot;
pub use title::{academic_year, generate_title};
