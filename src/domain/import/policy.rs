//! Which conflict verdicts make an import row invalid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::scheduling::ConflictVerdict;

/// Reference and validation errors always invalidate a row; the policy
/// decides what conflicts do on top of that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowValidityPolicy {
    /// Conflicts are warnings only.
    #[default]
    AdvisoryConflicts,
    /// HOLIDAY and EXAM_DAY invalidate the row.
    BlockCalendarConflicts,
    /// Any conflict invalidates the row.
    BlockAllConflicts,
}

impl RowValidityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowValidityPolicy::AdvisoryConflicts => "advisory_conflicts",
            RowValidityPolicy::BlockCalendarConflicts => "block_calendar_conflicts",
            RowValidityPolicy::BlockAllConflicts => "block_all_conflicts",
        }
    }

    /// Whether a resolved row with this verdict may be committed.
    pub fn admits(&self, verdict: &ConflictVerdict) -> bool {
        match (self, verdict.conflict_type) {
            (_, None) => true,
            (RowValidityPolicy::AdvisoryConflicts, Some(_)) => true,
            (RowValidityPolicy::BlockCalendarConflicts, Some(t)) => !t.is_calendar(),
            (RowValidityPolicy::BlockAllConflicts, Some(_)) => false,
        }
    }
}

impl fmt::Display for RowValidityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RowValidityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advisory_conflicts" | "advisory" => Ok(RowValidityPolicy::AdvisoryConflicts),
            "block_calendar_conflicts" | "block_calendar" => {
                Ok(RowValidityPolicy::BlockCalendarConflicts)
            }
            "block_all_conflicts" | "block_all" => Ok(RowValidityPolicy::BlockAllConflicts),
            other => Err(format!("unknown row validity policy '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::ConflictType;

    fn verdict(t: ConflictType) -> ConflictVerdict {
        ConflictVerdict::conflict(t)
    }

    #[test]
    fn advisory_admits_every_conflict() {
        let p = RowValidityPolicy::AdvisoryConflicts;
        assert!(p.admits(&verdict(ConflictType::NoTeacher)));
        assert!(p.admits(&verdict(ConflictType::Holiday)));
        assert!(p.admits(&verdict(ConflictType::Overlap)));
    }

    #[test]
    fn block_calendar_rejects_holiday_and_exam_day_only() {
        let p = RowValidityPolicy::BlockCalendarConflicts;
        assert!(!p.admits(&verdict(ConflictType::Holiday)));
        assert!(!p.admits(&verdict(ConflictType::ExamDay)));
        assert!(p.admits(&verdict(ConflictType::NoTeacher)));
        assert!(p.admits(&verdict(ConflictType::Overlap)));
    }

    #[test]
    fn block_all_rejects_any_conflict_but_not_a_clear_verdict() {
        let p = RowValidityPolicy::BlockAllConflicts;
        assert!(!p.admits(&verdict(ConflictType::NoTeacher)));
        assert!(p.admits(&ConflictVerdict::clear()));
    }

    #[test]
    fn parses_config_values() {
        assert_eq!(
            "block_calendar_conflicts".parse::<RowValidityPolicy>(),
            Ok(RowValidityPolicy::BlockCalendarConflicts)
        );
        assert_eq!("Advisory".parse::<RowValidityPolicy>(), Ok(RowValidityPolicy::AdvisoryConflicts));
        assert!("strict".parse::<RowValidityPolicy>().is_err());
    }
}
