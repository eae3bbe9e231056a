//! School operating hours used to pre-fill session defaults.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SchoolClock, TimeSlot, Timestamp, ValidationError};

/// Working days, school hours and default period length.
///
/// Never a conflict source: only used to fill in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingSchedule {
    working_days: Vec<Weekday>,
    school_start: NaiveTime,
    school_end: NaiveTime,
    default_period_minutes: u32,
}

impl OperatingSchedule {
    pub fn new(
        working_days: Vec<Weekday>,
        school_start: NaiveTime,
        school_end: NaiveTime,
        default_period_minutes: u32,
    ) -> Result<Self, ValidationError> {
        if school_end <= school_start {
            return Err(ValidationError::invalid_format(
                "school_end",
                "school day must end after it starts",
            ));
        }
        if default_period_minutes == 0 || default_period_minutes > 600 {
            return Err(ValidationError::out_of_range(
                "default_period_minutes",
                1,
                600,
                i64::from(default_period_minutes),
            ));
        }
        Ok(Self {
            working_days,
            school_start,
            school_end,
            default_period_minutes,
        })
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }

    pub fn school_start(&self) -> NaiveTime {
        self.school_start
    }

    pub fn school_end(&self) -> NaiveTime {
        self.school_end
    }

    pub fn default_period_minutes(&self) -> u32 {
        self.default_period_minutes
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.working_days.contains(&date.weekday())
    }

    /// End instant one default period after `start`.
    pub fn default_end_for(&self, start: Timestamp) -> Timestamp {
        start.plus_minutes(i64::from(self.default_period_minutes))
    }

    /// A default-length slot beginning at `start`.
    pub fn default_slot(&self, start: Timestamp) -> Result<TimeSlot, ValidationError> {
        TimeSlot::starting_at(start, i64::from(self.default_period_minutes))
    }

    /// Whether the slot sits on a working day within school hours (local time).
    pub fn fits_school_day(&self, slot: &TimeSlot, clock: &SchoolClock) -> bool {
        let start = clock.local(&slot.start());
        let end = clock.local(&slot.end());
        start.date() == end.date()
            && self.is_working_day(start.date())
            && start.time() >= self.school_start
            && end.time() <= self.school_end
    }
}

impl Default for OperatingSchedule {
    fn default() -> Self {
        Self {
            working_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            school_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            school_end: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or(NaiveTime::MIN),
            default_period_minutes: 45,
        }
    }
}
