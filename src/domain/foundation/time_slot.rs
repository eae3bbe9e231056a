//! Half-open time interval and school-local clock.

use chrono::{Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{Timestamp, ValidationError};

/// A non-empty `[start, end)` interval.
///
/// # Invariants
///
/// - `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    start: Timestamp,
    end: Timestamp,
}

impl TimeSlot {
    /// Creates a slot, rejecting empty or inverted intervals.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if !start.is_before(&end) {
            return Err(ValidationError::invalid_format(
                "end_time",
                "end time must be after start time",
            ));
        }
        Ok(Self { start, end })
    }

    /// Creates a slot from a start and a positive length in minutes.
    pub fn starting_at(start: Timestamp, minutes: i64) -> Result<Self, ValidationError> {
        if minutes <= 0 {
            return Err(ValidationError::out_of_range(
                "duration_minutes",
                1,
                i64::from(u16::MAX),
                minutes,
            ));
        }
        Self::new(start, start.plus_minutes(minutes))
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Length of the slot in whole minutes.
    pub fn minutes(&self) -> i64 {
        self.end.duration_since(&self.start).num_minutes()
    }

    /// Half-open overlap test: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Converts between instants and the school's local wall-clock time.
///
/// Titles, calendar dates and import cells are all expressed in
/// school-local time; persisted instants are UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolClock {
    offset: FixedOffset,
}

impl SchoolClock {
    /// Creates a clock for a fixed UTC offset in minutes (e.g. 330 for UTC+05:30).
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, ValidationError> {
        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or_else(|| {
                ValidationError::out_of_range("utc_offset_minutes", -1439, 1439, i64::from(minutes))
            })
    }

    /// A clock whose local time is UTC.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local wall-clock date and time of an instant.
    pub fn local(&self, ts: &Timestamp) -> NaiveDateTime {
        ts.as_datetime().with_timezone(&self.offset).naive_local()
    }

    /// Local calendar date of an instant.
    pub fn local_date(&self, ts: &Timestamp) -> NaiveDate {
        self.local(ts).date()
    }

    /// Instant corresponding to a local wall-clock time.
    pub fn from_local(&self, local: NaiveDateTime) -> Timestamp {
        let utc = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Timestamp::from_datetime(Utc.from_utc_datetime(&utc))
    }
}

impl Default for SchoolClock {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn slot(start_h: u32, end_h: u32) -> TimeSlot {
        let clock = SchoolClock::utc();
        TimeSlot::new(
            clock.from_local(local(2026, 1, 5, start_h, 0)),
            clock.from_local(local(2026, 1, 5, end_h, 0)),
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_interval() {
        let t = Timestamp::now();
        assert!(TimeSlot::new(t, t).is_err());
        assert!(TimeSlot::new(t.plus_minutes(1), t).is_err());
    }

    #[test]
    fn rejects_non_positive_duration() {
        assert!(TimeSlot::starting_at(Timestamp::now(), 0).is_err());
        assert!(TimeSlot::starting_at(Timestamp::now(), -10).is_err());
        assert_eq!(TimeSlot::starting_at(Timestamp::now(), 40).unwrap().minutes(), 40);
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(slot(9, 11).overlaps(&slot(10, 12)));
        assert!(!slot(9, 10).overlaps(&slot(10, 11)));
        assert!(slot(9, 12).overlaps(&slot(10, 11)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = slot(9, 11);
        let b = slot(10, 12);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn clock_round_trips_local_time() {
        let clock = SchoolClock::from_offset_minutes(330).unwrap();
        let wall = local(2026, 1, 5, 0, 30);
        let ts = clock.from_local(wall);
        assert_eq!(clock.local(&ts), wall);
        // 00:30 IST is the previous day in UTC
        assert_eq!(
            ts.as_datetime().date_naive(),
            NaiveDate::from_ymd_opt(2026, 1, 4).unwrap()
        );
        assert_eq!(clock.local_date(&ts), NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    }

    #[test]
    fn clock_rejects_out_of_range_offset() {
        assert!(SchoolClock::from_offset_minutes(24 * 60).is_err());
    }
}
