//! Calendar exception entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{CalendarEntryId, ValidationError};

/// Kind of calendar exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarEntryType {
    Holiday,
    SchoolEvent,
    ExamDay,
    HalfDay,
}

impl CalendarEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarEntryType::Holiday => "HOLIDAY",
            CalendarEntryType::SchoolEvent => "SCHOOL_EVENT",
            CalendarEntryType::ExamDay => "EXAM_DAY",
            CalendarEntryType::HalfDay => "HALF_DAY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HOLIDAY" => Some(CalendarEntryType::Holiday),
            "SCHOOL_EVENT" => Some(CalendarEntryType::SchoolEvent),
            "EXAM_DAY" => Some(CalendarEntryType::ExamDay),
            "HALF_DAY" => Some(CalendarEntryType::HalfDay),
            _ => None,
        }
    }
}

impl fmt::Display for CalendarEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if to < from {
            return Err(ValidationError::invalid_format(
                "date_range",
                "range end precedes range start",
            ));
        }
        Ok(Self { from, to })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self { from: date, to: date }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn intersects(&self, other: &DateRange) -> bool {
        self.from <= other.to && other.from <= self.to
    }

    /// Smallest range covering every date, or `None` when empty.
    pub fn covering(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        dates.into_iter().fold(None, |acc, date| match acc {
            None => Some(Self::single(date)),
            Some(range) => Some(Self {
                from: range.from.min(date),
                to: range.to.max(date),
            }),
        })
    }
}

/// A holiday, school event, exam day or half day.
///
/// # Invariants
///
/// - `end_date`, when present, is not before `date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub id: CalendarEntryId,
    pub date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub entry_type: CalendarEntryType,
    pub title: String,
    pub description: Option<String>,
}

impl CalendarEntry {
    pub fn new(
        date: NaiveDate,
        end_date: Option<NaiveDate>,
        entry_type: CalendarEntryType,
        title: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if let Some(end) = end_date {
            DateRange::new(date, end)?;
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(Self {
            id: CalendarEntryId::new(),
            date,
            end_date,
            entry_type,
            title,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Inclusive date span of the entry.
    pub fn range(&self) -> DateRange {
        DateRange {
            from: self.date,
            to: self.end_date.unwrap_or(self.date),
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.range().contains(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_day_entry_covers_only_its_date() {
        let entry = CalendarEntry::new(d(2026, 1, 26), None, CalendarEntryType::Holiday, "Republic Day")
            .unwrap();
        assert!(entry.covers(d(2026, 1, 26)));
        assert!(!entry.covers(d(2026, 1, 25)));
        assert!(!entry.covers(d(2026, 1, 27)));
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let entry = CalendarEntry::new(
            d(2025, 12, 24),
            Some(d(2026, 1, 1)),
            CalendarEntryType::Holiday,
            "Winter break",
        )
        .unwrap();
        assert!(entry.covers(d(2025, 12, 24)));
        assert!(entry.covers(d(2025, 12, 31)));
        assert!(entry.covers(d(2026, 1, 1)));
        assert!(!entry.covers(d(2026, 1, 2)));
    }

    #[test]
    fn rejects_inverted_range_and_blank_title() {
        assert!(CalendarEntry::new(d(2026, 1, 2), Some(d(2026, 1, 1)), CalendarEntryType::ExamDay, "x")
            .is_err());
        assert!(CalendarEntry::new(d(2026, 1, 2), None, CalendarEntryType::ExamDay, "  ").is_err());
    }

    #[test]
    fn covering_spans_all_dates() {
        let range = DateRange::covering([d(2026, 3, 3), d(2026, 1, 9), d(2026, 2, 1)]).unwrap();
        assert_eq!(range.from, d(2026, 1, 9));
        assert_eq!(range.to, d(2026, 3, 3));
        assert!(DateRange::covering(Vec::new()).is_none());
    }

    #[test]
    fn intersects_detects_shared_days() {
        let a = DateRange::new(d(2026, 1, 1), d(2026, 1, 10)).unwrap();
        assert!(a.intersects(&DateRange::single(d(2026, 1, 10))));
        assert!(!a.intersects(&DateRange::single(d(2026, 1, 11))));
    }

    #[test]
    fn entry_type_storage_round_trips() {
        for t in [
            CalendarEntryType::Holiday,
            CalendarEntryType::SchoolEvent,
            CalendarEntryType::ExamDay,
            CalendarEntryType::HalfDay,
        ] {
            assert_eq!(CalendarEntryType::parse(t.as_str()), Some(t));
        }
    }
}
