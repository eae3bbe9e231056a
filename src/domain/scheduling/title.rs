//! Canonical session titles.
//!
//! `{yy}{mm}{dd}{hh}{min}-{board}-{class}{section}-{subject} ({academic year})`,
//! all time components taken from the school-local start time.

use chrono::{Datelike, NaiveDate};

use crate::domain::catalog::TitleLabels;
use crate::domain::foundation::{SchoolClock, Timestamp};

/// Index (zero-based) of the month an academic year starts in: April.
const ACADEMIC_YEAR_START_MONTH0: u32 = 3;

fn two_digit_year(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

/// Academic year of a date, e.g. `"2526"` for 2025-04-01 through 2026-03-31.
pub fn academic_year(date: NaiveDate) -> String {
    let year = date.year();
    let (first, second) = if date.month0() >= ACADEMIC_YEAR_START_MONTH0 {
        (year, year + 1)
    } else {
        (year - 1, year)
    };
    format!("{}{}", two_digit_year(first), two_digit_year(second))
}

/// Title for a new session starting at `start`.
pub fn generate_title(start: &Timestamp, labels: &TitleLabels, clock: &SchoolClock) -> String {
    let local = clock.local(start);
    format!(
        "{}-{}-{}{}-{} ({})",
        local.format("%y%m%d%H%M"),
        labels.board_name,
        labels.class_name,
        labels.section.as_deref().unwrap_or(""),
        labels.subject_name,
        academic_year(local.date()),
    )
}
