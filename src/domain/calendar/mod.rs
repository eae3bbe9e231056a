//! School calendar: exception entries and operating hours.

mod entry;
mod operating_schedule;

pub use entry::{CalendarEntry, CalendarEntryType, DateRange};
pub use operating_schedule::OperatingSchedule;
