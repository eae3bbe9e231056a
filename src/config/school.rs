//! School-local time and operating hours

use chrono::{NaiveTime, Weekday};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::calendar::OperatingSchedule;
use crate::domain::foundation::SchoolClock;

/// School configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolConfig {
    /// Offset of school-local time from UTC, in minutes (330 = UTC+05:30)
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,

    /// Comma-separated working days ("mon,tue,wed,thu,fri")
    #[serde(default = "default_working_days")]
    pub working_days: String,

    /// First period start, `HH:MM` local time
    #[serde(default = "default_day_start")]
    pub day_start: String,

    /// Last period end, `HH:MM` local time
    #[serde(default = "default_day_end")]
    pub day_end: String,

    /// Period length used to pre-fill end times
    #[serde(default = "default_period_minutes")]
    pub default_period_minutes: u32,

    /// JSON seed file for the in-memory adapters
    pub seed_file: Option<String>,
}

impl SchoolConfig {
    /// Clock for converting instants to school-local time
    pub fn clock(&self) -> Result<SchoolClock, ValidationError> {
        SchoolClock::from_offset_minutes(self.utc_offset_minutes)
            .map_err(|_| ValidationError::InvalidUtcOffset)
    }

    /// Operating schedule built from the configured days and hours
    pub fn operating_schedule(&self) -> Result<OperatingSchedule, ValidationError> {
        let working_days = self
            .working_days
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| {
                d.parse::<Weekday>()
                    .map_err(|_| ValidationError::InvalidWeekday(d.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let start = parse_time("day_start", &self.day_start)?;
        let end = parse_time("day_end", &self.day_end)?;

        OperatingSchedule::new(working_days, start, end, self.default_period_minutes)
            .map_err(|e| ValidationError::InvalidSchedule(e.to_string()))
    }

    /// Validate school configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.clock()?;
        self.operating_schedule()?;
        Ok(())
    }
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset(),
            working_days: default_working_days(),
            day_start: default_day_start(),
            day_end: default_day_end(),
            default_period_minutes: default_period_minutes(),
            seed_file: None,
        }
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        ValidationError::InvalidTimeOfDay {
            field,
            value: value.to_string(),
        }
    })
}

fn default_utc_offset() -> i32 {
    0
}

fn default_working_days() -> String {
    "mon,tue,wed,thu,fri".to_string()
}

fn default_day_start() -> String {
    "08:00".to_string()
}

fn default_day_end() -> String {
    "15:00".to_string()
}

fn default_period_minutes() -> u32 {
    45
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SchoolConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.operating_schedule().unwrap().default_period_minutes(), 45);
    }

    #[test]
    fn test_working_days_parse() {
        let config = SchoolConfig {
            working_days: "Mon, tue ,Saturday".to_string(),
            ..Default::default()
        };
        let schedule = config.operating_schedule().unwrap();
        assert_eq!(
            schedule.working_days(),
            &[Weekday::Mon, Weekday::Tue, Weekday::Sat]
        );
    }

    #[test]
    fn test_invalid_weekday() {
        let config = SchoolConfig {
            working_days: "mon,funday".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidWeekday(d)) if d == "funday"
        ));
    }

    #[test]
    fn test_day_must_end_after_start() {
        let config = SchoolConfig {
            day_start: "15:00".to_string(),
            day_end: "08:00".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_offset_out_of_range() {
        let config = SchoolConfig {
            utc_offset_minutes: 24 * 60,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidUtcOffset)
        ));
    }
}
