use crate::error::{BookingError, Result};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Month abbreviations as the schedule renders them, month-of-year 1-12
///
/// The site formats day headers in Norwegian regardless of account locale.
pub const MONTH_ABBREVIATIONS: [&str; 12] =
    ["jan", "feb", "mar", "apr", "mai", "jun", "jul", "aug", "sep", "okt", "nov", "des"];

/// A class start time in the schedule's display form
///
/// The schedule renders 24-hour times with no leading zero on the hour
/// (`7:30`, not `07:30`). Matching against row text is exact on that form,
/// so any input representation is normalized here at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTime {
    hour: u32,
    minute: u32,
}

impl StartTime {
    /// Create a start time from hour and minute
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(BookingError::Config(format!("Invalid time {}:{:02}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    /// Hour component (0-23)
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Minute component (0-59)
    pub fn minute(&self) -> u32 {
        self.minute
    }
}

impl FromStr for StartTime {
    type Err = BookingError;

    /// Parse `"7:30"`, `"07:30"` or `"16:00"`; leading zeros are dropped in
    /// the normalized form
    fn from_str(s: &str) -> Result<Self> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| BookingError::Config(format!("Invalid time '{}', expected H:MM", s)))?;

        let hour: u32 = hour
            .parse()
            .map_err(|_| BookingError::Config(format!("Invalid hour in time '{}'", s)))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| BookingError::Config(format!("Invalid minute in time '{}'", s)))?;

        Self::new(hour, minute)
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// The slot being searched for: a day, a start time, and optionally an
/// activity-name substring
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSpec {
    /// Calendar date of the class
    pub date: NaiveDate,

    /// Start time in the schedule's display form
    pub start_time: StartTime,

    /// Case-insensitive activity-name filter, e.g. "yoga"
    pub activity: Option<String>,
}

impl TargetSpec {
    /// Create a target for a date and start time, with no activity filter
    pub fn new(date: NaiveDate, start_time: StartTime) -> Self {
        Self { date, start_time, activity: None }
    }

    /// Builder method: restrict matches to rows whose activity name contains
    /// the given substring (case-insensitive)
    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self
    }

    /// The day-header text the schedule renders for this date, e.g. `"19 feb."`
    pub fn day_header_text(&self) -> String {
        let abbrev = MONTH_ABBREVIATIONS[self.date.month0() as usize];
        format!("{} {}.", self.date.day(), abbrev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_time_drops_leading_zero() {
        let time: StartTime = "07:30".parse().unwrap();
        assert_eq!(time.to_string(), "7:30");

        let time: StartTime = "7:30".parse().unwrap();
        assert_eq!(time.to_string(), "7:30");
    }

    #[test]
    fn test_start_time_keeps_minute_zero_padding() {
        let time: StartTime = "16:00".parse().unwrap();
        assert_eq!(time.to_string(), "16:00");

        let time: StartTime = "9:05".parse().unwrap();
        assert_eq!(time.to_string(), "9:05");
    }

    #[test]
    fn test_start_time_rejects_garbage() {
        assert!("".parse::<StartTime>().is_err());
        assert!("730".parse::<StartTime>().is_err());
        assert!("25:00".parse::<StartTime>().is_err());
        assert!("12:60".parse::<StartTime>().is_err());
        assert!("twelve:30".parse::<StartTime>().is_err());
    }

    #[test]
    fn test_day_header_text() {
        let target = TargetSpec::new(
            NaiveDate::from_ymd_opt(2025, 2, 19).unwrap(),
            "16:00".parse().unwrap(),
        );
        assert_eq!(target.day_header_text(), "19 feb.");

        let target = TargetSpec::new(
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            "7:30".parse().unwrap(),
        );
        assert_eq!(target.day_header_text(), "1 mai.");

        let target = TargetSpec::new(
            NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            "10:00".parse().unwrap(),
        );
        assert_eq!(target.day_header_text(), "24 des.");
    }

    #[test]
    fn test_with_activity() {
        let target = TargetSpec::new(
            NaiveDate::from_ymd_opt(2025, 2, 19).unwrap(),
            "16:00".parse().unwrap(),
        )
        .with_activity("Yoga Flow");

        assert_eq!(target.activity.as_deref(), Some("Yoga Flow"));
    }
}
