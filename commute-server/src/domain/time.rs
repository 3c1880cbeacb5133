//! Wall-clock time handling.
//!
//! Configuration expresses deadlines and schedule windows as "HH:MM"
//! strings. This module provides a validated time-of-day type for them and
//! helpers for combining it with the current date. All timestamps are local
//! wall-clock `NaiveDateTime`s; nothing here converts between timezones.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision, such as a work start time.
///
/// # Examples
///
/// ```
/// use commute_server::domain::ClockTime;
///
/// let t = ClockTime::parse("8:05").unwrap();
/// assert_eq!(t.to_string(), "08:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a clock time from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("hour must be 0-23 and minute 0-59"))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// A single-digit hour ("7:45") is accepted; minutes must be two digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use commute_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse("00:00").is_ok());
    /// assert!(ClockTime::parse("23:59").is_ok());
    /// assert!(ClockTime::parse("7:45").is_ok());
    ///
    /// assert!(ClockTime::parse("0830").is_err());
    /// assert!(ClockTime::parse("08:3").is_err());
    /// assert!(ClockTime::parse("24:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hours, minutes) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        if hours.is_empty() || hours.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        if minutes.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }

        let hour = parse_digits(hours).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute =
            parse_digits(minutes).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Combine with a date, at zero seconds.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }

    /// The next occurrence of this time at or after `now`.
    ///
    /// Today's occurrence is used unless `now` is strictly past it, in which
    /// case the result rolls over to the same time tomorrow.
    ///
    /// # Examples
    ///
    /// ```
    /// use commute_server::domain::ClockTime;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let nine = ClockTime::parse("09:00").unwrap();
    ///
    /// let morning = day.and_hms_opt(8, 0, 0).unwrap();
    /// assert_eq!(nine.next_at_or_after(morning).date(), day);
    ///
    /// let evening = day.and_hms_opt(18, 0, 0).unwrap();
    /// assert_eq!(nine.next_at_or_after(evening).date(), day.succ_opt().unwrap());
    /// ```
    pub fn next_at_or_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = self.on(now.date());
        if now > today {
            today + chrono::Duration::days(1)
        } else {
            today
        }
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Format a timestamp as "HH:MM".
pub fn format_hhmm(t: NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}

/// Lowercase full English name of a weekday, e.g. "monday".
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Parse a weekday from its full or three-letter English name, ignoring case.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let lower = s.trim().to_ascii_lowercase();
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .find(|day| {
        let name = weekday_name(*day);
        lower == name || lower == name[..3]
    })
}

fn parse_digits(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let t = ClockTime::parse("00:00").unwrap();
        assert_eq!((t.hour(), t.minute()), (0, 0));

        let t = ClockTime::parse("23:59").unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));

        let t = ClockTime::parse("7:05").unwrap();
        assert_eq!((t.hour(), t.minute()), (7, 5));
    }

    #[test]
    fn parse_invalid_format() {
        assert!(ClockTime::parse("").is_err());
        assert!(ClockTime::parse("0830").is_err());
        assert!(ClockTime::parse("08-30").is_err());
        assert!(ClockTime::parse(":30").is_err());
        assert!(ClockTime::parse("008:30").is_err());
        assert!(ClockTime::parse("08:300").is_err());
        assert!(ClockTime::parse("+8:30").is_err());
        assert!(ClockTime::parse("ab:cd").is_err());
    }

    #[test]
    fn parse_out_of_range() {
        assert_eq!(
            ClockTime::parse("24:00").unwrap_err().to_string(),
            "invalid time: hour must be 0-23"
        );
        assert_eq!(
            ClockTime::parse("12:60").unwrap_err().to_string(),
            "invalid time: minute must be 0-59"
        );
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(ClockTime::parse("7:05").unwrap().to_string(), "07:05");
        assert_eq!(ClockTime::from_hm(18, 0).unwrap().to_string(), "18:00");
    }

    #[test]
    fn serde_uses_hhmm_strings() {
        let t: ClockTime = serde_json::from_str("\"08:30\"").unwrap();
        assert_eq!(t, ClockTime::from_hm(8, 30).unwrap());
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"08:30\"");

        let bad: Result<ClockTime, _> = serde_json::from_str("\"8.30\"");
        assert!(bad.is_err());
    }

    #[test]
    fn on_uses_zero_seconds() {
        let t = ClockTime::from_hm(8, 30).unwrap();
        assert_eq!(
            t.on(date(2024, 3, 15)),
            date(2024, 3, 15).and_hms_opt(8, 30, 0).unwrap()
        );
    }

    #[test]
    fn next_occurrence_is_inclusive_of_now() {
        let t = ClockTime::from_hm(8, 30).unwrap();
        let exactly = date(2024, 3, 15).and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(t.next_at_or_after(exactly), exactly);

        let one_second_late = date(2024, 3, 15).and_hms_opt(8, 30, 1).unwrap();
        assert_eq!(
            t.next_at_or_after(one_second_late),
            date(2024, 3, 16).and_hms_opt(8, 30, 0).unwrap()
        );
    }

    #[test]
    fn next_occurrence_crosses_month_end() {
        let t = ClockTime::from_hm(8, 0).unwrap();
        let now = date(2024, 2, 29).and_hms_opt(20, 0, 0).unwrap();
        assert_eq!(
            t.next_at_or_after(now),
            date(2024, 3, 1).and_hms_opt(8, 0, 0).unwrap()
        );
    }

    #[test]
    fn weekday_names_round_trip() {
        assert_eq!(parse_weekday("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("fri"), Some(Weekday::Fri));
        assert_eq!(parse_weekday(" SUNDAY "), Some(Weekday::Sun));
        assert_eq!(parse_weekday("someday"), None);
        assert_eq!(weekday_name(Weekday::Wed), "wednesday");
    }

    #[test]
    fn format_hhmm_drops_seconds() {
        let t = date(2024, 3, 15).and_hms_opt(8, 2, 59).unwrap();
        assert_eq!(format_hhmm(t), "08:02");
    }
}
