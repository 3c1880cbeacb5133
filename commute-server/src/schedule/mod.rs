//! Commute schedule window.
//!
//! Decides whether the predictor should be active at all: only on configured
//! weekdays, and only between the window start and end on those days.
//! Windows never span midnight.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDateTime, Weekday};

use crate::domain::{ClockTime, weekday_name};

/// Error returned when a schedule window is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("window start {start} is after window end {end}")]
    StartAfterEnd { start: ClockTime, end: ClockTime },
}

/// Days and hours during which the commute is watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleWindow {
    active_days: BTreeSet<u32>,
    start: ClockTime,
    end: ClockTime,
}

/// Result of evaluating a window at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Active,
    NotCommuteDay(Weekday),
    BeforeWindow { starts: ClockTime },
    AfterWindow { ended: ClockTime },
}

impl ScheduleWindow {
    /// Create a window, rejecting a start later than the end.
    pub fn new(
        active_days: impl IntoIterator<Item = Weekday>,
        start: ClockTime,
        end: ClockTime,
    ) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::StartAfterEnd { start, end });
        }

        Ok(Self {
            active_days: active_days
                .into_iter()
                .map(|d| d.num_days_from_monday())
                .collect(),
            start,
            end,
        })
    }

    /// Monday to Friday, 07:00 to 09:00.
    pub fn weekday_mornings() -> Self {
        Self {
            active_days: (0..5).collect(),
            start: ClockTime::from_hm(7, 0).expect("valid constant"),
            end: ClockTime::from_hm(9, 0).expect("valid constant"),
        }
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// Whether `day` is one of the active days.
    pub fn is_commute_day(&self, day: Weekday) -> bool {
        self.active_days.contains(&day.num_days_from_monday())
    }

    /// Evaluate the window at `now`.
    ///
    /// Both bounds are inclusive: exactly at the start or exactly at the end
    /// counts as active.
    pub fn evaluate(&self, now: NaiveDateTime) -> WindowState {
        let day = now.weekday();
        if !self.is_commute_day(day) {
            return WindowState::NotCommuteDay(day);
        }

        let today = now.date();
        if now < self.start.on(today) {
            return WindowState::BeforeWindow { starts: self.start };
        }
        if now > self.end.on(today) {
            return WindowState::AfterWindow { ended: self.end };
        }

        WindowState::Active
    }

    /// Evaluate and flatten to an `(active, reason)` pair.
    pub fn is_active(&self, now: NaiveDateTime) -> (bool, String) {
        let state = self.evaluate(now);
        (state.is_active(), state.to_string())
    }
}

impl WindowState {
    pub fn is_active(&self) -> bool {
        matches!(self, WindowState::Active)
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowState::Active => f.write_str("active"),
            WindowState::NotCommuteDay(day) => {
                write!(f, "not a commute day: {}", weekday_name(*day))
            }
            WindowState::BeforeWindow { starts } => write!(f, "before window, starts {starts}"),
            WindowState::AfterWindow { ended } => write!(f, "after window, ended {ended}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-03-15 is a Friday.
    fn friday(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn window() -> ScheduleWindow {
        ScheduleWindow::weekday_mornings()
    }

    #[test]
    fn start_is_inclusive() {
        assert_eq!(window().evaluate(friday(7, 0, 0)), WindowState::Active);
    }

    #[test]
    fn end_is_inclusive() {
        assert_eq!(window().evaluate(friday(9, 0, 0)), WindowState::Active);
    }

    #[test]
    fn one_second_after_end_is_inactive() {
        let state = window().evaluate(friday(9, 0, 1));
        assert!(!state.is_active());
        assert_eq!(state.to_string(), "after window, ended 09:00");
    }

    #[test]
    fn before_window() {
        let (active, reason) = window().is_active(friday(6, 59, 59));
        assert!(!active);
        assert_eq!(reason, "before window, starts 07:00");
    }

    #[test]
    fn weekend_is_not_a_commute_day() {
        let saturday = friday(8, 0, 0) + chrono::Duration::days(1);
        let (active, reason) = window().is_active(saturday);
        assert!(!active);
        assert_eq!(reason, "not a commute day: saturday");
    }

    #[test]
    fn active_reason() {
        assert_eq!(window().is_active(friday(8, 15, 0)), (true, "active".to_string()));
    }

    #[test]
    fn custom_days() {
        let w = ScheduleWindow::new(
            [Weekday::Sat],
            ClockTime::from_hm(10, 0).unwrap(),
            ClockTime::from_hm(11, 0).unwrap(),
        )
        .unwrap();

        assert!(w.is_commute_day(Weekday::Sat));
        assert!(!w.is_commute_day(Weekday::Fri));
        assert_eq!(
            w.evaluate(friday(10, 30, 0)),
            WindowState::NotCommuteDay(Weekday::Fri)
        );
    }

    #[test]
    fn start_after_end_is_rejected() {
        let err = ScheduleWindow::new(
            [Weekday::Mon],
            ClockTime::from_hm(22, 0).unwrap(),
            ClockTime::from_hm(2, 0).unwrap(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "window start 22:00 is after window end 02:00");
    }

    #[test]
    fn zero_length_window_is_allowed() {
        let t = ClockTime::from_hm(8, 0).unwrap();
        let w = ScheduleWindow::new([Weekday::Fri], t, t).unwrap();
        assert!(w.evaluate(friday(8, 0, 0)).is_active());
        assert!(!w.evaluate(friday(8, 0, 1)).is_active());
    }
}
