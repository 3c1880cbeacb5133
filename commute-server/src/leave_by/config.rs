//! Commute constraints for the leave-by engine.

use chrono::Duration;

use crate::domain::ClockTime;

/// How the engine chooses the departure to plan around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Pick the first live departure that arrives by this time.
    Deadline(ClockTime),

    /// Work backwards from this arrival time, ignoring live departures.
    Target(ClockTime),
}

impl SelectionMode {
    /// The configured deadline or target time.
    pub fn clock_time(&self) -> ClockTime {
        match self {
            SelectionMode::Deadline(t) | SelectionMode::Target(t) => *t,
        }
    }

    /// Whether live departures take part in the selection.
    pub fn uses_live_departures(&self) -> bool {
        matches!(self, SelectionMode::Deadline(_))
    }
}

/// Immutable inputs to one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommuteConstraints {
    /// Walk from home to the platform (minutes).
    pub walking_minutes: i64,

    /// Slack to be on the platform before the train leaves (minutes).
    pub buffer_minutes: i64,

    /// Door-to-door transit time once on the train (minutes).
    pub journey_minutes: i64,

    /// Target selection strategy.
    pub mode: SelectionMode,
}

impl CommuteConstraints {
    /// Create a new set of constraints.
    pub fn new(
        walking_minutes: i64,
        buffer_minutes: i64,
        journey_minutes: i64,
        mode: SelectionMode,
    ) -> Self {
        Self {
            walking_minutes,
            buffer_minutes,
            journey_minutes,
            mode,
        }
    }

    /// Returns the journey time as a Duration.
    pub fn journey(&self) -> Duration {
        Duration::minutes(self.journey_minutes)
    }

    /// Time needed between leaving home and the train departing.
    pub fn lead_time(&self) -> Duration {
        Duration::minutes(self.walking_minutes + self.buffer_minutes)
    }
}
