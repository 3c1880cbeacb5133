//! Response bodies for the status endpoint.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::Config;
use crate::domain::{CandidateDeparture, format_hhmm};
use crate::leave_by::{LeaveBy, LeaveByPlan, SelectionMode};

/// Departures listed in a status response.
pub const LISTED_TRAINS: usize = 3;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub status: &'static str,
    pub endpoint: &'static str,
}

/// Body of `GET /status`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StatusResponse {
    Inactive(InactiveStatus),
    Active(ActiveStatus),
}

/// Outside the schedule window only the window state is reported.
#[derive(Debug, Clone, Serialize)]
pub struct InactiveStatus {
    pub active: bool,
    pub schedule_status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveStatus {
    pub active: bool,
    pub schedule_status: String,
    pub timestamp: String,

    /// Line name, title-cased.
    pub line: String,

    /// Deadline, or arrival target when working backwards.
    pub work_start: String,

    pub journey_mins: i64,

    pub trains: Vec<TrainView>,

    /// The selected departure. Always null when working backwards.
    pub best_train: Option<BestTrain>,

    /// Present only when working backwards from an arrival target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commute: Option<TargetCommute>,
}

/// A departure on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainView {
    pub destination: String,
    pub platform: String,
    pub minutes: u32,
    pub seconds: u32,
}

impl TrainView {
    pub fn from_candidate(candidate: &CandidateDeparture) -> Self {
        Self {
            destination: candidate.short_destination().to_string(),
            platform: candidate.platform.clone(),
            minutes: candidate.minutes_until_departure(),
            seconds: candidate.seconds_until_departure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestTrain {
    pub train: TrainView,
    pub train_departs: String,
    pub leave_time: String,
    pub countdown_seconds: i64,
    pub countdown_minutes: i64,
    pub arrival_at_work: String,
}

/// The backward-solved plan for an arrival target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetCommute {
    pub arrival_target: String,
    pub target_train: String,
    pub leave_home: String,
    pub walking_mins: i64,
    pub journey_mins: i64,
    pub seconds_until_leave: i64,
    pub minutes_until_leave: i64,
    pub seconds_until_train: i64,
    pub minutes_until_train: i64,
    pub should_have_left: bool,
    pub train_departed: bool,
}

/// Body of error responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl StatusResponse {
    pub fn inactive(now: NaiveDateTime, reason: impl Into<String>) -> Self {
        StatusResponse::Inactive(InactiveStatus {
            active: false,
            schedule_status: reason.into(),
            timestamp: timestamp(now),
        })
    }

    /// Build the active response from one engine run.
    pub fn evaluated(
        now: NaiveDateTime,
        reason: impl Into<String>,
        config: &Config,
        candidates: &[CandidateDeparture],
        journey_minutes: i64,
        result: &LeaveBy,
    ) -> Self {
        let plan = result.plan();

        let (best_train, commute) = match config.commute.mode {
            SelectionMode::Deadline(_) => (plan.and_then(best_train), None),
            SelectionMode::Target(_) => (
                None,
                plan.map(|p| target_commute(p, config.commute.walking_minutes, journey_minutes)),
            ),
        };

        StatusResponse::Active(ActiveStatus {
            active: true,
            schedule_status: reason.into(),
            timestamp: timestamp(now),
            line: title_case(&config.tfl.line),
            work_start: config.commute.mode.clock_time().to_string(),
            journey_mins: journey_minutes,
            trains: candidates
                .iter()
                .take(LISTED_TRAINS)
                .map(TrainView::from_candidate)
                .collect(),
            best_train,
            commute,
        })
    }

    pub fn is_active(&self) -> bool {
        matches!(self, StatusResponse::Active(_))
    }
}

fn best_train(plan: &LeaveByPlan) -> Option<BestTrain> {
    let train = plan.selected_train.as_ref()?;
    Some(BestTrain {
        train: TrainView::from_candidate(train),
        train_departs: format_hhmm(plan.train_departs_at),
        leave_time: format_hhmm(plan.leave_home_at),
        countdown_seconds: plan.seconds_until_leave,
        countdown_minutes: plan.minutes_until_leave(),
        arrival_at_work: format_hhmm(plan.arrival_at_work),
    })
}

fn target_commute(plan: &LeaveByPlan, walking_minutes: i64, journey_minutes: i64) -> TargetCommute {
    TargetCommute {
        arrival_target: format_hhmm(plan.arrival_at_work),
        target_train: format_hhmm(plan.train_departs_at),
        leave_home: format_hhmm(plan.leave_home_at),
        walking_mins: walking_minutes,
        journey_mins: journey_minutes,
        seconds_until_leave: plan.seconds_until_leave,
        minutes_until_leave: plan.minutes_until_leave(),
        seconds_until_train: plan.seconds_until_train,
        minutes_until_train: plan.minutes_until_train(),
        should_have_left: plan.should_have_left(),
        train_departed: plan.train_departed(),
    }
}

/// Local timestamp without offset, e.g. "2024-03-15T08:00:00".
pub fn timestamp(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Capitalise the first letter of each word, e.g. "hammersmith-city" to
/// "Hammersmith-City".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
