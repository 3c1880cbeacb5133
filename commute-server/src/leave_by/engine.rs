//! The leave-by computation.
//!
//! Given the departures currently on the board and the commute constraints,
//! decide which departure to plan around and derive the moments that matter:
//! when the train leaves, when the commuter must leave home, and when they
//! reach work. The computation is pure; the caller supplies `now`.

use chrono::{Duration, NaiveDateTime};

use crate::domain::CandidateDeparture;

use super::config::{CommuteConstraints, SelectionMode};

/// A leave-by plan computed at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveByPlan {
    /// The live departure chosen. Always `None` when working backwards from
    /// an arrival target.
    pub selected_train: Option<CandidateDeparture>,

    /// The deadline or target in force, after day rollover.
    pub deadline: NaiveDateTime,

    /// When the selected (or ideal) train departs.
    pub train_departs_at: NaiveDateTime,

    /// Latest moment to leave home.
    pub leave_home_at: NaiveDateTime,

    /// When the commuter reaches work.
    pub arrival_at_work: NaiveDateTime,

    /// Signed seconds from `now` until `leave_home_at`.
    pub seconds_until_leave: i64,

    /// Signed seconds from `now` until `train_departs_at`.
    pub seconds_until_train: i64,
}

impl LeaveByPlan {
    /// Whole minutes until leaving, rounded towards negative infinity.
    pub fn minutes_until_leave(&self) -> i64 {
        self.seconds_until_leave.div_euclid(60)
    }

    /// Whole minutes until the train, rounded towards negative infinity.
    pub fn minutes_until_train(&self) -> i64 {
        self.seconds_until_train.div_euclid(60)
    }

    /// The leave-by moment has been reached or passed.
    pub fn should_have_left(&self) -> bool {
        self.seconds_until_leave <= 0
    }

    /// The train has departed (or is departing now).
    pub fn train_departed(&self) -> bool {
        self.seconds_until_train <= 0
    }
}

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveBy {
    Planned(LeaveByPlan),

    /// No departure on the board reaches work by the deadline. This is a
    /// normal outcome.
    NoViableTrain { deadline: NaiveDateTime },
}

impl LeaveBy {
    pub fn plan(&self) -> Option<&LeaveByPlan> {
        match self {
            LeaveBy::Planned(plan) => Some(plan),
            LeaveBy::NoViableTrain { .. } => None,
        }
    }

    pub fn deadline(&self) -> NaiveDateTime {
        match self {
            LeaveBy::Planned(plan) => plan.deadline,
            LeaveBy::NoViableTrain { deadline } => *deadline,
        }
    }
}

/// Run the engine at `now`.
///
/// `candidates` need not be sorted; a sorted copy is used for selection.
pub fn evaluate(
    now: NaiveDateTime,
    candidates: &[CandidateDeparture],
    constraints: &CommuteConstraints,
) -> LeaveBy {
    match constraints.mode {
        SelectionMode::Deadline(work_start) => {
            let deadline = work_start.next_at_or_after(now);
            select_first_fit(now, deadline, candidates, constraints)
        }
        SelectionMode::Target(arrival_target) => {
            let target = arrival_target.next_at_or_after(now);
            LeaveBy::Planned(solve_backwards(now, target, constraints))
        }
    }
}

/// Mode A: the first departure, in departure order, arriving by `deadline`.
///
/// A later departure is never preferred, even if it would arrive earlier.
fn select_first_fit(
    now: NaiveDateTime,
    deadline: NaiveDateTime,
    candidates: &[CandidateDeparture],
    constraints: &CommuteConstraints,
) -> LeaveBy {
    if candidates.is_empty() {
        return LeaveBy::NoViableTrain { deadline };
    }

    let mut ordered: Vec<&CandidateDeparture> = candidates.iter().collect();
    ordered.sort_by_key(|c| c.seconds_until_departure);

    for candidate in ordered {
        let train_departs_at =
            now + Duration::seconds(i64::from(candidate.seconds_until_departure));
        let arrival_at_work = train_departs_at + constraints.journey();

        if arrival_at_work <= deadline {
            let leave_home_at = train_departs_at - constraints.lead_time();
            return LeaveBy::Planned(LeaveByPlan {
                selected_train: Some(candidate.clone()),
                deadline,
                train_departs_at,
                leave_home_at,
                arrival_at_work,
                seconds_until_leave: seconds_between(now, leave_home_at),
                seconds_until_train: seconds_between(now, train_departs_at),
            });
        }
    }

    LeaveBy::NoViableTrain { deadline }
}

/// Mode B: the ideal departure and leave time for arriving exactly at `target`.
fn solve_backwards(
    now: NaiveDateTime,
    target: NaiveDateTime,
    constraints: &CommuteConstraints,
) -> LeaveByPlan {
    let ideal_departure = target - constraints.journey();
    let leave_home_at = ideal_departure - constraints.lead_time();

    LeaveByPlan {
        selected_train: None,
        deadline: target,
        train_departs_at: ideal_departure,
        leave_home_at,
        arrival_at_work: target,
        seconds_until_leave: seconds_between(now, leave_home_at),
        seconds_until_train: seconds_between(now, ideal_departure),
    }
}

/// Signed whole seconds from `now` to `then`, truncated towards zero.
fn seconds_between(now: NaiveDateTime, then: NaiveDateTime) -> i64 {
    then.signed_duration_since(now).num_seconds()
}
