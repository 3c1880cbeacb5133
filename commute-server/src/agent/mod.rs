//! Polling agent.
//!
//! Wakes every poll interval, checks the schedule window, fetches live
//! departures and a journey estimate, runs the leave-by engine and prints a
//! status block. When the leave-by moment has passed an alert goes out
//! through the notifier, at most once per calendar minute.

mod render;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use crate::config::Config;
use crate::domain::{CandidateDeparture, format_hhmm};
use crate::leave_by::{LeaveBy, LeaveByPlan, evaluate};
use crate::notify::Notifier;
use crate::sources::{ArrivalsGateway, JourneyDurationSource};

pub use render::{banner, render_tick};

/// Number of departures shown in a status block.
pub const SHOWN_TRAINS: usize = 3;

/// Allows one alert per calendar minute.
#[derive(Debug, Default, Clone)]
pub struct AlertGate {
    last: Option<(NaiveDate, u32, u32)>,
}

impl AlertGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an alert at `now` unless one was already sent this minute.
    pub fn try_acquire(&mut self, now: NaiveDateTime) -> bool {
        let minute = (now.date(), now.hour(), now.minute());
        if self.last == Some(minute) {
            return false;
        }
        self.last = Some(minute);
        true
    }
}

/// What one tick observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Outside the schedule window.
    Inactive { reason: String },

    /// Deadline mode found nothing on the board.
    NoTrains,

    Evaluated {
        candidates: Vec<CandidateDeparture>,
        journey_minutes: i64,
        result: LeaveBy,
    },
}

/// The one-line alert text for a plan.
pub fn alert_message(plan: &LeaveByPlan) -> String {
    format!(
        "LEAVE NOW! Train {} -> Arrive {}",
        format_hhmm(plan.train_departs_at),
        format_hhmm(plan.arrival_at_work)
    )
}

/// The polling agent and its alert state.
pub struct Agent<A, J, N> {
    config: Config,
    arrivals: A,
    journey: J,
    notifier: N,
    gate: AlertGate,
}

impl<A, J, N> Agent<A, J, N>
where
    A: ArrivalsGateway,
    J: JourneyDurationSource,
    N: Notifier,
{
    pub fn new(config: Config, arrivals: A, journey: J, notifier: N) -> Self {
        Self {
            config,
            arrivals,
            journey,
            notifier,
            gate: AlertGate::new(),
        }
    }

    /// Run one evaluation at `now`, alerting if it is time to go.
    pub async fn tick(&mut self, now: NaiveDateTime) -> TickOutcome {
        let window = self.config.schedule.evaluate(now);
        if !window.is_active() {
            return TickOutcome::Inactive {
                reason: window.to_string(),
            };
        }

        let tfl = &self.config.tfl;
        let journey_minutes = self
            .journey
            .journey_minutes(&tfl.home_station, &tfl.work_station)
            .await;

        let mode = self.config.commute.mode;
        let candidates = if mode.uses_live_departures() {
            let candidates = self
                .arrivals
                .fetch_arrivals(&tfl.line, &tfl.direction, &tfl.home_station)
                .await;
            if candidates.is_empty() {
                return TickOutcome::NoTrains;
            }
            candidates
        } else {
            Vec::new()
        };

        let result = evaluate(now, &candidates, &self.config.constraints(journey_minutes));

        if let Some(plan) = result.plan().filter(|p| p.should_have_left()) {
            if self.gate.try_acquire(now) {
                let message = alert_message(plan);
                match self.notifier.notify(&message).await {
                    Ok(()) => tracing::info!(message = %message, "alert sent"),
                    Err(e) => tracing::warn!(error = %e, "failed to send alert"),
                }
            }
        }

        TickOutcome::Evaluated {
            candidates,
            journey_minutes,
            result,
        }
    }

    /// Poll until Ctrl-C.
    pub async fn run(mut self) {
        for line in banner(&self.config) {
            println!("{line}");
        }

        loop {
            let now = Local::now().naive_local();
            let outcome = self.tick(now).await;
            for line in render_tick(&outcome, now, &self.config.tfl.line) {
                println!("{line}");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval) => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "failed to listen for ctrl-c");
                    }
                    tracing::info!("stopping");
                    break;
                }
            }
        }
    }
}
