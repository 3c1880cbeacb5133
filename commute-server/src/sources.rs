//! Data sources feeding the leave-by engine.
//!
//! Both sources absorb their own failures: a broken arrivals feed yields an
//! empty board and a broken journey planner yields the configured fallback,
//! so the engine always has something to work with.

use std::future::Future;

use crate::domain::CandidateDeparture;
use crate::tfl::{TflClient, candidates_from_predictions};

/// Supplies upcoming departures for one line and direction at a station.
pub trait ArrivalsGateway {
    /// Departures soonest first, filtered to `line` and `direction`.
    ///
    /// Network failures, bad payloads and empty boards all produce an empty
    /// list.
    fn fetch_arrivals(
        &self,
        line: &str,
        direction: &str,
        station: &str,
    ) -> impl Future<Output = Vec<CandidateDeparture>> + Send;
}

/// Supplies an estimated door-to-door transit time.
pub trait JourneyDurationSource {
    /// Journey time in minutes. Never fails; falls back to a static value.
    fn journey_minutes(&self, origin: &str, destination: &str)
    -> impl Future<Output = i64> + Send;
}

impl ArrivalsGateway for TflClient {
    async fn fetch_arrivals(
        &self,
        line: &str,
        direction: &str,
        station: &str,
    ) -> Vec<CandidateDeparture> {
        match self.get_arrivals(station).await {
            Ok(predictions) => {
                let candidates = candidates_from_predictions(&predictions, line, direction);
                tracing::debug!(
                    station,
                    board = predictions.len(),
                    matching = candidates.len(),
                    "fetched arrivals"
                );
                candidates
            }
            Err(e) if e.is_transient() => {
                tracing::warn!(station, error = %e, "failed to fetch arrivals");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(station, error = %e, "arrivals request rejected");
                Vec::new()
            }
        }
    }
}

/// A journey time that never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedJourneyTime(pub i64);

impl JourneyDurationSource for FixedJourneyTime {
    async fn journey_minutes(&self, _origin: &str, _destination: &str) -> i64 {
        self.0
    }
}
