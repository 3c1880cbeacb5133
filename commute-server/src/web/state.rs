//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedJourneyTime;
use crate::config::Config;
use crate::tfl::TflClient;

/// Shared application state.
///
/// Holds only immutable configuration and shared clients; every request is
/// an independent evaluation.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    /// Live arrivals client
    pub tfl: Arc<TflClient>,

    /// Cached journey planner
    pub journey: Arc<CachedJourneyTime>,
}

impl AppState {
    pub fn new(config: Config, tfl: TflClient, journey: CachedJourneyTime) -> Self {
        Self {
            config: Arc::new(config),
            tfl: Arc::new(tfl),
            journey: Arc::new(journey),
        }
    }
}
