//! TfL (Transport for London) Unified API client.
//!
//! This module provides an HTTP client for the public TfL API, which serves
//! live tube arrival predictions, the journey planner and stop point data.
//!
//! Key characteristics of the arrivals feed:
//! - A stop point's board mixes every line and direction serving it
//! - `timeToStation` is in seconds and can briefly go negative
//! - Boards are unordered; callers must sort

mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod fixtures;
mod types;

pub use client::{TflClient, TflConfig};
pub use convert::{
    MAX_DEPARTURES, MAX_JOURNEY_MINUTES, Platform, candidates_from_predictions,
    first_journey_minutes, tube_platforms,
};
pub use error::TflError;
pub use types::{
    Identifier, Journey, JourneyLeg, JourneyResults, Place, Prediction, SearchMatch, StopPoint,
    StopPointSearch,
};
