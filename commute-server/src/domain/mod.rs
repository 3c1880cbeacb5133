//! Domain types for the commute predictor.
//!
//! Validated values shared by the engine, the data sources and the
//! presentation layers. Types enforce their invariants at construction time.

mod departure;
mod time;

pub use departure::CandidateDeparture;
pub use time::{ClockTime, TimeError, format_hhmm, parse_weekday, weekday_name};
