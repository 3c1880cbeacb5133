//! Leave-by engine.
//!
//! This module answers "when do I have to leave home?" for a single fixed
//! commute. Two selection modes share the same arithmetic:
//!
//! - **Deadline**: scan the live departures in departure order and take the
//!   first one that gets the commuter to work by the deadline.
//! - **Target**: ignore live departures and work backwards from an arrival
//!   target to an ideal train and leave time.
//!
//! If the deadline or target has already passed today, tomorrow's is used.

mod config;
mod engine;


pub use config::{CommuteConstraints, SelectionMode};
pub use engine::{LeaveBy, LeaveByPlan, evaluate};
