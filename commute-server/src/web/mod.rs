//! On-demand query service.
//!
//! Every `GET /status` runs a fresh evaluation: window check, live
//! departures and journey estimate fetched concurrently, then the leave-by
//! engine.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{create_router, current_status};
pub use state::AppState;
pub use templates::StatusTemplate;
