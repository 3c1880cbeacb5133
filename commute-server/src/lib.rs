//! Commute leave-by predictor.
//!
//! Answers: "when do I have to leave home to catch a tube that gets me to
//! work on time?" A polling agent prints a countdown and sends alerts; a
//! small HTTP service answers the same question on demand.

pub mod agent;
pub mod cache;
pub mod config;
pub mod domain;
pub mod leave_by;
pub mod notify;
pub mod schedule;
pub mod sources;
pub mod tfl;
pub mod web;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `fmt` subscriber, filtered by `RUST_LOG` (default
/// `info`).
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();
}

/// Unwrap a startup result, or log the error and exit with status 1.
pub fn exit_on_error<T, E: std::fmt::Display>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "{context}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_on_error_passes_values_through() {
        let result: Result<u16, String> = Ok(5000);
        assert_eq!(exit_on_error(result, "unused"), 5000);
    }
}
