//! Polling agent: prints a leave-by countdown and sends "leave now" alerts.

use commute_server::agent::Agent;
use commute_server::cache::{CacheConfig, CachedJourneyTime};
use commute_server::config::{Config, DEFAULT_CONFIG_PATH};
use commute_server::exit_on_error;
use commute_server::notify::TelegramNotifier;
use commute_server::tfl::{TflClient, TflConfig};

#[tokio::main]
async fn main() {
    commute_server::init_tracing();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = exit_on_error(
        Config::load(&path),
        &format!("failed to load config from {path}"),
    );

    let tfl = exit_on_error(
        TflClient::new(TflConfig::new(&config.tfl.api_key)),
        "failed to create TfL client",
    );
    let journey = CachedJourneyTime::new(
        tfl.clone(),
        &CacheConfig::with_ttl(std::time::Duration::from_secs(config.tfl.journey_cache_secs)),
        config.tfl.journey_time_minutes,
    );

    let notifier = match &config.telegram {
        Some(section) => Some(exit_on_error(
            TelegramNotifier::new(section),
            "failed to create Telegram client",
        )),
        None => {
            tracing::info!("telegram not configured, alerts are console only");
            None
        }
    };

    Agent::new(config, tfl, journey, notifier).run().await;
}
