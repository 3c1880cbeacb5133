use commute_server::cache::{CacheConfig, CachedJourneyTime};
use commute_server::config::{Config, DEFAULT_CONFIG_PATH};
use commute_server::exit_on_error;
use commute_server::tfl::{TflClient, TflConfig};
use commute_server::web::{AppState, create_router};

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
    if config.tfl.api_key.is_empty() {
        tracing::warn!("no TfL api key configured, anonymous rate limits apply");
    }

    let tfl = exit_on_error(
        TflClient::new(TflConfig::new(&config.tfl.api_key)),
        "failed to create TfL client",
    );
    let journey = CachedJourneyTime::new(
        tfl.clone(),
        &CacheConfig::with_ttl(std::time::Duration::from_secs(config.tfl.journey_cache_secs)),
        config.tfl.journey_time_minutes,
    );

    let addr = config.bind;
    tracing::info!(
        station = %config.tfl.home_station,
        line = %config.tfl.line,
        "loaded configuration"
    );

    let app = create_router(AppState::new(config, tfl, journey));

    let listener = exit_on_error(
        tokio::net::TcpListener::bind(addr).await,
        &format!("failed to bind {addr}"),
    );
    tracing::info!("listening on http://{addr}");
    tracing::info!("  GET /status  - leave-by status (JSON, or HTML with Accept: text/html)");
    tracing::info!("  GET /health  - health check");

    exit_on_error(axum::serve(listener, app).await, "server error");
}
