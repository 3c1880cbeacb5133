//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDateTime};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::leave_by::evaluate;
use crate::sources::{ArrivalsGateway, JourneyDurationSource};

use super::dto::*;
use super::state::AppState;
use super::templates::StatusTemplate;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/status", get(status))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        status: "ok",
        endpoint: "/status",
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Evaluate the commute right now.
///
/// Upstream failures degrade to an empty board or the fallback journey time,
/// so this always answers with 200.
async fn status(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let now = Local::now().naive_local();
    let status = current_status(&state.config, &*state.tfl, &*state.journey, now).await;

    if accepts_html(&headers) {
        let html = StatusTemplate::from_status(&status)
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {}", e),
            })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(status).into_response())
    }
}

/// One full evaluation at `now`.
///
/// Arrivals and the journey estimate are fetched concurrently. When working
/// backwards from an arrival target the board is not fetched at all.
pub async fn current_status<A, J>(
    config: &Config,
    arrivals: &A,
    journey: &J,
    now: NaiveDateTime,
) -> StatusResponse
where
    A: ArrivalsGateway,
    J: JourneyDurationSource,
{
    let window = config.schedule.evaluate(now);
    if !window.is_active() {
        return StatusResponse::inactive(now, window.to_string());
    }

    let tfl = &config.tfl;
    let journey_minutes = journey.journey_minutes(&tfl.home_station, &tfl.work_station);
    let (candidates, journey_minutes) = if config.commute.mode.uses_live_departures() {
        futures::future::join(
            arrivals.fetch_arrivals(&tfl.line, &tfl.direction, &tfl.home_station),
            journey_minutes,
        )
        .await
    } else {
        (Vec::new(), journey_minutes.await)
    };

    let result = evaluate(now, &candidates, &config.constraints(journey_minutes));
    tracing::debug!(
        trains = candidates.len(),
        journey_minutes,
        planned = result.plan().is_some(),
        "status evaluated"
    );

    StatusResponse::evaluated(
        now,
        window.to_string(),
        config,
        &candidates,
        journey_minutes,
        &result,
    )
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!(%status, error = %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateDeparture;
    use crate::sources::FixedJourneyTime;
    use axum::http::HeaderValue;
    use chrono::NaiveDate;

    struct Board(Vec<CandidateDeparture>);

    impl ArrivalsGateway for Board {
        async fn fetch_arrivals(
            &self,
            _line: &str,
            _direction: &str,
            _station: &str,
        ) -> Vec<CandidateDeparture> {
            self.0.clone()
        }
    }

    fn config_with(commute: &str) -> Config {
        Config::from_json(&format!(
            r#"{{
                "tfl": {{
                    "home_station": "940GZZLUHWY",
                    "work_station": "940GZZLUGPK",
                    "line": "piccadilly",
                    "direction": "outbound"
                }},
                "commute": {commute}
            }}"#
        ))
        .unwrap()
    }

    fn config() -> Config {
        config_with(r#"{"walking_minutes": 10, "buffer_minutes": 2, "work_start_time": "08:30"}"#)
    }

    fn friday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn html_detection() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9"),
        );
        assert!(accepts_html(&headers));
    }

    #[tokio::test]
    async fn outside_window_skips_fetching() {
        let status = current_status(
            &config(),
            &Board(vec![CandidateDeparture::new("Uxbridge", "1", 60)]),
            &FixedJourneyTime(18),
            friday(18, 0),
        )
        .await;

        let body = serde_json::to_value(status).unwrap();
        assert_eq!(body["active"], false);
        assert_eq!(body["schedule_status"], "after window, ended 09:00");
        assert!(body.get("trains").is_none());
    }

    #[tokio::test]
    async fn empty_board_still_answers() {
        let status = current_status(&config(), &Board(Vec::new()), &FixedJourneyTime(18), friday(8, 0)).await;

        let body = serde_json::to_value(status).unwrap();
        assert_eq!(body["active"], true);
        assert_eq!(body["trains"], serde_json::json!([]));
        assert!(body["best_train"].is_null());
    }

    #[tokio::test]
    async fn selects_first_train_arriving_in_time() {
        let board = Board(vec![
            CandidateDeparture::new("Uxbridge Underground Station", "1", 600),
            CandidateDeparture::new("Heathrow Terminal 5 Underground Station", "2", 120),
        ]);

        let status = current_status(&config(), &board, &FixedJourneyTime(18), friday(8, 0)).await;

        let body = serde_json::to_value(status).unwrap();
        assert_eq!(body["best_train"]["train"]["destination"], "Heathrow Terminal 5");
        assert_eq!(body["best_train"]["leave_time"], "07:50");
        assert_eq!(body["journey_mins"], 18);
    }

    #[tokio::test]
    async fn target_mode_does_not_consult_the_board() {
        let config = config_with(
            r#"{"walking_minutes": 10, "platform_buffer_minutes": 2, "arrival_target": "08:30"}"#,
        );
        let board = Board(vec![CandidateDeparture::new("Uxbridge", "1", 60)]);

        let status = current_status(&config, &board, &FixedJourneyTime(18), friday(7, 50)).await;

        let body = serde_json::to_value(status).unwrap();
        assert_eq!(body["trains"], serde_json::json!([]));
        assert_eq!(body["commute"]["target_train"], "08:12");
        assert_eq!(body["commute"]["leave_home"], "08:00");
    }
}
