//! TfL Unified API HTTP client.
//!
//! Provides async methods for the handful of TfL endpoints the predictor
//! needs: live arrivals at a stop point, the journey planner, and stop point
//! lookup. Handles the `app_key` parameter and maps HTTP failures into
//! [`TflError`].

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::convert::first_journey_minutes;
use super::error::TflError;
use super::types::{JourneyResults, Prediction, StopPoint, StopPointSearch};

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Body characters kept in error messages.
const SNIPPET_CHARS: usize = 500;

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Application key (may be empty; TfL then applies anonymous limits)
    pub api_key: String,
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a new config with the given app key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// TfL Unified API client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TflClient {
    /// Create a new TfL client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Get live arrival predictions at a stop point.
    ///
    /// The board covers every line and direction serving the stop point, in
    /// no particular order.
    pub async fn get_arrivals(&self, stop_point: &str) -> Result<Vec<Prediction>, TflError> {
        self.get_json(&format!("StopPoint/{stop_point}/Arrivals"), &[])
            .await
    }

    /// Ask the journey planner for routes between two stop points.
    pub async fn get_journey_results(
        &self,
        from: &str,
        to: &str,
    ) -> Result<JourneyResults, TflError> {
        self.get_json(&format!("Journey/JourneyResults/{from}/to/{to}"), &[])
            .await
    }

    /// Duration in minutes of the planner's first suggested journey.
    ///
    /// Returns `Ok(None)` when the planner answers but has no itinerary.
    pub async fn get_journey_minutes(&self, from: &str, to: &str) -> Result<Option<i64>, TflError> {
        let results = self.get_journey_results(from, to).await?;

        if let Some(journey) = results.journeys.first() {
            for (i, leg) in journey.legs.iter().enumerate() {
                tracing::debug!(
                    leg = i + 1,
                    mode = leg.mode.as_ref().map(|m| m.name.as_str()).unwrap_or("unknown"),
                    from = leg
                        .departure_point
                        .as_ref()
                        .and_then(|p| p.common_name.as_deref())
                        .unwrap_or("unknown"),
                    to = leg
                        .arrival_point
                        .as_ref()
                        .and_then(|p| p.common_name.as_deref())
                        .unwrap_or("unknown"),
                    duration_mins = leg.duration,
                    "journey leg"
                );
            }
        }

        Ok(first_journey_minutes(&results))
    }

    /// Search stop points by name, restricted to the given modes.
    pub async fn search_stop_points(
        &self,
        query: &str,
        modes: &str,
    ) -> Result<StopPointSearch, TflError> {
        self.get_json(&format!("StopPoint/Search/{query}"), &[("modes", modes)])
            .await
    }

    /// Get a stop point with its nested children.
    pub async fn get_stop_point(&self, id: &str) -> Result<StopPoint, TflError> {
        self.get_json(&format!("StopPoint/{id}"), &[]).await
    }

    /// Issue a GET for `resource` below the API root and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TflError> {
        let url = format!("{}/{}", self.base_url, resource);
        let mut request = self.http.get(&url).query(query);
        if !self.api_key.is_empty() {
            request = request.query(&[("app_key", self.api_key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(TflError::Unauthorized);
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(TflError::RateLimited),
            StatusCode::NOT_FOUND => {
                return Err(TflError::NotFound {
                    resource: resource.to_string(),
                });
            }
            _ => {}
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TflError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
                snippet: snippet(&body),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TflError::Decode {
            resource: resource.to_string(),
            message: e.to_string(),
            snippet: snippet(&body),
        })
    }
}

/// First characters of a response body, for error messages.
fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_CHARS).collect()
}
