//! TfL Unified API response DTOs.
//!
//! These types map directly to the JSON returned by api.tfl.gov.uk. Only
//! the fields the predictor reads are declared; everything else is ignored.
//! TfL omits fields freely, so most are optional or defaulted.

use serde::Deserialize;

/// One entry from `StopPoint/{id}/Arrivals`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Line display name, e.g. "Piccadilly".
    #[serde(default)]
    pub line_name: String,

    /// "inbound" or "outbound".
    #[serde(default)]
    pub direction: String,

    /// Final destination of the vehicle.
    #[serde(default)]
    pub destination_name: String,

    /// Platform, e.g. "Eastbound - Platform 1".
    pub platform_name: Option<String>,

    /// Seconds until the vehicle reaches the stop.
    pub time_to_station: i64,
}

/// Response from `Journey/JourneyResults/{from}/to/{to}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResults {
    /// Suggested journeys, best first.
    #[serde(default)]
    pub journeys: Vec<Journey>,
}

/// One suggested journey.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    /// Total duration in minutes.
    pub duration: i64,

    #[serde(default)]
    pub legs: Vec<JourneyLeg>,
}

/// One leg of a suggested journey.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyLeg {
    /// Leg duration in minutes.
    #[serde(default)]
    pub duration: i64,

    /// Transport mode, e.g. "tube" or "walking".
    pub mode: Option<Identifier>,

    pub departure_point: Option<Place>,

    pub arrival_point: Option<Place>,
}

/// A named TfL entity (mode, line). Only the display name is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    #[serde(default)]
    pub name: String,
}

/// A place referenced by a journey leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub common_name: Option<String>,
}

/// Response from `StopPoint/Search/{query}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPointSearch {
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
}

/// One stop point search hit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    /// Hub or station id.
    pub id: String,

    pub name: String,
}

/// Response from `StopPoint/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPoint {
    #[serde(default)]
    pub id: String,

    pub common_name: Option<String>,

    /// Platform indicator, e.g. "Eastbound".
    pub indicator: Option<String>,

    #[serde(default)]
    pub lines: Vec<Identifier>,

    /// Nested stop points (stations under a hub, platforms under a station).
    #[serde(default)]
    pub children: Vec<StopPoint>,
}
