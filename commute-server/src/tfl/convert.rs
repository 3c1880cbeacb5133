//! Conversion from TfL DTOs to domain types.

use crate::domain::CandidateDeparture;

use super::types::{JourneyResults, Prediction, StopPoint};

/// Maximum number of departures kept from one arrivals board.
pub const MAX_DEPARTURES: usize = 5;

/// Prefix of NaPTAN ids for London Underground platforms.
const TUBE_PLATFORM_PREFIX: &str = "940GZZLU";

/// Turn a raw arrivals board into candidate departures.
///
/// Keeps predictions for `line` (case-insensitive exact match) heading in
/// `direction` (case-insensitive substring match), soonest first, at most
/// [`MAX_DEPARTURES`] of them.
pub fn candidates_from_predictions(
    predictions: &[Prediction],
    line: &str,
    direction: &str,
) -> Vec<CandidateDeparture> {
    let direction = direction.to_lowercase();

    let mut matching: Vec<&Prediction> = predictions
        .iter()
        .filter(|p| p.line_name.eq_ignore_ascii_case(line))
        .filter(|p| p.direction.to_lowercase().contains(&direction))
        .collect();
    matching.sort_by_key(|p| p.time_to_station);

    matching
        .into_iter()
        .take(MAX_DEPARTURES)
        .map(|p| {
            let seconds = u32::try_from(p.time_to_station.max(0)).unwrap_or(u32::MAX);
            CandidateDeparture::new(
                p.destination_name.clone(),
                p.platform_name.clone().unwrap_or_else(|| "Unknown".to_string()),
                seconds,
            )
        })
        .collect()
}

/// Longest journey duration accepted from the planner: one day.
pub const MAX_JOURNEY_MINUTES: i64 = 24 * 60;

/// Duration of the first suggested journey, if any.
///
/// Durations outside `1..=MAX_JOURNEY_MINUTES` are treated as no answer.
pub fn first_journey_minutes(results: &JourneyResults) -> Option<i64> {
    results
        .journeys
        .first()
        .map(|j| j.duration)
        .filter(|minutes| (1..=MAX_JOURNEY_MINUTES).contains(minutes))
}

/// A tube platform below a station hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub id: String,
    pub name: String,
    pub lines: Vec<String>,
    pub indicator: String,
}

/// Collect every tube platform nested under `stop_point`.
pub fn tube_platforms(stop_point: &StopPoint) -> Vec<Platform> {
    let mut platforms = Vec::new();
    collect_platforms(stop_point, &mut platforms);
    platforms
}

fn collect_platforms(stop_point: &StopPoint, out: &mut Vec<Platform>) {
    for child in &stop_point.children {
        if child.id.starts_with(TUBE_PLATFORM_PREFIX) {
            out.push(Platform {
                id: child.id.clone(),
                name: child
                    .common_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                lines: child.lines.iter().map(|l| l.name.clone()).collect(),
                indicator: child.indicator.clone().unwrap_or_else(|| "N/A".to_string()),
            });
        }
        collect_platforms(child, out);
    }
}
