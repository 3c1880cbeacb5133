//! Candidate departures.

use serde::{Deserialize, Serialize};

/// Suffix TfL appends to tube station names.
const UNDERGROUND_SUFFIX: &str = " Underground Station";

/// One upcoming vehicle at the home station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDeparture {
    /// Destination as reported by the arrivals feed.
    pub destination: String,

    /// Platform name, or "Unknown".
    pub platform: String,

    /// Seconds until the vehicle departs the home station.
    pub seconds_until_departure: u32,
}

impl CandidateDeparture {
    /// Create a new candidate departure.
    pub fn new(
        destination: impl Into<String>,
        platform: impl Into<String>,
        seconds_until_departure: u32,
    ) -> Self {
        Self {
            destination: destination.into(),
            platform: platform.into(),
            seconds_until_departure,
        }
    }

    /// Whole minutes until departure, rounded down.
    pub fn minutes_until_departure(&self) -> u32 {
        self.seconds_until_departure / 60
    }

    /// Destination with the " Underground Station" suffix removed.
    pub fn short_destination(&self) -> &str {
        self.destination
            .strip_suffix(UNDERGROUND_SUFFIX)
            .unwrap_or(&self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_floor() {
        assert_eq!(CandidateDeparture::new("A", "1", 0).minutes_until_departure(), 0);
        assert_eq!(CandidateDeparture::new("A", "1", 59).minutes_until_departure(), 0);
        assert_eq!(CandidateDeparture::new("A", "1", 60).minutes_until_departure(), 1);
        assert_eq!(CandidateDeparture::new("A", "1", 179).minutes_until_departure(), 2);
    }

    #[test]
    fn short_destination_strips_suffix() {
        let d = CandidateDeparture::new(
            "Cockfosters Underground Station",
            "Northbound - Platform 1",
            60,
        );
        assert_eq!(d.short_destination(), "Cockfosters");

        let d = CandidateDeparture::new("Heathrow T5", "Westbound - Platform 2", 60);
        assert_eq!(d.short_destination(), "Heathrow T5");
    }
}
