//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::query::{Departure, Itinerary, StopSection};

/// Query string of `GET /nearby`.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lon: f64,

    /// Local time `YYYY-MM-DDTHH:MM:SS` (defaults to now)
    pub at: Option<String>,

    /// `text` for the plain-text report
    pub format: Option<String>,
}

/// Nearby departures, grouped by stop.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub stops: Vec<StopResult>,
}

/// A nearby stop in the response.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// GTFS stop id
    pub stop_id: String,

    /// Display name
    pub name: String,

    /// Distance from the requested point, rounded to whole metres
    pub distance_m: u32,

    /// Upcoming departures, soonest first
    pub departures: Vec<DepartureResult>,
}

/// One upcoming departure.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    pub trip_id: String,
    pub route_id: String,

    /// Short name, long name, or id of the route
    pub route: String,

    /// Mode name, e.g. `bus`
    pub mode: &'static str,

    pub headsign: Option<String>,

    /// Arrival time, `HH:MM`
    pub arrival: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl NearbyResponse {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            stops: itinerary
                .sections
                .iter()
                .map(StopResult::from_section)
                .collect(),
        }
    }
}

impl StopResult {
    pub fn from_section(section: &StopSection) -> Self {
        Self {
            stop_id: section.stop_id.clone(),
            name: section.stop_name.clone(),
            distance_m: section.distance_m.round() as u32,
            departures: section
                .departures
                .iter()
                .map(DepartureResult::from_departure)
                .collect(),
        }
    }
}

impl DepartureResult {
    pub fn from_departure(departure: &Departure) -> Self {
        Self {
            trip_id: departure.trip_id.clone(),
            route_id: departure.route_id.clone(),
            route: departure.route_name.clone(),
            mode: departure.mode.as_str(),
            headsign: departure.headsign.clone(),
            arrival: departure.arrival.to_string(),
        }
    }
}
