//! Itinerary builder: joins nearby stops, upcoming stop times, active trips
//! and routes into a structured report.
//!
//! The report is plain data. Turning it into text (or HTML, or JSON) is up
//! to the caller, see [`crate::report`].

use std::collections::HashMap;

use crate::domain::{ScheduleTime, TransitMode};
use crate::gtfs::{Route, StopTime, Trip};

use super::spatial::NearbyStop;

/// Upcoming departures around a point, grouped by stop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Itinerary {
    /// One section per nearby stop, nearest first.
    pub sections: Vec<StopSection>,
}

impl Itinerary {
    /// True if no stop was near enough.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of departures across all stops.
    pub fn departure_count(&self) -> usize {
        self.sections.iter().map(|s| s.departures.len()).sum()
    }
}

/// A nearby stop and its retained departures.
#[derive(Debug, Clone, PartialEq)]
pub struct StopSection {
    pub stop_id: String,
    pub stop_name: String,
    pub distance_m: f64,
    /// Ordered by arrival; may be empty.
    pub departures: Vec<Departure>,
}

/// One vehicle arriving at a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub trip_id: String,
    pub route_id: String,
    pub route_name: String,
    pub mode: TransitMode,
    pub headsign: Option<String>,
    pub arrival: ScheduleTime,
}

/// Assemble the report.
///
/// For each nearby stop (in the given order): drop stop times whose trip is
/// not in `active_trips`, keep the first `max_per_stop`, then resolve each
/// trip's route and skip entries whose route is unknown. A stop without
/// departures still gets a section.
pub fn build_itinerary(
    nearby: &[NearbyStop<'_>],
    upcoming: &HashMap<&str, &[StopTime]>,
    active_trips: &HashMap<&str, &Trip>,
    routes: &HashMap<&str, &Route>,
    max_per_stop: usize,
) -> Itinerary {
    let sections = nearby
        .iter()
        .map(|n| {
            let stop_times = upcoming.get(n.stop.id.as_str()).copied().unwrap_or(&[]);

            let departures = stop_times
                .iter()
                .filter_map(|st| Some((st, *active_trips.get(st.trip_id.as_str())?)))
                .take(max_per_stop)
                .filter_map(|(st, trip)| {
                    let route = routes.get(trip.route_id.as_str())?;
                    Some(Departure {
                        trip_id: trip.id.clone(),
                        route_id: route.id.clone(),
                        route_name: route.display_name().to_string(),
                        mode: route.mode(),
                        headsign: trip.headsign.clone(),
                        arrival: st.arrival?,
                    })
                })
                .collect();

            StopSection {
                stop_id: n.stop.id.clone(),
                stop_name: n.stop.display_name().to_string(),
                distance_m: n.distance_m,
                departures,
            }
        })
        .collect();

    Itinerary { sections }
}
