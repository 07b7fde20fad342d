//! Spatial filter: stops within walking distance of a point.
//!
//! Distances are great-circle (haversine) distances on a sphere with the
//! mean Earth radius, which is well within rounding for a few hundred
//! meters.

use geo::HaversineDistance;

use crate::domain::Coordinate;
use crate::gtfs::Stop;

/// A stop together with its distance from the query point.
#[derive(Debug, Clone, Copy)]
pub struct NearbyStop<'a> {
    pub stop: &'a Stop,
    pub distance_m: f64,
}

/// Great-circle distance between two coordinates, in meters.
pub fn distance_m(a: &Coordinate, b: &Coordinate) -> f64 {
    a.to_point().haversine_distance(&b.to_point())
}

/// Stops no further than `radius_m` from `origin`.
///
/// Sorted by increasing distance, ties broken by stop id. An empty result
/// is not an error.
pub fn nearby_stops<'a>(
    stops: &'a [Stop],
    origin: &Coordinate,
    radius_m: f64,
) -> Vec<NearbyStop<'a>> {
    if !radius_m.is_finite() || radius_m < 0.0 {
        return Vec::new();
    }

    let mut nearby: Vec<NearbyStop<'a>> = stops
        .iter()
        .map(|stop| NearbyStop {
            stop,
            distance_m: distance_m(origin, &stop.coordinate),
        })
        .filter(|n| n.distance_m <= radius_m)
        .collect();

    nearby.sort_by(|a, b| {
        a.distance_m
            .total_cmp(&b.distance_m)
            .then_with(|| a.stop.id.cmp(&b.stop.id))
    });
    nearby
}
