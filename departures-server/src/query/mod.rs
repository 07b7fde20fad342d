//! Nearby departures query engine.
//!
//! This module answers: "which stops are near this point, and what arrives
//! there in the next couple of hours?"
//!
//! The pipeline is purely computational over the immutable dataset:
//! spatial filter, temporal filter, service calendar, then the itinerary
//! builder joins the results into a structured report.

mod calendar;
mod config;
mod itinerary;
mod spatial;
mod temporal;


pub use calendar::{active_service_ids, retain_active_trips};
pub use config::QueryConfig;
pub use itinerary::{Departure, Itinerary, StopSection, build_itinerary};
pub use spatial::{NearbyStop, distance_m, nearby_stops};
pub use temporal::{TimeWindow, upcoming_stop_times, within_window};

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::domain::{Coordinate, InvalidCoordinate, ScheduleTime};
use crate::gtfs::{DatasetStore, StopTime};

/// Error from a nearby departures query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The requested point is not a valid coordinate
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),
}

/// The query facade handed to transports.
///
/// Owns a shared handle to the dataset; cloning is cheap and every clone
/// can answer queries concurrently.
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    store: Arc<DatasetStore>,
    config: QueryConfig,
}

impl NearbyQuery {
    /// Create a query engine over a loaded dataset.
    pub fn new(store: Arc<DatasetStore>, config: QueryConfig) -> Self {
        Self { store, config }
    }

    /// The dataset being queried.
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Validate a raw latitude/longitude pair, then build the itinerary.
    pub fn query(
        &self,
        latitude: f64,
        longitude: f64,
        now: NaiveDateTime,
    ) -> Result<Itinerary, QueryError> {
        let coordinate = Coordinate::new(latitude, longitude)?;
        Ok(self.build_itinerary(&coordinate, now))
    }

    /// Upcoming departures around `coordinate`, as seen at local time `now`.
    ///
    /// The weekday of `now` selects active services and its time of day
    /// opens the look-ahead window. The same inputs always produce the same
    /// itinerary.
    pub fn build_itinerary(&self, coordinate: &Coordinate, now: NaiveDateTime) -> Itinerary {
        let store = self.store.as_ref();

        let nearby = nearby_stops(store.all_stops(), coordinate, self.config.radius_m);

        let window = TimeWindow::starting_at(
            ScheduleTime::from_naive_time(now.time()),
            self.config.horizon(),
        );
        let upcoming: HashMap<&str, &[StopTime]> = nearby
            .iter()
            .map(|n| {
                let id = n.stop.id.as_str();
                (id, upcoming_stop_times(store, id, window))
            })
            .collect();

        let trip_ids: HashSet<&str> = upcoming
            .values()
            .flat_map(|times| times.iter().map(|st| st.trip_id.as_str()))
            .collect();
        let active_services = active_service_ids(store, now.weekday());
        let trips = retain_active_trips(store.trips_by_ids(trip_ids), &active_services);
        let routes = store.routes_by_ids(trips.values().map(|t| t.route_id.as_str()));

        let itinerary = build_itinerary(
            &nearby,
            &upcoming,
            &trips,
            &routes,
            self.config.max_departures_per_stop,
        );

        debug!(
            %coordinate,
            %now,
            stops = itinerary.sections.len(),
            departures = itinerary.departure_count(),
            "Built itinerary"
        );
        itinerary
    }
}
