//! The immutable dataset store.

use std::collections::HashMap;

use chrono::Weekday;

use super::error::LoadError;
use super::tables::{Calendar, Route, Stop, StopTime, Trip};

/// Row counts of a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub stops: usize,
    pub routes: usize,
    pub trips: usize,
    pub calendars: usize,
    pub stop_times: usize,
}

/// In-memory GTFS tables, built once and never modified.
///
/// Stops and calendars are kept sorted by id so iteration order is
/// deterministic. Stop times are grouped by stop and sorted by arrival time
/// (unscheduled entries first), then trip id, so a time window is a
/// contiguous slice.
#[derive(Debug)]
pub struct DatasetStore {
    stops: Vec<Stop>,
    stop_index: HashMap<String, usize>,
    routes: HashMap<String, Route>,
    trips: HashMap<String, Trip>,
    calendars: Vec<Calendar>,
    stop_times: HashMap<String, Vec<StopTime>>,
    stop_time_count: usize,
}

impl DatasetStore {
    /// Build a store from parsed rows.
    ///
    /// Fails if any stop, route, trip or calendar id appears twice. Stop
    /// times that reference unknown stops or trips are kept; lookups for
    /// them simply find nothing.
    pub fn from_tables(
        mut stops: Vec<Stop>,
        routes: Vec<Route>,
        trips: Vec<Trip>,
        mut calendars: Vec<Calendar>,
        stop_times: Vec<StopTime>,
    ) -> Result<Self, LoadError> {
        stops.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(dup) = stops.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(LoadError::DuplicateId {
                table: "stops.txt",
                id: dup[0].id.clone(),
            });
        }
        let stop_index = stops
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();

        calendars.sort_by(|a, b| a.service_id.cmp(&b.service_id));
        if let Some(dup) = calendars
            .windows(2)
            .find(|w| w[0].service_id == w[1].service_id)
        {
            return Err(LoadError::DuplicateId {
                table: "calendar.txt",
                id: dup[0].service_id.clone(),
            });
        }

        let routes = index_unique(routes, "routes.txt", |r| &r.id)?;
        let trips = index_unique(trips, "trips.txt", |t| &t.id)?;

        let stop_time_count = stop_times.len();
        let mut by_stop: HashMap<String, Vec<StopTime>> = HashMap::new();
        for st in stop_times {
            by_stop.entry(st.stop_id.clone()).or_default().push(st);
        }
        for times in by_stop.values_mut() {
            times.sort_by(|a, b| {
                a.arrival
                    .cmp(&b.arrival)
                    .then_with(|| a.trip_id.cmp(&b.trip_id))
            });
        }

        Ok(Self {
            stops,
            stop_index,
            routes,
            trips,
            calendars,
            stop_times: by_stop,
            stop_time_count,
        })
    }

    /// All stops, sorted by id.
    pub fn all_stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Look up a stop by id.
    pub fn stop(&self, id: &str) -> Option<&Stop> {
        self.stop_index.get(id).map(|&i| &self.stops[i])
    }

    /// All stop times at a stop, sorted by (arrival, trip id).
    ///
    /// Unscheduled stop times (no arrival) sort first.
    pub fn stop_times_for(&self, stop_id: &str) -> &[StopTime] {
        self.stop_times
            .get(stop_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a trip by id.
    pub fn trip(&self, id: &str) -> Option<&Trip> {
        self.trips.get(id)
    }

    /// Look up a route by id.
    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.get(id)
    }

    /// Resolve a set of trip ids. Unknown ids are left out.
    pub fn trips_by_ids<'s, 'i>(
        &'s self,
        ids: impl IntoIterator<Item = &'i str>,
    ) -> HashMap<&'s str, &'s Trip> {
        ids.into_iter()
            .filter_map(|id| self.trips.get(id))
            .map(|t| (t.id.as_str(), t))
            .collect()
    }

    /// Resolve a set of route ids. Unknown ids are left out.
    pub fn routes_by_ids<'s, 'i>(
        &'s self,
        ids: impl IntoIterator<Item = &'i str>,
    ) -> HashMap<&'s str, &'s Route> {
        ids.into_iter()
            .filter_map(|id| self.routes.get(id))
            .map(|r| (r.id.as_str(), r))
            .collect()
    }

    /// Calendars whose weekly pattern includes `weekday`, sorted by service id.
    pub fn active_calendars(&self, weekday: Weekday) -> impl Iterator<Item = &Calendar> + '_ {
        self.calendars.iter().filter(move |c| c.runs_on(weekday))
    }

    /// Row counts per table.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            stops: self.stops.len(),
            routes: self.routes.len(),
            trips: self.trips.len(),
            calendars: self.calendars.len(),
            stop_times: self.stop_time_count,
        }
    }
}

/// Key rows by id, rejecting duplicates.
fn index_unique<T>(
    rows: Vec<T>,
    table: &'static str,
    id: impl Fn(&T) -> &String,
) -> Result<HashMap<String, T>, LoadError> {
    let mut map = HashMap::with_capacity(rows.len());
    for row in rows {
        let key = id(&row).clone();
        if map.contains_key(&key) {
            return Err(LoadError::DuplicateId { table, id: key });
        }
        map.insert(key, row);
    }
    Ok(map)
}
