//! Service calendar resolution.
//!
//! A stop time existing in the static timetable does not mean its trip runs
//! every day. Only trips whose service is active on the query's weekday may
//! appear in a report.

use std::collections::{HashMap, HashSet};

use chrono::Weekday;

use crate::gtfs::{DatasetStore, Trip};

/// Service ids whose calendar includes `weekday`.
pub fn active_service_ids(store: &DatasetStore, weekday: Weekday) -> HashSet<&str> {
    store
        .active_calendars(weekday)
        .map(|c| c.service_id.as_str())
        .collect()
}

/// Keep only trips whose service is in `active_services`.
pub fn retain_active_trips<'a>(
    trips: HashMap<&'a str, &'a Trip>,
    active_services: &HashSet<&str>,
) -> HashMap<&'a str, &'a Trip> {
    trips
        .into_iter()
        .filter(|(_, trip)| active_services.contains(trip.service_id.as_str()))
        .collect()
}
