//! Row builders shared by unit tests.

use crate::domain::{Coordinate, ScheduleTime};

use super::tables::{Calendar, Route, Stop, StopTime, Trip};

pub const WEEKDAYS: [bool; 7] = [true, true, true, true, true, false, false];
pub const WEEKENDS: [bool; 7] = [false, false, false, false, false, true, true];
pub const ALL_DAYS: [bool; 7] = [true; 7];
pub const NO_DAYS: [bool; 7] = [false; 7];

pub fn stop(id: &str, name: &str, lat: f64, lon: f64) -> Stop {
    Stop {
        id: id.to_string(),
        name: Some(name.to_string()),
        coordinate: Coordinate::new(lat, lon).unwrap(),
    }
}

pub fn route(id: &str, short_name: &str, route_type: i32) -> Route {
    Route {
        id: id.to_string(),
        short_name: Some(short_name.to_string()),
        long_name: None,
        route_type,
    }
}

pub fn trip(id: &str, route_id: &str, service_id: &str, headsign: &str) -> Trip {
    Trip {
        id: id.to_string(),
        route_id: route_id.to_string(),
        service_id: service_id.to_string(),
        headsign: Some(headsign.to_string()),
    }
}

pub fn calendar(service_id: &str, days: [bool; 7]) -> Calendar {
    Calendar {
        service_id: service_id.to_string(),
        days,
    }
}

pub fn stop_time(stop_id: &str, trip_id: &str, arrival: &str) -> StopTime {
    StopTime {
        stop_id: stop_id.to_string(),
        trip_id: trip_id.to_string(),
        arrival: Some(time(arrival)),
    }
}

pub fn unscheduled(stop_id: &str, trip_id: &str) -> StopTime {
    StopTime {
        stop_id: stop_id.to_string(),
        trip_id: trip_id.to_string(),
        arrival: None,
    }
}

pub fn time(s: &str) -> ScheduleTime {
    ScheduleTime::parse(s).unwrap()
}
