//! Reading a GTFS zip archive into a [`DatasetStore`].

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::domain::{Coordinate, ScheduleTime};

use super::error::LoadError;
use super::store::DatasetStore;
use super::tables::{Calendar, Route, Stop, StopTime, Trip};

const STOPS: &str = "stops.txt";
const ROUTES: &str = "routes.txt";
const TRIPS: &str = "trips.txt";
const STOP_TIMES: &str = "stop_times.txt";
const CALENDAR: &str = "calendar.txt";

#[derive(Debug, Deserialize)]
struct StopRecord {
    stop_id: String,
    #[serde(default)]
    stop_name: Option<String>,
    #[serde(default)]
    stop_lat: Option<f64>,
    #[serde(default)]
    stop_lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RouteRecord {
    route_id: String,
    #[serde(default)]
    route_short_name: Option<String>,
    #[serde(default)]
    route_long_name: Option<String>,
    route_type: i32,
}

#[derive(Debug, Deserialize)]
struct TripRecord {
    route_id: String,
    service_id: String,
    trip_id: String,
    #[serde(default)]
    trip_headsign: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StopTimeRecord {
    trip_id: String,
    #[serde(default)]
    arrival_time: Option<String>,
    stop_id: String,
}

#[derive(Debug, Deserialize)]
struct CalendarRecord {
    service_id: String,
    monday: u8,
    tuesday: u8,
    wednesday: u8,
    thursday: u8,
    friday: u8,
    saturday: u8,
    sunday: u8,
}

impl DatasetStore {
    /// Load a GTFS zip archive from disk.
    ///
    /// This is blocking and may take a while for large feeds; async callers
    /// should run it on a blocking thread.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        info!(path = %path.display(), entries = archive.len(), "Reading GTFS archive");
        let store = Self::from_archive(&mut archive)?;

        let summary = store.summary();
        info!(
            stops = summary.stops,
            routes = summary.routes,
            trips = summary.trips,
            calendars = summary.calendars,
            stop_times = summary.stop_times,
            "Loaded GTFS dataset"
        );
        Ok(store)
    }

    /// Build a store from an already opened archive.
    pub fn from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Self, LoadError> {
        let mut skipped_stops = 0usize;
        let stops = read_table(archive, STOPS, |r: StopRecord, _| {
            let (Some(lat), Some(lon)) = (r.stop_lat, r.stop_lon) else {
                skipped_stops += 1;
                return Ok(None);
            };
            let Ok(coordinate) = Coordinate::new(lat, lon) else {
                skipped_stops += 1;
                return Ok(None);
            };
            Ok(Some(Stop {
                id: r.stop_id,
                name: non_empty(r.stop_name),
                coordinate,
            }))
        })?;
        if skipped_stops > 0 {
            warn!(
                skipped = skipped_stops,
                "Skipped stops without usable coordinates"
            );
        }

        let routes = read_table(archive, ROUTES, |r: RouteRecord, _| {
            Ok(Some(Route {
                id: r.route_id,
                short_name: non_empty(r.route_short_name),
                long_name: non_empty(r.route_long_name),
                route_type: r.route_type,
            }))
        })?;

        let trips = read_table(archive, TRIPS, |r: TripRecord, _| {
            Ok(Some(Trip {
                id: r.trip_id,
                route_id: r.route_id,
                service_id: r.service_id,
                headsign: non_empty(r.trip_headsign),
            }))
        })?;

        let calendars = read_table(archive, CALENDAR, |r: CalendarRecord, _| {
            Ok(Some(Calendar {
                service_id: r.service_id,
                days: [
                    r.monday == 1,
                    r.tuesday == 1,
                    r.wednesday == 1,
                    r.thursday == 1,
                    r.friday == 1,
                    r.saturday == 1,
                    r.sunday == 1,
                ],
            }))
        })?;

        let stop_times = read_table(archive, STOP_TIMES, |r: StopTimeRecord, line| {
            let arrival = match non_empty(r.arrival_time) {
                Some(text) => Some(ScheduleTime::parse(&text).map_err(|e| {
                    LoadError::InvalidField {
                        table: STOP_TIMES,
                        line,
                        field: "arrival_time",
                        reason: e.to_string(),
                    }
                })?),
                None => None,
            };
            Ok(Some(StopTime {
                stop_id: r.stop_id,
                trip_id: r.trip_id,
                arrival,
            }))
        })?;

        Self::from_tables(stops, routes, trips, calendars, stop_times)
    }
}

/// Deserialize every row of a table, converting each with `convert`.
///
/// `convert` receives the 1-based line number of the row (the header is
/// line 1) and returns `None` to drop a row.
fn read_table<R, T, U>(
    archive: &mut ZipArchive<R>,
    table: &'static str,
    mut convert: impl FnMut(T, u64) -> Result<Option<U>, LoadError>,
) -> Result<Vec<U>, LoadError>
where
    R: Read + Seek,
    T: DeserializeOwned,
{
    let file = match archive.by_name(table) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Err(LoadError::MissingTable(table)),
        Err(e) => return Err(e.into()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<T>().enumerate() {
        let record = result.map_err(|source| LoadError::Csv { table, source })?;
        if let Some(row) = convert(record, idx as u64 + 2)? {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}
