//! Temporal filter: stop times inside a look-ahead window.

use chrono::Duration;

use crate::domain::ScheduleTime;
use crate::gtfs::{DatasetStore, StopTime};

/// An open time interval `(from, to)`; both ends are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: ScheduleTime,
    pub to: ScheduleTime,
}

impl TimeWindow {
    /// Create a window between two times.
    pub fn new(from: ScheduleTime, to: ScheduleTime) -> Self {
        Self { from, to }
    }

    /// The window starting at `now` and lasting `horizon`.
    ///
    /// The end may pass 24:00:00, matching GTFS times of trips that run
    /// past midnight on the same service day.
    pub fn starting_at(now: ScheduleTime, horizon: Duration) -> Self {
        Self {
            from: now,
            to: now.saturating_add(horizon),
        }
    }

    /// Whether `time` lies strictly inside the window.
    pub fn contains(&self, time: ScheduleTime) -> bool {
        self.from < time && time < self.to
    }
}

/// Stop times with an arrival strictly inside `window`.
///
/// `sorted` must be ordered by arrival (unscheduled first), as returned by
/// [`DatasetStore::stop_times_for`]. The result keeps that order: ascending
/// by arrival, ties by trip id.
pub fn within_window(sorted: &[StopTime], window: TimeWindow) -> &[StopTime] {
    // `None < Some(_)`, so unscheduled entries fall before `start`
    let start = sorted.partition_point(|st| st.arrival <= Some(window.from));
    let end = sorted.partition_point(|st| st.arrival < Some(window.to));
    if end <= start {
        return &[];
    }
    &sorted[start..end]
}

/// Upcoming stop times at one stop.
pub fn upcoming_stop_times<'s>(
    store: &'s DatasetStore,
    stop_id: &str,
    window: TimeWindow,
) -> &'s [StopTime] {
    within_window(store.stop_times_for(stop_id), window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs::fixtures::*;

    fn store_with(times: Vec<StopTime>) -> DatasetStore {
        DatasetStore::from_tables(
            vec![stop("S1", "Central", 0.0, 0.0)],
            vec![],
            vec![],
            vec![],
            times,
        )
        .unwrap()
    }

    fn trips(slice: &[StopTime]) -> Vec<&str> {
        slice.iter().map(|st| st.trip_id.as_str()).collect()
    }

    #[test]
    fn bounds_are_exclusive() {
        let store = store_with(vec![
            stop_time("S1", "AT_FROM", "08:00:00"),
            stop_time("S1", "INSIDE", "08:30:00"),
            stop_time("S1", "AT_TO", "10:00:00"),
            stop_time("S1", "BEFORE", "07:59:00"),
            stop_time("S1", "AFTER", "10:01:00"),
        ]);
        let window = TimeWindow::new(time("08:00:00"), time("10:00:00"));

        assert_eq!(trips(upcoming_stop_times(&store, "S1", window)), vec!["INSIDE"]);
    }

    #[test]
    fn unscheduled_excluded() {
        let store = store_with(vec![
            unscheduled("S1", "NONE"),
            stop_time("S1", "T1", "08:10:00"),
        ]);
        let window = TimeWindow::new(time("00:00:00"), time("23:00:00"));

        assert_eq!(trips(upcoming_stop_times(&store, "S1", window)), vec!["T1"]);
    }

    #[test]
    fn ordered_by_arrival_then_trip() {
        let store = store_with(vec![
            stop_time("S1", "T3", "09:00:00"),
            stop_time("S1", "T2", "08:15:00"),
            stop_time("S1", "T1", "09:00:00"),
        ]);
        let window = TimeWindow::starting_at(time("08:00:00"), Duration::hours(2));

        assert_eq!(
            trips(upcoming_stop_times(&store, "S1", window)),
            vec!["T2", "T1", "T3"]
        );
    }

    #[test]
    fn window_past_midnight() {
        let store = store_with(vec![
            stop_time("S1", "LATE", "23:50:00"),
            stop_time("S1", "NIGHT", "24:40:00"),
            stop_time("S1", "TOO_LATE", "25:45:00"),
            stop_time("S1", "MORNING", "00:40:00"),
        ]);
        let window = TimeWindow::starting_at(time("23:30:00"), Duration::hours(2));

        assert_eq!(
            trips(upcoming_stop_times(&store, "S1", window)),
            vec!["LATE", "NIGHT"]
        );
    }

    #[test]
    fn empty_or_inverted_window() {
        let store = store_with(vec![stop_time("S1", "T1", "08:00:00")]);

        let empty = TimeWindow::new(time("08:00:00"), time("08:00:00"));
        assert!(upcoming_stop_times(&store, "S1", empty).is_empty());

        let inverted = TimeWindow::new(time("09:00:00"), time("07:00:00"));
        assert!(upcoming_stop_times(&store, "S1", inverted).is_empty());

        let window = TimeWindow::new(time("07:00:00"), time("09:00:00"));
        assert!(upcoming_stop_times(&store, "unknown", window).is_empty());
    }

    #[test]
    fn contains() {
        let window = TimeWindow::new(time("08:00:00"), time("10:00:00"));
        assert!(!window.contains(time("08:00:00")));
        assert!(window.contains(time("08:00:01")));
        assert!(!window.contains(time("10:00:00")));
    }
}
