//! Rows of the in-memory schedule tables.

use chrono::Weekday;

use crate::domain::{Coordinate, ScheduleTime, TransitMode};

/// A place where vehicles pick up or drop off passengers.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: Option<String>,
    pub coordinate: Coordinate,
}

impl Stop {
    /// Name to show to users, falling back to the stop id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// The scheduled arrival of one trip at one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub stop_id: String,
    pub trip_id: String,
    /// `None` for stops without a published time (timepoints are interpolated)
    pub arrival: Option<ScheduleTime>,
}

/// One scheduled run of a vehicle along a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub id: String,
    pub route_id: String,
    pub service_id: String,
    pub headsign: Option<String>,
}

/// A named, typed transit line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    /// Raw GTFS `route_type`
    pub route_type: i32,
}

impl Route {
    /// Name to show to users: short name, then long name, then the route id.
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.long_name.as_deref())
            .unwrap_or(&self.id)
    }

    /// The transport mode of this route.
    pub fn mode(&self) -> TransitMode {
        TransitMode::from_route_type(self.route_type)
    }
}

/// Weekly operating pattern of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub service_id: String,
    /// Monday first
    pub days: [bool; 7],
}

impl Calendar {
    /// Whether the service operates on the given weekday.
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.days[weekday.num_days_from_monday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_runs_on() {
        let weekdays = Calendar {
            service_id: "WD".into(),
            days: [true, true, true, true, true, false, false],
        };
        assert!(weekdays.runs_on(Weekday::Mon));
        assert!(weekdays.runs_on(Weekday::Fri));
        assert!(!weekdays.runs_on(Weekday::Sat));
        assert!(!weekdays.runs_on(Weekday::Sun));

        let sunday = Calendar {
            service_id: "SU".into(),
            days: [false, false, false, false, false, false, true],
        };
        assert!(sunday.runs_on(Weekday::Sun));
        assert!(!sunday.runs_on(Weekday::Mon));
    }

    #[test]
    fn route_display_name_fallbacks() {
        let mut route = Route {
            id: "R1".into(),
            short_name: Some("5".into()),
            long_name: Some("Harbour Line".into()),
            route_type: 3,
        };
        assert_eq!(route.display_name(), "5");

        route.short_name = None;
        assert_eq!(route.display_name(), "Harbour Line");

        route.long_name = None;
        assert_eq!(route.display_name(), "R1");
    }

    #[test]
    fn route_mode() {
        let route = Route {
            id: "R1".into(),
            short_name: None,
            long_name: None,
            route_type: 900,
        };
        assert_eq!(route.mode(), TransitMode::Tram);
    }

    #[test]
    fn stop_display_name_fallback() {
        let mut stop = Stop {
            id: "S1".into(),
            name: Some("Central".into()),
            coordinate: Coordinate::new(0.0, 0.0).unwrap(),
        };
        assert_eq!(stop.display_name(), "Central");
        stop.name = None;
        assert_eq!(stop.display_name(), "S1");
    }
}
