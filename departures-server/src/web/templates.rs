//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::STOP_GLYPH;
use crate::query::{Itinerary, StopSection};
use crate::report::{HEADER, departure_line};

// ============================================================================
// Fragment Templates (AJAX responses)
// ============================================================================

/// Nearby departures fragment.
#[derive(Template)]
#[template(path = "nearby.html")]
pub struct NearbyTemplate {
    pub header: &'static str,
    pub stop_glyph: &'static str,
    pub stops: Vec<StopView>,
}

impl NearbyTemplate {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            header: HEADER,
            stop_glyph: STOP_GLYPH,
            stops: itinerary.sections.iter().map(StopView::from_section).collect(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Stop view model for templates.
#[derive(Debug, Clone)]
pub struct StopView {
    pub name: String,
    pub distance_m: u32,
    /// Pre-formatted lines, e.g. `🚌 1 (Downtown): 08:30`
    pub departures: Vec<String>,
}

impl StopView {
    pub fn from_section(section: &StopSection) -> Self {
        Self {
            name: section.stop_name.clone(),
            distance_m: section.distance_m.round() as u32,
            departures: section.departures.iter().map(departure_line).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScheduleTime, TransitMode};
    use crate::query::Departure;

    fn section(name: &str, departures: Vec<Departure>) -> StopSection {
        StopSection {
            stop_id: "S".into(),
            stop_name: name.into(),
            distance_m: 42.4,
            departures,
        }
    }

    #[test]
    fn renders_stops_and_lines() {
        let itinerary = Itinerary {
            sections: vec![
                section(
                    "Central",
                    vec![Departure {
                        trip_id: "T1".into(),
                        route_id: "R1".into(),
                        route_name: "1".into(),
                        mode: TransitMode::Bus,
                        headsign: Some("Downtown".into()),
                        arrival: ScheduleTime::parse("08:30:00").unwrap(),
                    }],
                ),
                section("Quiet", vec![]),
            ],
        };

        let html = NearbyTemplate::from_itinerary(&itinerary).render().unwrap();
        assert!(html.contains("Public transport near your location:"));
        assert!(html.contains("🚏 Central <small>42 m</small>"));
        assert!(html.contains("<li>🚌 1 (Downtown): 08:30</li>"));
        // The quiet stop gets a heading and no list
        assert!(html.contains("🚏 Quiet <small>42 m</small>"));
        assert_eq!(html.matches("<ul>").count(), 1);
        assert!(!html.contains("No departures"));
    }

    #[test]
    fn escapes_dataset_text() {
        let itinerary = Itinerary {
            sections: vec![section("<b>Stop</b>", vec![])],
        };

        let html = NearbyTemplate::from_itinerary(&itinerary).render().unwrap();
        assert!(!html.contains("<b>Stop</b>"));
        assert!(html.contains("&lt;b&gt;Stop&lt;/b&gt;"));
    }

    #[test]
    fn empty_itinerary_is_header_only() {
        let html = NearbyTemplate::from_itinerary(&Itinerary::default())
            .render()
            .unwrap();
        assert!(html.contains("<h2>Public transport near your location:</h2>"));
        assert!(!html.contains("<article"));
        assert!(!html.contains("No stops"));
    }
}
