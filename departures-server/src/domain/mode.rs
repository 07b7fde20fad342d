//! Transport modes and their display glyphs.

use std::fmt;

/// Glyph shown before each stop name in a report.
pub const STOP_GLYPH: &str = "🚏";

/// The kind of vehicle serving a route, as far as reports care.
///
/// Built from GTFS `route_type`, covering both the basic codes (0-12) and
/// the extended hierarchical codes (100-1700).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitMode {
    Bus,
    Tram,
    Trolleybus,
    Water,
    Rail,
    /// Any route type without a dedicated glyph.
    Other,
}

impl TransitMode {
    /// Classify a GTFS `route_type` value.
    ///
    /// # Examples
    ///
    /// ```
    /// use departures_server::domain::TransitMode;
    ///
    /// assert_eq!(TransitMode::from_route_type(3), TransitMode::Bus);
    /// assert_eq!(TransitMode::from_route_type(700), TransitMode::Bus);
    /// assert_eq!(TransitMode::from_route_type(800), TransitMode::Trolleybus);
    /// assert_eq!(TransitMode::from_route_type(1), TransitMode::Other); // subway
    /// ```
    pub fn from_route_type(route_type: i32) -> Self {
        match route_type {
            3 | 700..=799 => TransitMode::Bus,
            0 | 900..=999 => TransitMode::Tram,
            11 | 800 => TransitMode::Trolleybus,
            4 | 1000..=1099 | 1200 => TransitMode::Water,
            2 | 100..=199 => TransitMode::Rail,
            _ => TransitMode::Other,
        }
    }

    /// The glyph shown in front of a departure.
    pub fn glyph(&self) -> &'static str {
        match self {
            TransitMode::Bus => "🚌",
            TransitMode::Tram => "🚃",
            TransitMode::Trolleybus => "🚎",
            TransitMode::Water => "🚢",
            TransitMode::Rail => "🚈",
            TransitMode::Other => "❓",
        }
    }

    /// Lowercase name, used in JSON responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitMode::Bus => "bus",
            TransitMode::Tram => "tram",
            TransitMode::Trolleybus => "trolleybus",
            TransitMode::Water => "water",
            TransitMode::Rail => "rail",
            TransitMode::Other => "other",
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
