//! Text rendering of itineraries.
//!
//! The layout is one block per stop:
//!
//! ```text
//! Public transport near your location:
//!
//! 🚏 Central
//!   - 🚌 1 (Downtown): 08:30
//!
//! ```

use std::borrow::Cow;

use crate::domain::STOP_GLYPH;
use crate::query::{Departure, Itinerary};

/// First line of every report, present even when no stop is nearby.
pub const HEADER: &str = "Public transport near your location:";

/// Render as plain text.
pub fn render_text(itinerary: &Itinerary) -> String {
    render(itinerary, plain)
}

/// Render for Telegram's legacy Markdown parse mode.
///
/// Same layout as [`render_text`], with Markdown control characters in
/// dataset text (stop names, route names, headsigns) escaped.
pub fn render_markdown(itinerary: &Itinerary) -> String {
    render(itinerary, escape_markdown)
}

/// One departure, e.g. `🚌 1 (Downtown): 08:30`.
///
/// The parenthesised headsign is left out when the trip has none.
pub fn departure_line(departure: &Departure) -> String {
    format_departure(departure, plain)
}

fn render(itinerary: &Itinerary, escape: fn(&str) -> Cow<'_, str>) -> String {
    let mut out = format!("{HEADER}\n\n");
    for section in &itinerary.sections {
        out.push_str(&format!("{STOP_GLYPH} {}\n", escape(&section.stop_name)));
        for departure in &section.departures {
            out.push_str(&format!("  - {}\n", format_departure(departure, escape)));
        }
        out.push('\n');
    }
    out
}

fn format_departure(departure: &Departure, escape: fn(&str) -> Cow<'_, str>) -> String {
    let glyph = departure.mode.glyph();
    let route = escape(&departure.route_name);
    match departure.headsign.as_deref() {
        Some(headsign) => format!(
            "{glyph} {route} ({}): {}",
            escape(headsign),
            departure.arrival
        ),
        None => format!("{glyph} {route}: {}", departure.arrival),
    }
}

fn plain(s: &str) -> Cow<'_, str> {
    Cow::Borrowed(s)
}

/// Escape the characters that start an entity in legacy Markdown.
pub fn escape_markdown(s: &str) -> Cow<'_, str> {
    if !s.contains(['_', '*', '`', '[']) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
