//! Domain types for the nearby departures server.
//!
//! These types represent validated values. All types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod coordinate;
mod mode;
mod time;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use mode::{STOP_GLYPH, TransitMode};
pub use time::{ScheduleTime, TimeError};
