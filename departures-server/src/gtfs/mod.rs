//! Static GTFS dataset store.
//!
//! Loads a GTFS schedule archive once at startup into immutable in-memory
//! tables. Nothing here is mutated after construction, so a loaded store can
//! be shared across any number of concurrent queries without locking.
//!
//! Required tables: `stops.txt`, `routes.txt`, `trips.txt`,
//! `stop_times.txt` and `calendar.txt`.

mod error;
mod load;
mod store;
mod tables;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::LoadError;
pub use store::{DatasetStore, DatasetSummary};
pub use tables::{Calendar, Route, Stop, StopTime, Trip};
