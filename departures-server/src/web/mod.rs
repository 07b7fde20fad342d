//! Web layer for the nearby departures service.
//!
//! `GET /nearby?lat=..&lon=..` answers with JSON, an HTML fragment or the
//! plain-text report, depending on the request.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
