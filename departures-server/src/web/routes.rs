//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, warn};

use crate::query::QueryError;
use crate::report::render_text;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/nearby", get(nearby))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse the `at` parameter, with or without seconds.
fn parse_at(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Upcoming departures near a point.
async fn nearby(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: Result<Query<NearbyRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = req.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let now = match req.at.as_deref() {
        Some(at) => parse_at(at).ok_or_else(|| AppError::BadRequest {
            message: format!("Invalid time: {at} (expected YYYY-MM-DDTHH:MM:SS)"),
        })?,
        None => Local::now().naive_local(),
    };

    let itinerary = state.query.query(req.lat, req.lon, now)?;
    debug!(lat = req.lat, lon = req.lon, %now, stops = itinerary.sections.len(), "Nearby request");

    // HTML fragment, plain text, or JSON
    if accepts_html(&headers) {
        let html = NearbyTemplate::from_itinerary(&itinerary)
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {}", e),
            })?;

        Ok(Html(html).into_response())
    } else if req.format.as_deref() == Some("text") {
        Ok(render_text(&itinerary).into_response())
    } else {
        Ok(Json(NearbyResponse::from_itinerary(&itinerary)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidCoordinate(_) => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
