//! Application state for the web layer.

use std::sync::Arc;

use crate::query::NearbyQuery;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Query engine over the loaded dataset
    pub query: Arc<NearbyQuery>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(query: NearbyQuery) -> Self {
        Self {
            query: Arc::new(query),
        }
    }
}
