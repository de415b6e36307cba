//! Device fleet endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};

use bragi_hal::Computer;

use crate::state::AppState;

/// GET /computers - List the device fleet.
///
/// Listing order is stable: clients default-select the first entry.
pub async fn list_computers(State(state): State<Arc<AppState>>) -> Json<Vec<Computer>> {
    Json(state.computers().to_vec())
}
