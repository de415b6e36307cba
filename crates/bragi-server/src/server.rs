//! Axum server setup and routing.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::state::AppState;

/// Create the Axum router with the executor wire contract.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/computers", get(api::computers::list_computers))
        .route("/start_job/{computer_name}", post(api::jobs::start_job))
        .route("/job/{job_id}", get(api::jobs::poll_job))
        // The workbench may be served from anywhere; the contract has no auth.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
