//! Bragi Executor Service - runs submitted circuits on simulated devices.
//!
//! The service exposes the three-call wire contract the workbench speaks:
//!
//! - `GET /computers` — list the device fleet with queue-time estimates
//! - `POST /start_job/{name}` — submit `{qasm, num_shots}`, get `{job_id}`
//! - `GET /job/{id}` — observe `{status, results?, error?}`
//!
//! Each submission is parsed, queued for its device's estimated wait
//! (scaled by [`ServerConfig::queue_scale`], zero in tests), then sampled
//! shot by shot on the local statevector simulator. Job state lives in
//! memory; terminal states are permanent.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bragi_server::{AppState, ServerConfig, create_router};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let bind_addr = config.bind_address;
//!     let state = Arc::new(AppState::with_config(config));
//!
//!     let app = create_router(state);
//!     let listener = tokio::net::TcpListener::bind(bind_addr).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod api;
pub mod error;
pub mod runner;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::create_router;
pub use state::{AppState, JobRecord, ServerConfig};
