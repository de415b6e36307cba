//! Job submission and status endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use bragi_hal::{Job, JobHandle, JobId, JobSnapshot, RunRequest};

use crate::error::ApiError;
use crate::runner;
use crate::state::AppState;

/// POST /start_job/{name} - Submit a circuit for execution.
///
/// The source is not validated here: a malformed program is accepted and
/// fails asynchronously, so the client always gets a job id to poll.
pub async fn start_job(
    State(state): State<Arc<AppState>>,
    Path(computer_name): Path<String>,
    Json(request): Json<RunRequest>,
) -> Result<Json<JobHandle>, ApiError> {
    let computer = state
        .computer(&computer_name)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("No such computer: {computer_name}")))?;

    let job_id = JobId::new(Uuid::new_v4().to_string());
    state
        .insert_job(Job::new(job_id.clone(), &computer.name, request.num_shots))
        .await;

    tracing::info!(job = %job_id, computer = %computer.name, shots = request.num_shots, "job accepted");

    tokio::spawn(runner::run_job(
        state.clone(),
        job_id.clone(),
        computer,
        request,
    ));

    Ok(Json(JobHandle { job_id: job_id.0 }))
}

/// GET /job/{id} - Observe the current state of a job.
pub async fn poll_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<JobSnapshot>, ApiError> {
    state
        .job_snapshot(&job_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Job not found: {job_id}")))
}
