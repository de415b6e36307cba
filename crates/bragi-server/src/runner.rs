//! Asynchronous job execution.
//!
//! Each accepted job runs in its own task: parse, simulate the queue
//! wait, then sample shot by shot on the statevector simulator. All
//! failure paths end in a failed job with a user-visible message; the
//! task itself never panics the server.

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, warn};

use bragi_hal::{Computer, JobId, RunRequest};

use crate::state::AppState;

/// Execute one job to a terminal state.
pub async fn run_job(state: Arc<AppState>, job_id: JobId, computer: Computer, request: RunRequest) {
    let circuit = match bragi_qasm::parse(&request.qasm) {
        Ok(circuit) => circuit,
        Err(e) => {
            warn!(job = %job_id, "rejecting submission: {e}");
            state
                .fail_job(&job_id, format!("QASM parse error: {e}"))
                .await;
            return;
        }
    };

    // Simulate the advertised queue wait. Scaled to zero in tests.
    let delay = Duration::from_secs_f64(computer.queue_time as f64 * state.config.queue_scale);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let shots = request.num_shots;
    let sampled = tokio::task::spawn_blocking(move || {
        let mut rng = StdRng::from_entropy();
        bragi_sim::run_shots(&circuit, shots, &mut rng)
    })
    .await;

    match sampled {
        Ok(Ok(results)) => {
            info!(job = %job_id, shots, "job completed");
            state.complete_job(&job_id, results).await;
        }
        Ok(Err(e)) => {
            warn!(job = %job_id, "job failed: {e}");
            state.fail_job(&job_id, e.to_string()).await;
        }
        Err(e) => {
            error!(job = %job_id, "execution task panicked: {e}");
            state
                .fail_job(&job_id, format!("internal execution error: {e}"))
                .await;
        }
    }
}
