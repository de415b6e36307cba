//! Executor trait and polling configuration.
//!
//! The [`Executor`] trait covers the three wire calls plus a provided
//! `wait` that drives a job to a terminal status:
//!
//! ```text
//!   computers() ──→ start_job() ──→ poll() ··· poll() ──→ terminal
//!     (async)         (async)        (fixed interval)
//! ```
//!
//! ## Design principles
//!
//! - **Async-native**: all I/O methods are async.
//! - **Thread-safe**: `Send + Sync` bound enables shared ownership.
//! - **Bounded polling**: `wait` stops at the first terminal status, honors
//!   an overall timeout, and is cancelled by dropping its future. There is
//!   no detached timer that can outlive the caller.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::computer::Computer;
use crate::error::{ExecError, ExecResult};
use crate::job::{JobId, JobSnapshot};

/// Fixed-interval polling parameters for [`Executor::wait`].
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Delay between consecutive status reads.
    pub interval: Duration,
    /// Overall deadline before giving up with [`ExecError::Timeout`].
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(600),
        }
    }
}

impl PollConfig {
    /// Set the poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the overall timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Trait for quantum executors.
///
/// Implemented by the HTTP client against a remote executor service and
/// by in-process test doubles.
///
/// # Contract
///
/// - `computers()` returns the full fleet; the order is meaningful (the
///   workbench default-selects the first entry).
/// - `start_job()` submits the source verbatim and returns a job id whose
///   status is already `Running`.
/// - `poll()` is a single status read with no side effects.
/// - `wait()` never issues another read after observing a terminal status.
#[async_trait]
pub trait Executor: Send + Sync {
    /// List the available computers.
    async fn computers(&self) -> ExecResult<Vec<Computer>>;

    /// Submit a circuit source for execution on the named computer.
    async fn start_job(&self, computer: &str, qasm: &str, shots: u32) -> ExecResult<JobId>;

    /// Read the current state of a job.
    async fn poll(&self, job_id: &JobId) -> ExecResult<JobSnapshot>;

    /// Poll at a fixed interval until the job reaches a terminal status.
    ///
    /// A network failure inside one tick is logged and retried on the
    /// next tick; it counts against the timeout but does not abort the
    /// wait. Non-network errors (job vanished, protocol mismatch) abort
    /// immediately.
    async fn wait(&self, job_id: &JobId, poll: PollConfig) -> ExecResult<JobSnapshot> {
        let deadline = Instant::now() + poll.timeout;

        loop {
            match self.poll(job_id).await {
                Ok(snapshot) => {
                    if snapshot.status.is_terminal() {
                        return Ok(snapshot);
                    }
                    tracing::debug!(job = %job_id, status = %snapshot.status, "job pending");
                }
                Err(ExecError::Network(e)) => {
                    tracing::warn!(job = %job_id, "poll tick failed: {e}");
                }
                Err(e) => return Err(e),
            }

            if Instant::now() + poll.interval > deadline {
                return Err(ExecError::Timeout(job_id.to_string()));
            }
            tokio::time::sleep(poll.interval).await;
        }
    }
}
