//! Job lifecycle types.
//!
//! The job state machine:
//!
//! ```text
//!   start_job() ──→ Running ──→ Done
//!                      │
//!                      └──→ Failed
//! ```
//!
//! **Invariants:**
//! - `start_job()` returns a job already in `Running`.
//! - Terminal states (`Done`, `Failed`) are permanent.
//! - `results` is only present when status is `Done`.
//! - `error` is only present when status is `Failed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Job is queued or executing.
    Running,
    /// Job completed successfully.
    Done,
    /// Job failed.
    Failed,
}

impl JobStatus {
    /// Parse a wire status string, case-insensitively.
    ///
    /// Executors are inconsistent about casing (`DONE` vs `done`), so the
    /// comparison normalizes. Unknown strings return `None` rather than
    /// guessing.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "running" | "queued" | "pending" => Some(JobStatus::Running),
            "done" | "completed" => Some(JobStatus::Done),
            "failed" | "error" => Some(JobStatus::Failed),
            _ => None,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }

    /// Check if the job completed successfully.
    pub fn is_done(self) -> bool {
        matches!(self, JobStatus::Done)
    }

    /// Check if the job failed.
    pub fn is_failed(self) -> bool {
        matches!(self, JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Running => write!(f, "running"),
            JobStatus::Done => write!(f, "done"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Wire body for `POST /start_job/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    /// QASM2 source, submitted exactly as edited.
    pub qasm: String,
    /// Number of independent shots to execute.
    pub num_shots: u32,
}

/// Wire response from `POST /start_job/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobHandle {
    /// Server-assigned job identifier.
    pub job_id: String,
}

/// Wire response from `GET /job/{id}`: the observable state of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    /// Current status.
    pub status: JobStatus,
    /// One bitstring per shot, present once the job is done.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<String>>,
    /// Failure message, present once the job has failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobSnapshot {
    /// Snapshot of a job still executing.
    pub fn running() -> Self {
        Self {
            status: JobStatus::Running,
            results: None,
            error: None,
        }
    }

    /// Snapshot of a completed job.
    pub fn done(results: Vec<String>) -> Self {
        Self {
            status: JobStatus::Done,
            results: Some(results),
            error: None,
        }
    }

    /// Snapshot of a failed job.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            results: None,
            error: Some(error.into()),
        }
    }
}

/// A job with metadata for executor-side tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// The job identifier.
    pub id: JobId,
    /// Current status.
    pub status: JobStatus,
    /// Number of shots requested.
    pub shots: u32,
    /// Computer the job was submitted to.
    pub computer: String,
    /// Time the job was created.
    pub created_at: DateTime<Utc>,
    /// Time the job finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Create a new running job.
    pub fn new(id: impl Into<JobId>, computer: impl Into<String>, shots: u32) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Running,
            shots,
            computer: computer.into(),
            created_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Update the status, stamping the finish time on terminal states.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        if self.status.is_terminal() && self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
        self
    }
}
