//! Application state for the executor service.

use std::net::SocketAddr;

use rand::Rng;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use bragi_hal::{Computer, Job, JobId, JobSnapshot, JobStatus};

/// Default device fleet, in listing order.
const FLEET: [&str; 4] = ["GladOs", "HAL-9000", "TARS", "Quanti"];

/// Executor service configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,
    /// Multiplier applied to each device's queue-time estimate before a
    /// job executes. 1.0 simulates the advertised wait; 0.0 runs jobs
    /// immediately (used in tests).
    pub queue_scale: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: ([127, 0, 0, 1], 8000).into(),
            queue_scale: 1.0,
        }
    }
}

/// A tracked job: metadata plus its terminal payload, if any.
#[derive(Debug, Clone)]
pub struct JobRecord {
    /// Job metadata and status.
    pub job: Job,
    /// Per-shot bitstrings, set when the job completes.
    pub results: Option<Vec<String>>,
    /// Failure message, set when the job fails.
    pub error: Option<String>,
}

impl JobRecord {
    fn new(job: Job) -> Self {
        Self {
            job,
            results: None,
            error: None,
        }
    }

    /// The wire view of this record.
    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            status: self.job.status,
            results: self.results.clone(),
            error: self.error.clone(),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Device fleet, fixed at startup. Listing order is stable because
    /// clients default-select the first entry.
    computers: Vec<Computer>,
    /// Tracked jobs by id.
    jobs: RwLock<FxHashMap<String, JobRecord>>,
    /// Service configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Create state with the default fleet and configuration.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create state with the default fleet and custom configuration.
    ///
    /// Queue-time estimates are randomized at startup (0-60 s), matching
    /// what a busy shared device would advertise.
    pub fn with_config(config: ServerConfig) -> Self {
        let mut rng = rand::thread_rng();
        let computers = FLEET
            .iter()
            .map(|name| Computer::new(*name, rng.gen_range(0..=60)))
            .collect();
        Self::with_computers(computers, config)
    }

    /// Create state with an explicit fleet.
    pub fn with_computers(computers: Vec<Computer>, config: ServerConfig) -> Self {
        Self {
            computers,
            jobs: RwLock::new(FxHashMap::default()),
            config,
        }
    }

    /// The device fleet in listing order.
    pub fn computers(&self) -> &[Computer] {
        &self.computers
    }

    /// Look up a device by name.
    pub fn computer(&self, name: &str) -> Option<&Computer> {
        self.computers.iter().find(|c| c.name == name)
    }

    /// Track a newly submitted job.
    pub async fn insert_job(&self, job: Job) {
        let mut jobs = self.jobs.write().await;
        jobs.insert(job.id.0.clone(), JobRecord::new(job));
    }

    /// Wire snapshot of a job, if it exists.
    pub async fn job_snapshot(&self, job_id: &str) -> Option<JobSnapshot> {
        let jobs = self.jobs.read().await;
        jobs.get(job_id).map(JobRecord::snapshot)
    }

    /// Mark a job done with its per-shot results.
    pub async fn complete_job(&self, job_id: &JobId, results: Vec<String>) {
        let mut jobs = self.jobs.write().await;
        if let Some(record) = jobs.get_mut(&job_id.0) {
            record.job = record.job.clone().with_status(JobStatus::Done);
            record.results = Some(results);
        }
    }

    /// Mark a job failed with a user-visible message.
    pub async fn fail_job(&self, job_id: &JobId, error: impl Into<String>) {
        let mut jobs = self.jobs.write().await;
        if let Some(record) = jobs.get_mut(&job_id.0) {
            record.job = record.job.clone().with_status(JobStatus::Failed);
            record.error = Some(error.into());
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fleet() {
        let state = AppState::new();
        let names: Vec<_> = state.computers().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, FLEET);
        assert!(state.computers().iter().all(|c| c.queue_time <= 60));
    }

    #[tokio::test]
    async fn test_job_lifecycle() {
        let state = AppState::new();
        let id = JobId::new("job-1");
        state.insert_job(Job::new(id.clone(), "GladOs", 5)).await;

        let snapshot = state.job_snapshot("job-1").await.unwrap();
        assert_eq!(snapshot.status, JobStatus::Running);
        assert!(snapshot.results.is_none());

        state.complete_job(&id, vec!["00".into(); 5]).await;
        let snapshot = state.job_snapshot("job-1").await.unwrap();
        assert_eq!(snapshot.status, JobStatus::Done);
        assert_eq!(snapshot.results.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let state = AppState::new();
        assert!(state.job_snapshot("nope").await.is_none());
    }
}
