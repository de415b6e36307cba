//! Workbench session state.
//!
//! One editing session: the buffer, the fetched computer list and
//! selection, the tracked job, and the last user-visible error string.
//! Submitting while a job is in flight replaces the tracked job, and a
//! terminal status is final — `poll_once` never issues another read for
//! a job already observed done or failed.

use std::sync::Arc;

use bragi_hal::{
    Computer, ExecError, ExecResult, Executor, JobId, JobSnapshot, JobStatus, PollConfig,
};

/// Stock circuit preloaded into a fresh buffer: Bell pair with explicit
/// resets, measured into both classical bits.
pub const DEFAULT_SOURCE: &str = r#"OPENQASM 2.0;
include "qelib1.inc";

qreg q[2];
creg c[2];

reset q[0];
h q[0];
reset q[1];
cx q[0],q[1];
h q[0];
h q[1];
measure q[0] -> c[0];
measure q[1] -> c[1];"#;

/// Default shot count for submissions.
pub const DEFAULT_SHOTS: u32 = 1;

/// The job currently tracked by the session.
#[derive(Debug, Clone)]
pub struct TrackedJob {
    /// Server-assigned identifier.
    pub id: JobId,
    /// Last observed status.
    pub status: JobStatus,
    /// Per-shot bitstrings once done.
    pub results: Option<Vec<String>>,
    /// Failure message once failed.
    pub error: Option<String>,
}

impl TrackedJob {
    fn running(id: JobId) -> Self {
        Self {
            id,
            status: JobStatus::Running,
            results: None,
            error: None,
        }
    }

    fn apply(&mut self, snapshot: JobSnapshot) {
        self.status = snapshot.status;
        if snapshot.results.is_some() {
            self.results = snapshot.results;
        }
        if snapshot.error.is_some() {
            self.error = snapshot.error;
        }
    }
}

/// Workbench session state over an executor.
pub struct Workbench {
    executor: Arc<dyn Executor>,
    buffer: String,
    shots: u32,
    computers: Vec<Computer>,
    selected: Option<String>,
    job: Option<TrackedJob>,
    last_error: Option<String>,
}

impl Workbench {
    /// Create a session with the stock buffer and default shot count.
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            buffer: DEFAULT_SOURCE.to_string(),
            shots: DEFAULT_SHOTS,
            computers: Vec::new(),
            selected: None,
            job: None,
            last_error: None,
        }
    }

    /// Set the shot count for subsequent submissions.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer contents. No validation is performed; the
    /// executor is the judge of what parses.
    pub fn set_buffer(&mut self, source: impl Into<String>) {
        self.buffer = source.into();
    }

    /// Shot count used by [`submit`](Self::submit).
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// The last fetched computer list.
    pub fn computers(&self) -> &[Computer] {
        &self.computers
    }

    /// The currently selected computer name.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The tracked job, if one was submitted.
    pub fn job(&self) -> Option<&TrackedJob> {
        self.job.as_ref()
    }

    /// The last user-visible error string.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch the computer list, replacing the previous one.
    ///
    /// On success the first entry becomes the selection unless the
    /// current selection is still listed. On failure the list is left
    /// untouched and a user-visible error is recorded.
    pub async fn refresh_computers(&mut self) -> ExecResult<&[Computer]> {
        match self.executor.computers().await {
            Ok(computers) => {
                self.computers = computers;
                let still_listed = self
                    .selected
                    .as_deref()
                    .is_some_and(|sel| self.computers.iter().any(|c| c.name == sel));
                if !still_listed {
                    self.selected = self.computers.first().map(|c| c.name.clone());
                }
                self.last_error = None;
                Ok(&self.computers)
            }
            Err(e) => {
                self.last_error =
                    Some("Failed to load quantum computers. Please try again later.".to_string());
                Err(e)
            }
        }
    }

    /// Select a computer from the fetched list by name.
    pub fn select(&mut self, name: &str) -> ExecResult<()> {
        if self.computers.iter().any(|c| c.name == name) {
            self.selected = Some(name.to_string());
            Ok(())
        } else {
            Err(ExecError::ComputerNotFound(name.to_string()))
        }
    }

    /// Submit the buffer, exactly as edited, to the selected computer.
    ///
    /// Replaces the tracked job; a previous in-flight job is no longer
    /// polled by this session.
    pub async fn submit(&mut self) -> ExecResult<JobId> {
        let computer = self
            .selected
            .clone()
            .ok_or_else(|| ExecError::Configuration("no computer selected".to_string()))?;

        match self
            .executor
            .start_job(&computer, &self.buffer, self.shots)
            .await
        {
            Ok(job_id) => {
                self.job = Some(TrackedJob::running(job_id.clone()));
                self.last_error = None;
                Ok(job_id)
            }
            Err(e) => {
                self.last_error =
                    Some("Failed to submit job. Please try again later.".to_string());
                Err(e)
            }
        }
    }

    /// One status read of the tracked job.
    ///
    /// A job already observed in a terminal status is returned as-is
    /// without touching the executor.
    pub async fn poll_once(&mut self) -> ExecResult<JobStatus> {
        let job = self
            .job
            .as_mut()
            .ok_or_else(|| ExecError::Configuration("no job submitted".to_string()))?;

        if job.status.is_terminal() {
            return Ok(job.status);
        }

        match self.executor.poll(&job.id).await {
            Ok(snapshot) => {
                job.apply(snapshot);
                if let Some(error) = job.error.clone() {
                    self.last_error = Some(error);
                }
                Ok(job.status)
            }
            Err(e) => {
                self.last_error =
                    Some("Failed to get job status. Please try again later.".to_string());
                Err(e)
            }
        }
    }

    /// Poll the tracked job at a fixed interval until it is terminal.
    pub async fn wait(&mut self, poll: PollConfig) -> ExecResult<JobStatus> {
        let job = self
            .job
            .as_mut()
            .ok_or_else(|| ExecError::Configuration("no job submitted".to_string()))?;

        if job.status.is_terminal() {
            return Ok(job.status);
        }

        match self.executor.wait(&job.id, poll).await {
            Ok(snapshot) => {
                job.apply(snapshot);
                if let Some(error) = job.error.clone() {
                    self.last_error = Some(error);
                }
                Ok(job.status)
            }
            Err(e) => {
                self.last_error =
                    Some("Failed to get job status. Please try again later.".to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct MockExecutor {
        computers: Vec<Computer>,
        fail_computers: bool,
        submissions: Mutex<Vec<(String, String, u32)>>,
        poll_script: Mutex<Vec<JobSnapshot>>,
        poll_count: AtomicUsize,
    }

    impl MockExecutor {
        fn with_fleet() -> Self {
            Self {
                computers: vec![Computer::new("GladOs", 10), Computer::new("TARS", 5)],
                poll_script: Mutex::new(vec![JobSnapshot::done(vec!["11".into()])]),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl Executor for MockExecutor {
        async fn computers(&self) -> ExecResult<Vec<Computer>> {
            if self.fail_computers {
                return Err(ExecError::Api {
                    status: 500,
                    message: "down".to_string(),
                });
            }
            Ok(self.computers.clone())
        }

        async fn start_job(&self, computer: &str, qasm: &str, shots: u32) -> ExecResult<JobId> {
            let mut submissions = self.submissions.lock().unwrap();
            submissions.push((computer.to_string(), qasm.to_string(), shots));
            Ok(JobId::new(format!("job-{}", submissions.len())))
        }

        async fn poll(&self, _job_id: &JobId) -> ExecResult<JobSnapshot> {
            self.poll_count.fetch_add(1, Ordering::SeqCst);
            let mut script = self.poll_script.lock().unwrap();
            if script.len() > 1 {
                Ok(script.remove(0))
            } else {
                Ok(script[0].clone())
            }
        }
    }

    fn fast_poll() -> PollConfig {
        PollConfig::default()
            .with_interval(Duration::from_millis(1))
            .with_timeout(Duration::from_millis(100))
    }

    #[tokio::test]
    async fn test_refresh_selects_first_computer() {
        let executor = Arc::new(MockExecutor::with_fleet());
        let mut workbench = Workbench::new(executor);

        workbench.refresh_computers().await.unwrap();
        assert_eq!(workbench.selected(), Some("GladOs"));
        assert_eq!(workbench.computers().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_keeps_valid_selection() {
        let executor = Arc::new(MockExecutor::with_fleet());
        let mut workbench = Workbench::new(executor);

        workbench.refresh_computers().await.unwrap();
        workbench.select("TARS").unwrap();
        workbench.refresh_computers().await.unwrap();
        assert_eq!(workbench.selected(), Some("TARS"));
    }

    #[tokio::test]
    async fn test_refresh_failure_records_error() {
        let executor = Arc::new(MockExecutor {
            fail_computers: true,
            ..MockExecutor::default()
        });
        let mut workbench = Workbench::new(executor);

        assert!(workbench.refresh_computers().await.is_err());
        assert_eq!(
            workbench.last_error(),
            Some("Failed to load quantum computers. Please try again later.")
        );
        assert_eq!(workbench.selected(), None);
    }

    #[tokio::test]
    async fn test_submit_sends_exact_buffer_with_default_shots() {
        let executor = Arc::new(MockExecutor::with_fleet());
        let mut workbench = Workbench::new(executor.clone());

        workbench.refresh_computers().await.unwrap();
        workbench.set_buffer("OPENQASM 2.0; qreg q[1];");
        workbench.submit().await.unwrap();

        let submissions = executor.submissions.lock().unwrap();
        assert_eq!(
            submissions.as_slice(),
            &[(
                "GladOs".to_string(),
                "OPENQASM 2.0; qreg q[1];".to_string(),
                DEFAULT_SHOTS,
            )]
        );
    }

    #[tokio::test]
    async fn test_submit_without_selection_fails() {
        let executor = Arc::new(MockExecutor::with_fleet());
        let mut workbench = Workbench::new(executor);

        let err = workbench.submit().await.unwrap_err();
        assert!(matches!(err, ExecError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_no_polls_after_terminal_status() {
        let executor = Arc::new(MockExecutor::with_fleet());
        let mut workbench = Workbench::new(executor.clone());

        workbench.refresh_computers().await.unwrap();
        workbench.submit().await.unwrap();

        assert_eq!(workbench.poll_once().await.unwrap(), JobStatus::Done);
        let polls_at_terminal = executor.poll_count.load(Ordering::SeqCst);

        // Further polls are answered from the tracked job.
        assert_eq!(workbench.poll_once().await.unwrap(), JobStatus::Done);
        assert_eq!(workbench.wait(fast_poll()).await.unwrap(), JobStatus::Done);
        assert_eq!(executor.poll_count.load(Ordering::SeqCst), polls_at_terminal);
    }

    #[tokio::test]
    async fn test_wait_runs_to_completion() {
        let executor = Arc::new(MockExecutor {
            computers: vec![Computer::new("GladOs", 1)],
            poll_script: Mutex::new(vec![
                JobSnapshot::running(),
                JobSnapshot::running(),
                JobSnapshot::done(vec!["00".into()]),
            ]),
            ..MockExecutor::default()
        });
        let mut workbench = Workbench::new(executor);

        workbench.refresh_computers().await.unwrap();
        workbench.submit().await.unwrap();
        assert_eq!(workbench.wait(fast_poll()).await.unwrap(), JobStatus::Done);

        let job = workbench.job().unwrap();
        assert_eq!(job.results.as_deref(), Some(&["00".to_string()][..]));
    }

    #[tokio::test]
    async fn test_failed_job_surfaces_error_string() {
        let executor = Arc::new(MockExecutor {
            computers: vec![Computer::new("GladOs", 1)],
            poll_script: Mutex::new(vec![JobSnapshot::failed("QASM parse error: line 3")]),
            ..MockExecutor::default()
        });
        let mut workbench = Workbench::new(executor);

        workbench.refresh_computers().await.unwrap();
        workbench.submit().await.unwrap();
        assert_eq!(
            workbench.poll_once().await.unwrap(),
            JobStatus::Failed
        );
        assert_eq!(workbench.last_error(), Some("QASM parse error: line 3"));
    }

    #[tokio::test]
    async fn test_resubmit_replaces_tracked_job() {
        let executor = Arc::new(MockExecutor::with_fleet());
        let mut workbench = Workbench::new(executor);

        workbench.refresh_computers().await.unwrap();
        let first = workbench.submit().await.unwrap();
        let second = workbench.submit().await.unwrap();
        assert_ne!(first, second);
        assert_eq!(workbench.job().unwrap().id, second);
    }

    #[test]
    fn test_default_buffer_is_the_stock_circuit() {
        assert!(DEFAULT_SOURCE.starts_with("OPENQASM 2.0;"));
        assert!(DEFAULT_SOURCE.contains("cx q[0],q[1];"));
        assert_eq!(DEFAULT_SHOTS, 1);
    }
}
