//! HTTP client for the executor wire contract.
//!
//! Implements the three REST calls:
//! - `GET /computers` — list devices with queue-time estimates
//! - `POST /start_job/{name}` — submit `{qasm, num_shots}`, get `{job_id}`
//! - `GET /job/{id}` — observe `{status, results?, error?}`
//!
//! Status strings are normalized case-insensitively: older executors
//! report `DONE`/`FAILED`, newer ones `done`/`failed`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;

use bragi_hal::{
    Computer, ExecError, ExecResult, Executor, JobHandle, JobId, JobSnapshot, JobStatus,
    RunRequest,
};

/// Default executor endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// User-Agent sent with requests.
const USER_AGENT: &str = concat!("bragi/", env!("CARGO_PKG_VERSION"), " (qasm-workbench)");

/// HTTP executor client.
pub struct HttpExecutor {
    /// HTTP client.
    client: Client,
    /// Endpoint URL, without a trailing slash.
    endpoint: String,
}

impl std::fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl HttpExecutor {
    /// Create a client against the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> ExecResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }

        Ok(Self { client, endpoint })
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    /// Turn a non-success response into an [`ExecError::Api`].
    async fn api_error(response: reqwest::Response) -> ExecError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "no body".to_string());
        ExecError::Api { status, message }
    }
}

/// Wire shape of `GET /job/{id}` before status normalization.
#[derive(Debug, Deserialize)]
struct JobStatusResponse {
    /// Status string, any casing.
    status: String,
    /// One bitstring per shot, present once done.
    #[serde(default)]
    results: Option<Vec<String>>,
    /// Failure message, present once failed.
    #[serde(default)]
    error: Option<String>,
}

impl JobStatusResponse {
    fn into_snapshot(self) -> ExecResult<JobSnapshot> {
        let status = JobStatus::parse(&self.status)
            .ok_or_else(|| ExecError::UnexpectedStatus(self.status.clone()))?;
        Ok(JobSnapshot {
            status,
            results: self.results,
            error: self.error,
        })
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn computers(&self) -> ExecResult<Vec<Computer>> {
        let response = self.client.get(self.url("/computers")).send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.json().await?)
    }

    async fn start_job(&self, computer: &str, qasm: &str, shots: u32) -> ExecResult<JobId> {
        let body = RunRequest {
            qasm: qasm.to_string(),
            num_shots: shots,
        };

        let response = self
            .client
            .post(self.url(&format!("/start_job/{computer}")))
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ExecError::ComputerNotFound(computer.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let handle: JobHandle = response.json().await?;
        tracing::debug!(job = %handle.job_id, computer, shots, "job submitted");
        Ok(JobId::new(handle.job_id))
    }

    async fn poll(&self, job_id: &JobId) -> ExecResult<JobSnapshot> {
        let response = self
            .client
            .get(self.url(&format!("/job/{job_id}")))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ExecError::JobNotFound(job_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let status: JobStatusResponse = response.json().await?;
        status.into_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let client = HttpExecutor::new("http://localhost:8000/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000");
        assert_eq!(client.url("/computers"), "http://localhost:8000/computers");
    }

    #[test]
    fn test_status_response_lowercase() {
        let json = r#"{"status": "done", "results": ["00", "11"]}"#;
        let response: JobStatusResponse = serde_json::from_str(json).unwrap();
        let snapshot = response.into_snapshot().unwrap();
        assert_eq!(snapshot.status, JobStatus::Done);
        assert_eq!(snapshot.results.unwrap().len(), 2);
    }

    #[test]
    fn test_status_response_uppercase() {
        // Some executors report uppercase statuses.
        let json = r#"{"status": "FAILED", "error": "QASM parse error: bad input"}"#;
        let response: JobStatusResponse = serde_json::from_str(json).unwrap();
        let snapshot = response.into_snapshot().unwrap();
        assert_eq!(snapshot.status, JobStatus::Failed);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("QASM parse error: bad input")
        );
    }

    #[test]
    fn test_status_response_unknown_status() {
        let json = r#"{"status": "exploded"}"#;
        let response: JobStatusResponse = serde_json::from_str(json).unwrap();
        let err = response.into_snapshot().unwrap_err();
        assert!(matches!(err, ExecError::UnexpectedStatus(ref s) if s == "exploded"));
    }

    #[test]
    fn test_computers_wire_shape() {
        let json = r#"[{"name": "GladOs", "queue_time": 30}]"#;
        let computers: Vec<Computer> = serde_json::from_str(json).unwrap();
        assert_eq!(computers[0], Computer::new("GladOs", 30));
    }
}
