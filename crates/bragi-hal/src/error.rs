//! Error types for executor operations.

use thiserror::Error;

/// Errors that can occur talking to (or acting as) an executor.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecError {
    /// No computer with the given name.
    #[error("Computer not found: {0}")]
    ComputerNotFound(String),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Job submission failed.
    #[error("Job submission failed: {0}")]
    SubmissionFailed(String),

    /// The submitted circuit cannot be executed.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Circuit exceeds the executor's capabilities.
    #[error("Circuit too large: {0}")]
    CircuitTooLarge(String),

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The executor answered with a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The executor reported a status string we do not recognize.
    #[error("Unexpected job status: {0}")]
    UnexpectedStatus(String),

    /// Timeout waiting for a job to reach a terminal state.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for executor operations.
pub type ExecResult<T> = Result<T, ExecError>;
