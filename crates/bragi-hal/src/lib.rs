//! Bragi Executor Abstraction Layer
//!
//! This crate defines the contract between the Bragi workbench and a
//! quantum executor service: the wire types for the three REST calls
//! (list computers, start a job, poll a job) and the [`Executor`] trait
//! that the HTTP client and the in-process service both satisfy.
//!
//! # The wire contract
//!
//! | Call | Request | Response |
//! |------|---------|----------|
//! | `GET /computers` | — | `[{name, queue_time}]` |
//! | `POST /start_job/{name}` | `{qasm, num_shots}` | `{job_id}` |
//! | `GET /job/{id}` | — | `{status, results?, error?}` |
//!
//! # Example: driving a job to completion
//!
//! ```ignore
//! use bragi_hal::{Executor, PollConfig};
//!
//! let job_id = executor.start_job("GladOs", qasm, 1).await?;
//! let snapshot = executor.wait(&job_id, PollConfig::default()).await?;
//! if let Some(results) = snapshot.results {
//!     println!("{} shots returned", results.len());
//! }
//! ```

pub mod computer;
pub mod error;
pub mod executor;
pub mod job;
pub mod result;

pub use computer::Computer;
pub use error::{ExecError, ExecResult};
pub use executor::{Executor, PollConfig};
pub use job::{Job, JobHandle, JobId, JobSnapshot, JobStatus, RunRequest};
pub use result::Counts;
