//! Bragi workbench client
//!
//! Two layers over the executor wire contract:
//!
//! - [`HttpExecutor`]: a reqwest-based [`bragi_hal::Executor`] speaking
//!   the three REST calls against a running executor service.
//! - [`Workbench`]: the editing-session state container — buffer text,
//!   computer list and selection, the tracked job, and the last
//!   user-visible error.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bragi_client::{Config, HttpExecutor, Workbench};
//!
//! let config = Config::load()?;
//! let executor = Arc::new(HttpExecutor::new(&config.endpoint)?);
//! let mut workbench = Workbench::new(executor);
//!
//! workbench.refresh_computers().await?;   // default-selects the first entry
//! let job_id = workbench.submit().await?; // submits the buffer verbatim
//! workbench.wait(config.poll()).await?;
//! ```

pub mod config;
pub mod http;
pub mod workbench;

pub use config::Config;
pub use http::HttpExecutor;
pub use workbench::{DEFAULT_SHOTS, DEFAULT_SOURCE, TrackedJob, Workbench};
