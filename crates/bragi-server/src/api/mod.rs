//! API endpoint implementations.

pub mod computers;
pub mod jobs;
