//! Status command implementation.
//!
//! One status read; no polling.

use anyhow::Result;
use console::style;

use bragi_hal::{Executor, JobId, JobStatus};

use super::common::{create_executor, load_config};

/// Execute the status command.
pub async fn execute(endpoint: Option<&str>, job_id: &str) -> Result<()> {
    let config = load_config(endpoint)?;
    let executor = create_executor(&config)?;

    let snapshot = executor
        .poll(&JobId::new(job_id))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to get status: {e}"))?;

    let status_styled = match snapshot.status {
        JobStatus::Done => style("done").green().bold(),
        JobStatus::Failed => style("failed").red().bold(),
        JobStatus::Running => style("running").cyan().bold(),
    };

    println!(
        "{} Job {} status: {}",
        style("→").cyan().bold(),
        style(job_id).dim(),
        status_styled
    );

    if let Some(results) = &snapshot.results {
        println!("  Shots returned: {}", results.len());
    }
    if let Some(error) = &snapshot.error {
        println!("  Error: {}", style(error).red());
    }
    if snapshot.status.is_terminal() {
        println!("  Terminal: {}", style("yes").dim());
    }

    Ok(())
}
