//! Result command implementation.
//!
//! Retrieve and display results for a completed job.

use anyhow::Result;
use console::style;

use bragi_hal::{Executor, JobId, JobStatus};

use super::common::{create_executor, load_config, print_results};

/// Execute the result command.
pub async fn execute(endpoint: Option<&str>, job_id: &str, format: &str) -> Result<()> {
    let config = load_config(endpoint)?;
    let executor = create_executor(&config)?;

    println!(
        "{} Fetching results for job {}",
        style("→").cyan().bold(),
        style(job_id).dim()
    );

    let snapshot = executor
        .poll(&JobId::new(job_id))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to get result: {e}"))?;

    match snapshot.status {
        JobStatus::Running => {
            anyhow::bail!("Job {job_id} has not completed yet. Use 'bragi wait {job_id}'.")
        }
        JobStatus::Failed => {
            anyhow::bail!(
                "Job {job_id} failed: {}",
                snapshot.error.as_deref().unwrap_or("no error reported")
            )
        }
        JobStatus::Done => {}
    }

    let results = snapshot.results.unwrap_or_default();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&results)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        _ => {
            print_results(&results);
        }
    }

    Ok(())
}
