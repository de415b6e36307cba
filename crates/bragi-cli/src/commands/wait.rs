//! Wait command implementation.
//!
//! Poll a job until it reaches a terminal state, then print results.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use bragi_hal::{ExecError, Executor, JobId};

use super::common::{create_executor, load_config, print_results};

/// Execute the wait command.
pub async fn execute(endpoint: Option<&str>, job_id: &str, timeout: u64) -> Result<()> {
    let config = load_config(endpoint)?;
    let executor = create_executor(&config)?;

    println!(
        "{} Waiting for job {} (timeout: {}s)",
        style("→").cyan().bold(),
        style(job_id).dim(),
        timeout
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Waiting for job to complete...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let poll = config.poll().with_timeout(Duration::from_secs(timeout));
    let outcome = executor.wait(&JobId::new(job_id), poll).await;
    spinner.finish_and_clear();

    let snapshot = match outcome {
        Ok(snapshot) => snapshot,
        Err(ExecError::Timeout(_)) => {
            anyhow::bail!(
                "Timeout after {timeout}s. Job {job_id} is still running. Use 'bragi status {job_id}' to check later."
            );
        }
        Err(e) => return Err(anyhow::anyhow!("Failed waiting for job: {e}")),
    };

    if snapshot.status.is_done() {
        print_results(snapshot.results.as_deref().unwrap_or_default());
    } else {
        println!(
            "{} Job finished with status: {}",
            style("✗").red().bold(),
            style(snapshot.status).red()
        );
        if let Some(error) = &snapshot.error {
            println!("  Error: {}", style(error).red());
        }
    }

    Ok(())
}
