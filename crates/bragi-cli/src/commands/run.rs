//! Run command implementation.
//!
//! Submit the buffer and wait for a terminal status, end to end.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use super::common::{create_workbench, load_config, load_source, print_results};

/// Execute the run command.
pub async fn execute(
    endpoint: Option<&str>,
    input: Option<&str>,
    shots: u32,
    computer: Option<&str>,
) -> Result<()> {
    let config = load_config(endpoint)?;
    let source = load_source(input)?;

    let mut workbench = create_workbench(&config)?.with_shots(shots);
    workbench.set_buffer(source);

    workbench
        .refresh_computers()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list computers: {e}"))?;

    if let Some(name) = computer {
        workbench
            .select(name)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }

    let target = workbench
        .selected()
        .ok_or_else(|| anyhow::anyhow!("Executor reported no computers"))?
        .to_string();

    println!(
        "{} Running {} on {} ({} shots)",
        style("→").cyan().bold(),
        style(input.unwrap_or("stock circuit")).green(),
        style(&target).yellow(),
        shots
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Submitting job...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let job_id = workbench
        .submit()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to submit job: {e}"))?;
    spinner.set_message(format!("Running job {job_id}..."));

    let status = workbench
        .wait(config.poll())
        .await
        .map_err(|e| anyhow::anyhow!("Failed waiting for job: {e}"))?;
    spinner.finish_and_clear();

    let job = workbench.job().expect("job tracked after submit");
    if status.is_done() {
        print_results(job.results.as_deref().unwrap_or_default());
    } else {
        println!(
            "{} Job {} failed: {}",
            style("✗").red().bold(),
            style(&job_id).dim(),
            style(job.error.as_deref().unwrap_or("no error reported")).red()
        );
    }

    Ok(())
}
