//! Submit command implementation.
//!
//! Fire-and-forget submission; pair with `bragi wait` or `bragi status`.

use anyhow::Result;
use console::style;

use super::common::{create_workbench, load_config, load_source};

/// Execute the submit command.
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

    let job_id = workbench
        .submit()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to submit job: {e}"))?;

    println!(
        "{} Submitted to {} ({} shots)",
        style("→").cyan().bold(),
        style(&target).yellow(),
        shots
    );
    println!("  Job ID: {}", style(&job_id).bold());
    println!("  Check progress with: bragi wait {job_id}");

    Ok(())
}
