//! Computers command implementation.

use anyhow::Result;
use console::style;

use super::common::{create_workbench, load_config};

/// Execute the computers command.
pub async fn execute(endpoint: Option<&str>) -> Result<()> {
    let config = load_config(endpoint)?;
    let mut workbench = create_workbench(&config)?;

    let computers = workbench
        .refresh_computers()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list computers: {e}"))?
        .to_vec();

    println!(
        "{} {} computer(s) at {}:\n",
        style("Bragi").cyan().bold(),
        computers.len(),
        style(&config.endpoint).dim()
    );

    for computer in &computers {
        let default_marker = if workbench.selected() == Some(computer.name.as_str()) {
            style(" (default)").dim().to_string()
        } else {
            String::new()
        };

        println!(
            "  {} {:<12} queue ~{}s{}",
            style("●").green(),
            style(&computer.name).bold(),
            computer.queue_time,
            default_marker
        );
    }

    Ok(())
}
