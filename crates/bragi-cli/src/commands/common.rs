//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;

use bragi_client::{Config, DEFAULT_SOURCE, HttpExecutor, Workbench};
use bragi_hal::Counts;

/// Load the workbench configuration, with an optional endpoint override
/// from the command line.
pub fn load_config(endpoint: Option<&str>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint.to_string();
    }
    tracing::debug!("using executor endpoint {}", config.endpoint);
    Ok(config)
}

/// Build a workbench session against the configured executor.
pub fn create_workbench(config: &Config) -> Result<Workbench> {
    let executor = Arc::new(HttpExecutor::new(&config.endpoint)?);
    Ok(Workbench::new(executor))
}

/// Build a bare executor client (for job-id based commands).
pub fn create_executor(config: &Config) -> Result<HttpExecutor> {
    Ok(HttpExecutor::new(&config.endpoint)?)
}

/// Load circuit source from a file, or the stock circuit when omitted.
pub fn load_source(input: Option<&str>) -> Result<String> {
    match input {
        Some(path) => {
            if !Path::new(path).exists() {
                anyhow::bail!("File not found: {path}");
            }
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => Ok(DEFAULT_SOURCE.to_string()),
    }
}

/// Print per-shot results as a histogram (shared by run, result, wait).
pub fn print_results(results: &[String]) {
    let counts = Counts::from_shots(results);

    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        results.len()
    );

    let sorted = counts.sorted();
    let total = counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_source_defaults_to_stock_circuit() {
        let source = load_source(None).unwrap();
        assert_eq!(source, DEFAULT_SOURCE);
    }

    #[test]
    fn test_load_source_missing_file() {
        let err = load_source(Some("/definitely/not/here.qasm")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_load_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("circuit.qasm");
        fs::write(&path, "OPENQASM 2.0;\nqreg q[1];\n").unwrap();

        let source = load_source(Some(path.to_str().unwrap())).unwrap();
        assert!(source.starts_with("OPENQASM 2.0;"));
    }
}
