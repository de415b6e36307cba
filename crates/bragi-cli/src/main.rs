//! Bragi Command-Line Workbench
//!
//! The main entry point for the Bragi CLI tool.
//!
//! ```text
//!            B R A G I
//!     QASM workbench for quantum
//!        executor services
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{computers, result, run, show, status, submit, version, wait};

/// Bragi - edit, submit and watch QASM jobs from the terminal
#[derive(Parser)]
#[command(name = "bragi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Executor endpoint (overrides config and BRAGI_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the executor's quantum computers
    Computers,

    /// Print a QASM file with syntax highlighting
    Show {
        /// Input file (QASM2)
        input: String,
    },

    /// Submit a circuit and wait for its results
    Run {
        /// Input file (QASM2); the stock Bell circuit if omitted
        #[arg(short, long)]
        input: Option<String>,

        /// Number of shots
        #[arg(short, long, default_value = "1")]
        shots: u32,

        /// Computer to use; the first listed if omitted
        #[arg(short, long)]
        computer: Option<String>,
    },

    /// Submit a circuit without waiting
    Submit {
        /// Input file (QASM2); the stock Bell circuit if omitted
        #[arg(short, long)]
        input: Option<String>,

        /// Number of shots
        #[arg(short, long, default_value = "1")]
        shots: u32,

        /// Computer to use; the first listed if omitted
        #[arg(short, long)]
        computer: Option<String>,
    },

    /// Query job status
    Status {
        /// Job ID
        job_id: String,
    },

    /// Wait for a job to complete
    Wait {
        /// Job ID
        job_id: String,

        /// Timeout in seconds
        #[arg(short, long, default_value = "600")]
        timeout: u64,
    },

    /// Retrieve results for a completed job
    Result {
        /// Job ID
        job_id: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let endpoint = cli.endpoint.as_deref();

    // Execute command
    let result = match cli.command {
        Commands::Computers => computers::execute(endpoint).await,

        Commands::Show { input } => show::execute(&input),

        Commands::Run {
            input,
            shots,
            computer,
        } => run::execute(endpoint, input.as_deref(), shots, computer.as_deref()).await,

        Commands::Submit {
            input,
            shots,
            computer,
        } => submit::execute(endpoint, input.as_deref(), shots, computer.as_deref()).await,

        Commands::Status { job_id } => status::execute(endpoint, &job_id).await,

        Commands::Wait { job_id, timeout } => wait::execute(endpoint, &job_id, timeout).await,

        Commands::Result { job_id, format } => result::execute(endpoint, &job_id, &format).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
