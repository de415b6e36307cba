//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - QASM workbench for quantum executor services",
        style("Bragi").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  bragi-qasm    OpenQASM 2 lexer, highlighter and parser");
    println!("  bragi-hal     Executor abstraction and wire types");
    println!("  bragi-sim     Local statevector simulator");
    println!("  bragi-server  Executor service");
    println!("  bragi-client  HTTP client and workbench state");
    println!("  bragi-cli     Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/hiq-lab/bragi").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
