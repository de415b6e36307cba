//! Show command implementation.
//!
//! Print a QASM file with the workbench's display categories rendered as
//! terminal colors.

use anyhow::Result;
use console::{Style, style};

use bragi_qasm::{Category, highlight};

use super::common::load_source;

fn style_for(category: Category) -> Style {
    match category {
        Category::Keyword => Style::new().cyan().bold(),
        Category::Atom => Style::new().magenta(),
        Category::Operator => Style::new().yellow(),
        Category::Bracket => Style::new().white().bold(),
        Category::Comment => Style::new().dim(),
        Category::String => Style::new().green(),
        Category::Number => Style::new().yellow(),
    }
}

/// Execute the show command.
pub fn execute(input: &str) -> Result<()> {
    let source = load_source(Some(input))?;

    println!("{} {}\n", style("→").cyan().bold(), style(input).green());

    // Walk the span list, printing the uncategorized gaps verbatim.
    let mut cursor = 0;
    for span in highlight(&source) {
        print!("{}", &source[cursor..span.span.start]);
        let text = &source[span.span.clone()];
        match span.category {
            Some(category) => print!("{}", style_for(category).apply_to(text)),
            None => print!("{text}"),
        }
        cursor = span.span.end;
    }
    println!("{}", &source[cursor..]);

    Ok(())
}
