//! Render command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;

use qstep_source::{Dialect, render};

use super::common::load_circuit;

/// Execute the render command.
pub fn execute(input: &str, dialect: Dialect, output: Option<&str>) -> Result<()> {
    let circuit = load_circuit(input)?;
    let text = render(&circuit, dialect);

    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("Failed to write {path}"))?;
            eprintln!(
                "{} Rendered {} as {} to {}",
                style("✓").green().bold(),
                style(input).green(),
                style(dialect).yellow(),
                style(path).cyan()
            );
        }
        None => print!("{text}"),
    }

    Ok(())
}
