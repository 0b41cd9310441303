//! Parse command implementation.

use anyhow::Result;
use console::style;

use qstep_source::{Dialect, parse};

use super::common::{describe, is_json, read_input};

/// Execute the parse command.
pub fn execute(input: &str, format: &str) -> Result<()> {
    if is_json(input) {
        anyhow::bail!("parse reads Qiskit scripts; {input} is already a JSON circuit");
    }

    let source = read_input(input)?;
    let circuit = parse(&source, Dialect::Qiskit);
    tracing::info!("Parsed {} gates from {}", circuit.num_gates(), input);

    match format.to_lowercase().as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&circuit)?);
        }
        "summary" => {
            println!(
                "{} {} ({})",
                style("✓").green().bold(),
                style(circuit.name()).cyan(),
                describe(&circuit)
            );
            for (index, gate) in circuit.gates().iter().enumerate() {
                println!("  {:>3}  {}", style(index).dim(), gate);
            }
            if let Err(e) = qstep_ir::validate(&circuit) {
                println!("{} {}", style("!").yellow().bold(), e);
            }
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: summary, json"),
    }

    Ok(())
}
