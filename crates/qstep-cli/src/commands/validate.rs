//! Validate command implementation.

use anyhow::Result;
use console::style;

use qstep_source::{Dialect, parse};

use super::common::{is_json, read_input};

/// Execute the validate command.
///
/// JSON files are checked as untrusted values; scripts are parsed first.
pub fn execute(input: &str) -> Result<()> {
    let source = read_input(input)?;

    let verdict = if is_json(input) {
        let value: serde_json::Value = serde_json::from_str(&source)
            .map_err(|e| anyhow::anyhow!("Parse error: {e}"))?;
        qstep_ir::validate_value(&value)
    } else {
        qstep_ir::validate(&parse(&source, Dialect::Qiskit))
    };

    match verdict {
        Ok(()) => {
            println!("{} {} is valid", style("✓").green().bold(), style(input).green());
            Ok(())
        }
        Err(e) => {
            let location = e
                .gate_index()
                .map(|index| format!(" (gate {index})"))
                .unwrap_or_default();
            anyhow::bail!("{} [{}]{}", e, e.kind(), location)
        }
    }
}
