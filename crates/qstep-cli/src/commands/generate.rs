//! Generate command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qstep_adapter_http::HttpGenerator;
use qstep_hal::CircuitGenerator;
use qstep_source::{Dialect, render};

use super::common::{describe, load_config, spinner};

/// Execute the generate command.
pub async fn execute(
    prompt: &str,
    dialect: Dialect,
    output: Option<&str>,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config, None)?;
    let generator = HttpGenerator::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create generator: {e}"))?;

    let pb = spinner(format!("Generating circuit via {}...", config.endpoint));
    let result = generator.generate_validated(prompt).await;
    pb.finish_and_clear();
    let circuit = result.map_err(|e| anyhow::anyhow!("Generation failed: {e}"))?;

    eprintln!(
        "{} Generated {} ({})",
        style("✓").green().bold(),
        style(circuit.name()).cyan(),
        describe(&circuit)
    );

    let text = render(&circuit, dialect);
    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("Failed to write {path}"))?;
            eprintln!("  Written to {}", style(path).cyan());
        }
        None => print!("{text}"),
    }

    Ok(())
}
