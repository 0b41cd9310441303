//! Simulate command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qstep_hal::EvaluatorKind;

use super::common::{
    build_evaluator, describe, load_circuit, load_config, print_measurements, print_states, spinner,
};

/// Execute the simulate command.
pub async fn execute(
    input: &str,
    config: Option<&Path>,
    evaluator: Option<EvaluatorKind>,
) -> Result<()> {
    let config = load_config(config, evaluator)?;
    let evaluator = build_evaluator(&config)?;
    let circuit = load_circuit(input)?;

    println!(
        "{} Simulating {} on {} ({})",
        style("→").cyan().bold(),
        style(input).green(),
        style(evaluator.name()).yellow(),
        describe(&circuit)
    );

    let pb = spinner("Waiting for evaluator...");
    let result = qstep_hal::simulate(evaluator.as_ref(), &circuit).await;
    pb.finish_and_clear();
    let evaluation = result?;

    println!("{} Evaluation complete", style("✓").green().bold());
    print_states(&evaluation.states);
    print_measurements(&evaluation.measurements);

    Ok(())
}
