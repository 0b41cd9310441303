//! Shared helpers for CLI commands.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qstep_adapter_http::HttpEvaluator;
use qstep_adapter_sim::LocalEvaluator;
use qstep_hal::{Evaluator, EvaluatorConfig, EvaluatorKind};
use qstep_ir::{Circuit, QubitState};
use qstep_source::{Dialect, parse};

/// Read a file, failing with the path in the message.
pub fn read_input(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Whether `path` holds a JSON circuit rather than source text.
pub fn is_json(path: &str) -> bool {
    extension(path).eq_ignore_ascii_case("json")
}

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}

/// Load a circuit from a Qiskit script or a JSON circuit file.
///
/// JSON input is validated on load. Parsed scripts are returned as the
/// translator produced them; the caller decides when to validate.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let source = read_input(path)?;

    if is_json(path) {
        return Circuit::from_json(&source).map_err(|e| anyhow::anyhow!("Invalid circuit: {e}"));
    }

    match Dialect::from_extension(extension(path)).unwrap_or_default() {
        Dialect::Qiskit => Ok(parse(&source, Dialect::Qiskit)),
        other => anyhow::bail!("The {other} dialect can be rendered but not parsed"),
    }
}

/// Load evaluator settings, applying an optional evaluator override.
pub fn load_config(path: Option<&Path>, evaluator: Option<EvaluatorKind>) -> Result<EvaluatorConfig> {
    let mut config = EvaluatorConfig::load(path)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;
    if let Some(kind) = evaluator {
        config.evaluator = kind;
    }
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Build the evaluator named by the configuration.
pub fn build_evaluator(config: &EvaluatorConfig) -> Result<Arc<dyn Evaluator>> {
    let evaluator: Arc<dyn Evaluator> = match config.evaluator {
        EvaluatorKind::Http => Arc::new(
            HttpEvaluator::from_config(config)
                .map_err(|e| anyhow::anyhow!("Failed to create HTTP evaluator: {e}"))?,
        ),
        EvaluatorKind::Local => Arc::new(LocalEvaluator::from_config(config)),
    };
    Ok(evaluator)
}

/// Spinner on stderr; hidden when stderr is not a terminal.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// One-line description of a circuit.
pub fn describe(circuit: &Circuit) -> String {
    format!(
        "{} qubits, {} steps, {} gates",
        circuit.qubit_count(),
        circuit.step_count(),
        circuit.num_gates()
    )
}

/// Print per-qubit amplitudes and the probability of reading 1.
pub fn print_states(states: &[QubitState]) {
    println!("  {:<6} {:>9} {:>9} {:>7}", "qubit", "|0⟩", "|1⟩", "P(1)");
    for state in states {
        let p1 = state.probability_one();
        let bar = probability_bar(p1);
        println!(
            "  {:<6} {:>9.4} {:>9.4} {:>6.1}% {}",
            style(format!("q{}", state.qubit)).cyan(),
            state.amplitude_zero,
            state.amplitude_one,
            p1 * 100.0,
            style(bar).green()
        );
    }
}

/// Bar of up to `BAR_WIDTH` cells; out-of-range and NaN input is clamped.
fn probability_bar(p1: f64) -> String {
    let p1 = if p1.is_nan() { 0.0 } else { p1.clamp(0.0, 1.0) };
    "█".repeat((p1 * BAR_WIDTH as f64).round() as usize)
}

const BAR_WIDTH: usize = 20;

/// Print measurement counts, most frequent first.
pub fn print_measurements(measurements: &BTreeMap<String, u64>) {
    if measurements.is_empty() {
        return;
    }

    let total = measurements.values().sum::<u64>() as f64;
    let mut sorted: Vec<_> = measurements.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!("  Measurements ({} shots):", total as u64);
    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        println!(
            "    {}: {:>6} ({:>5.2}%)",
            style(bitstring).cyan(),
            count,
            prob
        );
    }

    if sorted.len() > 16 {
        println!("    ... and {} more outcomes", sorted.len() - 16);
    }
}
