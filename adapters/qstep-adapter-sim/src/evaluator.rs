//! In-process evaluator.

use std::collections::BTreeMap;
use std::time::Instant;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use qstep_hal::{Evaluation, Evaluator, EvaluatorConfig, HalError, HalResult};
use qstep_ir::{Circuit, GateKind, QuantumError};

use crate::statevector::{Statevector, outcome_to_bitstring};

/// Local statevector evaluator.
///
/// Exact per-qubit marginals; measurement counts are sampled. Limited to
/// `max_qubits` (default 20) by memory.
#[derive(Debug, Clone)]
pub struct LocalEvaluator {
    max_qubits: u32,
    shots: u32,
    seed: Option<u64>,
}

impl LocalEvaluator {
    /// Create an evaluator with default settings.
    pub fn new() -> Self {
        Self {
            max_qubits: 20,
            shots: 1024,
            seed: None,
        }
    }

    /// Create an evaluator from configuration.
    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self {
            max_qubits: config.max_qubits,
            shots: config.shots,
            seed: None,
        }
    }

    /// Limit the register size.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the number of measurement samples.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Make sampling reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn check(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.qubit_count() > self.max_qubits {
            return Err(HalError::InvalidCircuit(QuantumError::parse(format!(
                "{} qubits exceed the local simulator limit of {}",
                circuit.qubit_count(),
                self.max_qubits
            ))));
        }
        qstep_ir::validate(circuit)?;
        for (index, gate) in circuit.gates().iter().enumerate() {
            if let Some(control) = gate.control() {
                if control >= circuit.qubit_count() {
                    return Err(HalError::InvalidCircuit(QuantumError::InvalidQubit {
                        qubit: i64::from(control),
                        gate: index,
                    }));
                }
            }
        }
        Ok(())
    }

    /// Run the simulation synchronously.
    #[instrument(skip(self, circuit))]
    fn run_simulation(&self, circuit: &Circuit) -> Evaluation {
        let start = Instant::now();
        let num_qubits = circuit.qubit_count() as usize;

        let mut order: Vec<usize> = (0..circuit.num_gates()).collect();
        order.sort_by_key(|&i| circuit.gates()[i].step());

        let mut sv = Statevector::new(num_qubits);
        let mut measured = Vec::new();
        for &i in &order {
            let gate = &circuit.gates()[i];
            if gate.kind() == GateKind::Measure {
                measured.push(gate.qubit());
            }
            sv.apply(gate);
        }
        measured.sort_unstable();
        measured.dedup();

        let mut counts = BTreeMap::new();
        if !measured.is_empty() {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            for _ in 0..self.shots {
                let outcome = sv.sample(&mut rng);
                *counts
                    .entry(outcome_to_bitstring(outcome, &measured))
                    .or_insert(0) += 1;
            }
        }

        debug!(
            "Simulated {} gates on {} qubits in {:?}",
            order.len(),
            num_qubits,
            start.elapsed()
        );

        Evaluation::new(sv.qubit_states()).with_measurements(counts)
    }
}

impl Default for LocalEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Evaluator for LocalEvaluator {
    fn name(&self) -> &str {
        "local"
    }

    async fn evaluate(&self, circuit: &Circuit) -> HalResult<Evaluation> {
        self.check(circuit)?;
        Ok(self.run_simulation(circuit))
    }
}
