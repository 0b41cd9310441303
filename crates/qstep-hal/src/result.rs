//! Evaluation results.

use std::collections::BTreeMap;

use qstep_ir::QubitState;
use serde::{Deserialize, Serialize};

/// What an evaluator returns for one circuit.
///
/// Mirrors the service response `{ "measurements": {...}, "states": [...] }`.
/// Extra response fields are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    /// Bitstring outcome counts. Empty when nothing was measured.
    #[serde(default)]
    pub measurements: BTreeMap<String, u64>,
    /// One state per qubit, in qubit order.
    #[serde(default)]
    pub states: Vec<QubitState>,
}

impl Evaluation {
    /// Create an evaluation from per-qubit states.
    pub fn new(states: Vec<QubitState>) -> Self {
        Self {
            measurements: BTreeMap::new(),
            states,
        }
    }

    /// The all-|0⟩ evaluation for a register of `qubit_count` qubits.
    pub fn initial(qubit_count: u32) -> Self {
        Self::new(QubitState::initial_states(qubit_count))
    }

    /// Attach measurement counts.
    pub fn with_measurements(mut self, measurements: BTreeMap<String, u64>) -> Self {
        self.measurements = measurements;
        self
    }

    /// State reported for a qubit, if any.
    pub fn state_of(&self, qubit: u32) -> Option<&QubitState> {
        self.states.iter().find(|s| s.qubit == qubit)
    }

    /// Total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.measurements.values().sum()
    }

    /// Most frequent bitstring and its count.
    ///
    /// Ties resolve to the lexicographically smallest bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.measurements
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_response() {
        let json = r#"{
            "measurements": {"00": 510, "11": 514},
            "states": [
                {"qubit": 0, "state": {"alpha": 0.7071, "beta": 0.7071}},
                {"qubit": 1, "state": {"alpha": 0.7071, "beta": 0.7071}}
            ],
            "provider": "ibm",
            "execution_time": 1.5
        }"#;
        let eval: Evaluation = serde_json::from_str(json).unwrap();
        assert_eq!(eval.states.len(), 2);
        assert_eq!(eval.total_shots(), 1024);
        assert_eq!(eval.most_frequent(), Some(("11", 514)));
        assert!((eval.state_of(1).unwrap().amplitude_one - 0.7071).abs() < 1e-9);
    }

    #[test]
    fn test_missing_fields_default() {
        let eval: Evaluation = serde_json::from_str("{}").unwrap();
        assert!(eval.states.is_empty());
        assert!(eval.measurements.is_empty());
        assert_eq!(eval.most_frequent(), None);
    }

    #[test]
    fn test_initial() {
        let eval = Evaluation::initial(3);
        assert_eq!(eval.states.len(), 3);
        assert!(eval.states.iter().all(|s| s.amplitude_zero == 1.0));
        assert_eq!(eval.state_of(5), None);
    }

    #[test]
    fn test_most_frequent_tie() {
        let counts = BTreeMap::from([("01".to_string(), 5), ("10".to_string(), 5)]);
        let eval = Evaluation::default().with_measurements(counts);
        assert_eq!(eval.most_frequent(), Some(("01", 5)));
    }
}
