//! Per-qubit state reported by an evaluator.

use serde::{Deserialize, Serialize};

/// Amplitudes of one qubit.
///
/// No normalization is enforced; the evaluator is the source of truth.
/// On the wire this is `{"qubit": n, "state": {"alpha": a, "beta": b}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireState", into = "WireState")]
pub struct QubitState {
    /// Qubit index.
    pub qubit: u32,
    /// Amplitude of |0⟩.
    pub amplitude_zero: f64,
    /// Amplitude of |1⟩.
    pub amplitude_one: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct WireState {
    qubit: u32,
    state: WireAmplitudes,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct WireAmplitudes {
    alpha: f64,
    beta: f64,
}

impl From<WireState> for QubitState {
    fn from(w: WireState) -> Self {
        QubitState {
            qubit: w.qubit,
            amplitude_zero: w.state.alpha,
            amplitude_one: w.state.beta,
        }
    }
}

impl From<QubitState> for WireState {
    fn from(s: QubitState) -> Self {
        WireState {
            qubit: s.qubit,
            state: WireAmplitudes {
                alpha: s.amplitude_zero,
                beta: s.amplitude_one,
            },
        }
    }
}

impl QubitState {
    /// Create a state from raw amplitudes.
    pub fn new(qubit: u32, amplitude_zero: f64, amplitude_one: f64) -> Self {
        Self {
            qubit,
            amplitude_zero,
            amplitude_one,
        }
    }

    /// The |0⟩ state of `qubit`.
    pub fn ground(qubit: u32) -> Self {
        Self::new(qubit, 1.0, 0.0)
    }

    /// |0…0⟩ for a register of `qubit_count` qubits.
    pub fn initial_states(qubit_count: u32) -> Vec<Self> {
        (0..qubit_count).map(Self::ground).collect()
    }

    /// Probability of reading 1, from the squared amplitude.
    pub fn probability_one(&self) -> f64 {
        self.amplitude_one * self.amplitude_one
    }
}
