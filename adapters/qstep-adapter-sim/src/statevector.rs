//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;

use qstep_ir::{Gate, GateKind, QubitState};

/// A statevector over `2^n` basis states. Bit `q` of a basis index is the
/// value of qubit `q`.
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply one gate. Measurement leaves the state untouched.
    pub fn apply(&mut self, gate: &Gate) {
        let target = gate.qubit() as usize;
        match (gate.kind(), gate.control()) {
            (GateKind::Hadamard, _) => self.apply_h(target),
            (GateKind::PauliX, _) => self.apply_x(target),
            (GateKind::ControlledNot, Some(control)) => self.apply_cx(control as usize, target),
            (GateKind::ControlledNot, None) | (GateKind::Measure, _) => {}
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    // =========================================================================
    // Readout
    // =========================================================================

    /// Probability of reading 1 on `qubit`.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Per-qubit marginal magnitudes `(sqrt(P0), sqrt(P1))`.
    pub fn qubit_states(&self) -> Vec<QubitState> {
        (0..self.num_qubits)
            .map(|q| {
                let p1 = self.probability_one(q).clamp(0.0, 1.0);
                QubitState::new(q as u32, (1.0 - p1).sqrt(), p1.sqrt())
            })
            .collect()
    }

    /// Draw one basis state.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        self.amplitudes.len() - 1
    }
}

/// Bitstring of `outcome` restricted to `qubits`, highest qubit first.
///
/// `qubits` must be sorted ascending; qubit 0 ends up rightmost.
pub fn outcome_to_bitstring(outcome: usize, qubits: &[u32]) -> String {
    qubits
        .iter()
        .rev()
        .map(|&q| if outcome >> q & 1 == 1 { '1' } else { '0' })
        .collect()
}
