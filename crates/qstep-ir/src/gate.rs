//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::position::Position;

/// The closed set of gates a circuit may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard gate.
    #[serde(rename = "H")]
    Hadamard,
    /// Pauli-X gate.
    #[serde(rename = "X")]
    PauliX,
    /// Controlled-NOT; the control qubit is carried on the [`Gate`].
    #[serde(rename = "CNOT")]
    ControlledNot,
    /// Computational-basis measurement.
    #[serde(rename = "MEASURE")]
    Measure,
}

impl GateKind {
    /// Wire name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Hadamard => "H",
            GateKind::PauliX => "X",
            GateKind::ControlledNot => "CNOT",
            GateKind::Measure => "MEASURE",
        }
    }

    /// Number of qubits this gate touches.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            GateKind::Hadamard | GateKind::PauliX | GateKind::Measure => 1,
            GateKind::ControlledNot => 2,
        }
    }

    /// Whether the gate carries a control qubit.
    #[inline]
    pub fn is_controlled(self) -> bool {
        matches!(self, GateKind::ControlledNot)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A gate placed on the circuit grid.
///
/// `control` is present exactly when the kind is
/// [`GateKind::ControlledNot`], and never equals the target qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGate")]
pub struct Gate {
    #[serde(rename = "type")]
    kind: GateKind,
    position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    control: Option<u32>,
}

/// Unchecked wire form, converted through [`Gate::new`].
#[derive(Deserialize)]
struct RawGate {
    #[serde(rename = "type")]
    kind: GateKind,
    position: Position,
    #[serde(default)]
    control: Option<u32>,
}

impl TryFrom<RawGate> for Gate {
    type Error = IrError;

    fn try_from(raw: RawGate) -> IrResult<Self> {
        Gate::new(raw.kind, raw.position, raw.control)
    }
}

impl Gate {
    /// Build a gate, checking the control invariant.
    pub fn new(kind: GateKind, position: Position, control: Option<u32>) -> IrResult<Self> {
        match (kind.is_controlled(), control) {
            (true, None) => Err(IrError::MissingControl {
                kind,
                step: position.step,
            }),
            (false, Some(_)) => Err(IrError::UnexpectedControl {
                kind,
                step: position.step,
            }),
            (true, Some(c)) if c == position.qubit => Err(IrError::SelfControlled {
                qubit: c,
                step: position.step,
            }),
            _ => Ok(Self {
                kind,
                position,
                control,
            }),
        }
    }

    /// Hadamard on `qubit` at `step`.
    pub fn hadamard(qubit: u32, step: u32) -> Self {
        Self::single(GateKind::Hadamard, qubit, step)
    }

    /// Pauli-X on `qubit` at `step`.
    pub fn pauli_x(qubit: u32, step: u32) -> Self {
        Self::single(GateKind::PauliX, qubit, step)
    }

    /// Measurement of `qubit` at `step`.
    pub fn measure(qubit: u32, step: u32) -> Self {
        Self::single(GateKind::Measure, qubit, step)
    }

    /// Controlled-NOT from `control` onto `target` at `step`.
    pub fn cnot(control: u32, target: u32, step: u32) -> IrResult<Self> {
        Self::new(
            GateKind::ControlledNot,
            Position::new(target, step),
            Some(control),
        )
    }

    fn single(kind: GateKind, qubit: u32, step: u32) -> Self {
        Self {
            kind,
            position: Position::new(qubit, step),
            control: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The gate kind.
    #[inline]
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Target position.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Target qubit.
    #[inline]
    pub fn qubit(&self) -> u32 {
        self.position.qubit
    }

    /// Logical step.
    #[inline]
    pub fn step(&self) -> u32 {
        self.position.step
    }

    /// Control qubit of a controlled gate.
    #[inline]
    pub fn control(&self) -> Option<u32> {
        self.control
    }

    /// All qubits the gate touches, control first.
    pub fn qubits(&self) -> impl Iterator<Item = u32> + '_ {
        self.control.into_iter().chain(std::iter::once(self.position.qubit))
    }

    /// Highest qubit index the gate touches.
    pub fn max_qubit(&self) -> u32 {
        self.control
            .map_or(self.position.qubit, |c| c.max(self.position.qubit))
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.control {
            Some(c) => write!(f, "{} q{} -> {}", self.kind, c, self.position),
            None => write!(f, "{} {}", self.kind, self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_qubit_constructors() {
        let h = Gate::hadamard(0, 2);
        assert_eq!(h.kind(), GateKind::Hadamard);
        assert_eq!(h.position(), Position::new(0, 2));
        assert_eq!(h.control(), None);
        assert_eq!(Gate::measure(1, 0).kind().num_qubits(), 1);
    }

    #[test]
    fn test_cnot_rejects_self_control() {
        let err = Gate::cnot(1, 1, 0).unwrap_err();
        assert_eq!(err, IrError::SelfControlled { qubit: 1, step: 0 });
    }

    #[test]
    fn test_control_presence_invariant() {
        assert!(matches!(
            Gate::new(GateKind::ControlledNot, Position::new(1, 0), None),
            Err(IrError::MissingControl { .. })
        ));
        assert!(matches!(
            Gate::new(GateKind::PauliX, Position::new(1, 0), Some(0)),
            Err(IrError::UnexpectedControl { .. })
        ));
    }

    #[test]
    fn test_qubits_and_max() {
        let cx = Gate::cnot(3, 1, 0).unwrap();
        assert_eq!(cx.qubits().collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(cx.max_qubit(), 3);
        assert_eq!(Gate::pauli_x(2, 0).max_qubit(), 2);
    }

    #[test]
    fn test_wire_shape() {
        let cx = Gate::cnot(0, 1, 1).unwrap();
        let json = serde_json::to_value(cx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "CNOT", "position": {"qubit": 1, "step": 1}, "control": 0})
        );

        let h = serde_json::to_value(Gate::hadamard(0, 0)).unwrap();
        assert!(h.get("control").is_none());
    }

    #[test]
    fn test_deserialize_checks_invariant() {
        let ok: Gate =
            serde_json::from_str(r#"{"type":"H","position":{"qubit":0,"step":0},"control":null}"#)
                .unwrap();
        assert_eq!(ok, Gate::hadamard(0, 0));

        let bad = serde_json::from_str::<Gate>(
            r#"{"type":"CNOT","position":{"qubit":0,"step":0},"control":0}"#,
        );
        assert!(bad.is_err());
    }
}
