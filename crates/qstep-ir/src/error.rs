//! Error types for the circuit model.

use std::fmt;

use thiserror::Error;

use crate::gate::GateKind;

/// Errors raised when a circuit or gate would break a model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A controlled gate uses its target as its own control.
    #[error("Gate at step {step} is controlled by its own target qubit {qubit}")]
    SelfControlled {
        /// The qubit used as both control and target.
        qubit: u32,
        /// Step of the offending gate.
        step: u32,
    },

    /// A controlled gate was built without a control qubit.
    #[error("{kind} gate at step {step} requires a control qubit")]
    MissingControl {
        /// Kind of the gate.
        kind: GateKind,
        /// Step of the offending gate.
        step: u32,
    },

    /// A single-qubit gate was given a control qubit.
    #[error("{kind} gate at step {step} does not take a control qubit")]
    UnexpectedControl {
        /// Kind of the gate.
        kind: GateKind,
        /// Step of the offending gate.
        step: u32,
    },

    /// Target qubit outside the circuit register.
    #[error("Qubit {qubit} at gate {gate} is outside a register of {qubit_count} qubits")]
    QubitOutOfRange {
        /// The target qubit.
        qubit: u32,
        /// Index of the gate in the circuit.
        gate: usize,
        /// Register size.
        qubit_count: u32,
    },

    /// Control qubit outside the circuit register.
    #[error("Control {control} at gate {gate} is outside a register of {qubit_count} qubits")]
    ControlOutOfRange {
        /// The control qubit.
        control: u32,
        /// Index of the gate in the circuit.
        gate: usize,
        /// Register size.
        qubit_count: u32,
    },

    /// Two gates occupy the same (qubit, step) slot.
    #[error("Gate {gate} overlaps another gate on qubit {qubit} at step {step}")]
    SlotOccupied {
        /// The shared qubit.
        qubit: u32,
        /// The shared step.
        step: u32,
        /// Index of the later gate.
        gate: usize,
    },

    /// Step count disagrees with the gates.
    #[error("Circuit declares {declared} steps but its gates span {derived}")]
    StepCountMismatch {
        /// Declared step count.
        declared: u32,
        /// Step count derived from the gates.
        derived: u32,
    },

    /// A circuit needs at least one qubit.
    #[error("Circuit must have at least one qubit")]
    EmptyRegister,

    /// A gate sits at `u32::MAX`, so no count can cover it.
    #[error("Gate {gate} uses the largest representable {axis} index")]
    IndexOverflow {
        /// Index of the gate in the circuit.
        gate: usize,
        /// `"qubit"` or `"step"`.
        axis: &'static str,
    },
}

/// Result type for model construction.
pub type IrResult<T> = Result<T, IrError>;

/// Discriminant of a [`QuantumError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The circuit value is not shaped like a sequence of gates.
    Parse,
    /// A gate lacks a usable qubit position.
    InvalidGate,
    /// A gate references a qubit outside the register.
    InvalidQubit,
    /// The external evaluator failed.
    Simulation,
}

impl ErrorKind {
    /// Stable wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Parse => "PARSE_ERROR",
            ErrorKind::InvalidGate => "INVALID_GATE",
            ErrorKind::InvalidQubit => "INVALID_QUBIT",
            ErrorKind::Simulation => "SIMULATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing error taxonomy.
///
/// Every message names the gate index and/or qubit index when one applies,
/// since those are the only localization cues a consumer gets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// The circuit value is structurally malformed.
    #[error("Invalid circuit: {message}")]
    Parse {
        /// What was wrong with the shape.
        message: String,
    },

    /// A gate has no position or a non-integer qubit.
    #[error("Invalid gate at index {gate}: missing or invalid qubit position")]
    InvalidGate {
        /// Index of the gate in the circuit.
        gate: usize,
    },

    /// A gate targets a qubit outside `[0, qubits)`.
    #[error("Invalid qubit index {qubit} at gate {gate}")]
    InvalidQubit {
        /// The offending qubit index, possibly negative when read from JSON.
        qubit: i64,
        /// Index of the gate in the circuit.
        gate: usize,
    },

    /// The evaluator call failed in transport or returned a failure status.
    #[error("{message}")]
    Simulation {
        /// Human-readable message.
        message: String,
        /// HTTP status, when the failure came from a response.
        status: Option<u16>,
    },
}

impl QuantumError {
    /// A malformed circuit shape.
    pub fn parse(message: impl Into<String>) -> Self {
        QuantumError::Parse {
            message: message.into(),
        }
    }

    /// The evaluator answered with a non-success status.
    pub fn simulation_failed(status_text: impl fmt::Display, status: Option<u16>) -> Self {
        QuantumError::Simulation {
            message: format!("Simulation failed: {status_text}"),
            status,
        }
    }

    /// The evaluator could not be reached or its answer could not be read.
    pub fn simulation_error(cause: impl fmt::Display) -> Self {
        QuantumError::Simulation {
            message: format!("Simulation error: {cause}"),
            status: None,
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuantumError::Parse { .. } => ErrorKind::Parse,
            QuantumError::InvalidGate { .. } => ErrorKind::InvalidGate,
            QuantumError::InvalidQubit { .. } => ErrorKind::InvalidQubit,
            QuantumError::Simulation { .. } => ErrorKind::Simulation,
        }
    }

    /// Index of the offending gate, if the error is gate-local.
    pub fn gate_index(&self) -> Option<usize> {
        match self {
            QuantumError::InvalidGate { gate } | QuantumError::InvalidQubit { gate, .. } => {
                Some(*gate)
            }
            QuantumError::Parse { .. } | QuantumError::Simulation { .. } => None,
        }
    }
}

/// Result type for validation and evaluation.
pub type QuantumResult<T> = Result<T, QuantumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_indices() {
        assert_eq!(
            QuantumError::InvalidGate { gate: 3 }.to_string(),
            "Invalid gate at index 3: missing or invalid qubit position"
        );
        assert_eq!(
            QuantumError::InvalidQubit { qubit: 5, gate: 0 }.to_string(),
            "Invalid qubit index 5 at gate 0"
        );
        assert_eq!(
            QuantumError::parse("gates must be an array").to_string(),
            "Invalid circuit: gates must be an array"
        );
    }

    #[test]
    fn test_simulation_constructors() {
        let err = QuantumError::simulation_failed("Bad Gateway", Some(502));
        assert_eq!(err.to_string(), "Simulation failed: Bad Gateway");
        assert_eq!(err.kind(), ErrorKind::Simulation);
        assert!(matches!(err, QuantumError::Simulation { status: Some(502), .. }));

        let err = QuantumError::simulation_error("connection refused");
        assert_eq!(err.to_string(), "Simulation error: connection refused");
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(ErrorKind::Parse.as_str(), "PARSE_ERROR");
        assert_eq!(ErrorKind::InvalidGate.to_string(), "INVALID_GATE");
        assert_eq!(ErrorKind::InvalidQubit.as_str(), "INVALID_QUBIT");
        assert_eq!(ErrorKind::Simulation.as_str(), "SIMULATION_ERROR");
    }

    #[test]
    fn test_gate_index() {
        assert_eq!(QuantumError::InvalidGate { gate: 2 }.gate_index(), Some(2));
        assert_eq!(QuantumError::parse("x").gate_index(), None);
    }

    #[test]
    fn test_ir_error_display() {
        let err = IrError::SelfControlled { qubit: 1, step: 4 };
        assert!(err.to_string().contains("qubit 1"));
        let err = IrError::MissingControl {
            kind: GateKind::ControlledNot,
            step: 0,
        };
        assert!(err.to_string().starts_with("CNOT"));
    }
}
