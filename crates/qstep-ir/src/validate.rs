//! Structural validation run before any evaluation request.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. `gates` is present and is an array (`PARSE_ERROR`).
//! 2. Gate `i` has a `position` whose `qubit` is an integer (`INVALID_GATE`).
//! 3. Gate `i` targets a qubit in `[0, qubits)` (`INVALID_QUBIT`).
//!
//! Control qubits are not inspected here. That bar belongs to the model
//! invariants in [`Circuit::check`](crate::Circuit::check).

use serde_json::Value;

use crate::circuit::Circuit;
use crate::error::{QuantumError, QuantumResult};

/// Validate a typed circuit.
///
/// Check 1 and check 2 hold by construction for a [`Circuit`], so only the
/// range check can fail.
pub fn validate(circuit: &Circuit) -> QuantumResult<()> {
    let qubit_count = circuit.qubit_count();
    for (index, gate) in circuit.gates().iter().enumerate() {
        if gate.qubit() >= qubit_count {
            return Err(QuantumError::InvalidQubit {
                qubit: i64::from(gate.qubit()),
                gate: index,
            });
        }
    }
    Ok(())
}

/// Validate an untrusted JSON circuit value.
///
/// A missing or non-integer `qubits` field counts as zero qubits.
pub fn validate_value(value: &Value) -> QuantumResult<()> {
    let gates = value
        .get("gates")
        .and_then(Value::as_array)
        .ok_or_else(|| QuantumError::parse("gates must be an array"))?;

    let qubit_count = value.get("qubits").and_then(Value::as_i64).unwrap_or(0);

    for (index, gate) in gates.iter().enumerate() {
        let qubit = gate
            .get("position")
            .filter(|p| p.is_object())
            .and_then(|p| p.get("qubit"))
            .and_then(Value::as_i64)
            .ok_or(QuantumError::InvalidGate { gate: index })?;

        if qubit < 0 || qubit >= qubit_count {
            return Err(QuantumError::InvalidQubit { qubit, gate: index });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::gate::Gate;
    use serde_json::json;

    #[test]
    fn test_valid_circuit() {
        let circuit = Circuit::new(
            "ok",
            2,
            vec![Gate::hadamard(0, 0), Gate::cnot(0, 1, 1).unwrap()],
        )
        .unwrap();
        assert!(validate(&circuit).is_ok());
    }

    #[test]
    fn test_typed_out_of_range() {
        let circuit = Circuit::unchecked("bad", 2, 1, vec![Gate::hadamard(5, 0)]);
        let err = validate(&circuit).unwrap_err();
        assert_eq!(err, QuantumError::InvalidQubit { qubit: 5, gate: 0 });
        assert_eq!(err.to_string(), "Invalid qubit index 5 at gate 0");
    }

    #[test]
    fn test_typed_zero_qubits_fails_first_gate() {
        let circuit = Circuit::unchecked("parsed", 0, 2, vec![Gate::hadamard(0, 0), Gate::pauli_x(1, 1)]);
        assert_eq!(
            validate(&circuit),
            Err(QuantumError::InvalidQubit { qubit: 0, gate: 0 })
        );
    }

    #[test]
    fn test_typed_ignores_control_range() {
        let circuit = Circuit::unchecked("c", 2, 1, vec![Gate::cnot(7, 1, 0).unwrap()]);
        assert!(validate(&circuit).is_ok());
    }

    #[test]
    fn test_value_missing_gates() {
        let err = validate_value(&json!({"qubits": 2, "steps": 2, "name": "x"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.to_string(), "Invalid circuit: gates must be an array");

        let err = validate_value(&json!({"gates": {"0": 1}, "qubits": 2})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = validate_value(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_value_missing_position() {
        let err = validate_value(&json!({"gates": [{"type": "H"}], "qubits": 2})).unwrap_err();
        assert_eq!(err, QuantumError::InvalidGate { gate: 0 });
        assert_eq!(
            err.to_string(),
            "Invalid gate at index 0: missing or invalid qubit position"
        );
    }

    #[test]
    fn test_value_non_integer_qubit() {
        let circuit = json!({
            "gates": [
                {"type": "H", "position": {"qubit": 0, "step": 0}},
                {"type": "X", "position": {"qubit": "one", "step": 1}}
            ],
            "qubits": 2
        });
        assert_eq!(
            validate_value(&circuit),
            Err(QuantumError::InvalidGate { gate: 1 })
        );

        let circuit = json!({"gates": [{"type": "X", "position": {"qubit": 0.5}}], "qubits": 2});
        assert_eq!(
            validate_value(&circuit),
            Err(QuantumError::InvalidGate { gate: 0 })
        );
    }

    #[test]
    fn test_value_out_of_range() {
        let circuit = json!({
            "gates": [{"type": "H", "position": {"qubit": 5, "step": 0}}],
            "qubits": 2
        });
        assert_eq!(
            validate_value(&circuit),
            Err(QuantumError::InvalidQubit { qubit: 5, gate: 0 })
        );

        let circuit = json!({
            "gates": [{"type": "H", "position": {"qubit": -1, "step": 0}}],
            "qubits": 2
        });
        assert_eq!(
            validate_value(&circuit),
            Err(QuantumError::InvalidQubit { qubit: -1, gate: 0 })
        );
    }

    #[test]
    fn test_value_first_failure_wins() {
        let circuit = json!({
            "gates": [
                {"type": "H", "position": {"qubit": 9, "step": 0}},
                {"type": "H"}
            ],
            "qubits": 2
        });
        assert_eq!(
            validate_value(&circuit),
            Err(QuantumError::InvalidQubit { qubit: 9, gate: 0 })
        );
    }

    #[test]
    fn test_value_ignores_control() {
        let circuit = json!({
            "gates": [{"type": "CNOT", "position": {"qubit": 1, "step": 0}, "control": 12}],
            "qubits": 2
        });
        assert!(validate_value(&circuit).is_ok());
    }
}
