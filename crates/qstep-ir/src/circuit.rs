//! The circuit value.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult, QuantumError, QuantumResult};
use crate::gate::Gate;
use crate::validate::validate_value;

/// A quantum circuit: an ordered gate list over a fixed qubit register.
///
/// Circuits are immutable values. Checked constructors ([`Circuit::new`],
/// [`Circuit::derive_from_gates`]) enforce the full model invariants; the
/// translator uses [`Circuit::unchecked`] because parsed text may be
/// under-specified and is only judged later by [`crate::validate`].
///
/// The serialized form uses the field names the evaluation service expects:
/// `gates`, `qubits`, `steps`, `name` and an optional `description`.
/// Deserialization runs [`validate_value`] first, so malformed JSON is
/// reported with the same error kinds as the validator. The step count is
/// always derived from the gates; a declared `steps` that disagrees is a
/// parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Circuit {
    gates: Vec<Gate>,
    #[serde(rename = "qubits")]
    qubit_count: u32,
    #[serde(rename = "steps")]
    step_count: u32,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Loosely typed shape read after the untrusted pass succeeded.
#[derive(Deserialize)]
struct RawCircuit {
    gates: Vec<serde_json::Value>,
    #[serde(default)]
    qubits: u32,
    #[serde(default)]
    steps: Option<u32>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<serde_json::Value> for Circuit {
    type Error = QuantumError;

    fn try_from(value: serde_json::Value) -> QuantumResult<Self> {
        validate_value(&value)?;

        let raw: RawCircuit =
            serde_json::from_value(value).map_err(|e| QuantumError::parse(e.to_string()))?;

        let mut gates = Vec::with_capacity(raw.gates.len());
        for (index, value) in raw.gates.into_iter().enumerate() {
            let gate: Gate = serde_json::from_value(value).map_err(|e| {
                QuantumError::parse(format!("gate at index {index} is malformed: {e}"))
            })?;
            gates.push(gate);
        }

        let step_count =
            derive_step_count(&gates).map_err(|e| QuantumError::parse(e.to_string()))?;
        if let Some(declared) = raw.steps {
            if declared != step_count {
                return Err(QuantumError::parse(
                    IrError::StepCountMismatch {
                        declared,
                        derived: step_count,
                    }
                    .to_string(),
                ));
            }
        }
        Ok(Self {
            gates,
            qubit_count: raw.qubits,
            step_count,
            name: raw.name,
            description: raw.description,
        })
    }
}

impl Circuit {
    /// Create a circuit over `qubit_count` qubits, deriving the step count.
    pub fn new(name: impl Into<String>, qubit_count: u32, gates: Vec<Gate>) -> IrResult<Self> {
        let circuit = Self {
            step_count: derive_step_count(&gates)?,
            gates,
            qubit_count,
            name: name.into(),
            description: None,
        };
        circuit.check()?;
        Ok(circuit)
    }

    /// Create a circuit sized to fit its gates.
    ///
    /// `qubit_count` is one past the highest target or control, `step_count`
    /// one past the highest step; an empty gate list yields `(1, 0)`.
    pub fn derive_from_gates(name: impl Into<String>, gates: Vec<Gate>) -> IrResult<Self> {
        let widest = gates.iter().enumerate().max_by_key(|(_, g)| g.max_qubit());
        let qubit_count = match widest {
            Some((index, gate)) => gate.max_qubit().checked_add(1).ok_or(IrError::IndexOverflow {
                gate: index,
                axis: "qubit",
            })?,
            None => 1,
        };
        Self::new(name, qubit_count, gates)
    }

    /// Create a circuit without checking invariants.
    pub fn unchecked(
        name: impl Into<String>,
        qubit_count: u32,
        step_count: u32,
        gates: Vec<Gate>,
    ) -> Self {
        Self {
            gates,
            qubit_count,
            step_count,
            name: name.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse a circuit from untrusted JSON text.
    pub fn from_json(json: &str) -> QuantumResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| QuantumError::parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build a circuit from an untrusted JSON value.
    pub fn from_value(value: serde_json::Value) -> QuantumResult<Self> {
        Self::try_from(value)
    }

    /// Check every model invariant.
    pub fn check(&self) -> IrResult<()> {
        if self.qubit_count == 0 {
            return Err(IrError::EmptyRegister);
        }

        let mut occupied = FxHashSet::default();
        for (index, gate) in self.gates.iter().enumerate() {
            if gate.qubit() >= self.qubit_count {
                return Err(IrError::QubitOutOfRange {
                    qubit: gate.qubit(),
                    gate: index,
                    qubit_count: self.qubit_count,
                });
            }
            if let Some(control) = gate.control() {
                if control >= self.qubit_count {
                    return Err(IrError::ControlOutOfRange {
                        control,
                        gate: index,
                        qubit_count: self.qubit_count,
                    });
                }
            }
            for qubit in gate.qubits() {
                if !occupied.insert((qubit, gate.step())) {
                    return Err(IrError::SlotOccupied {
                        qubit,
                        step: gate.step(),
                        gate: index,
                    });
                }
            }
        }

        let derived = derive_step_count(&self.gates)?;
        if derived != self.step_count {
            return Err(IrError::StepCountMismatch {
                declared: self.step_count,
                derived,
            });
        }
        Ok(())
    }

    /// The circuit as of its first `step_limit` steps.
    ///
    /// Gates with `step >= step_limit` are dropped and the step count is
    /// recomputed from the gates that remain, so trailing empty steps vanish.
    pub fn prefix(&self, step_limit: u32) -> Self {
        let gates: Vec<Gate> = self
            .gates
            .iter()
            .filter(|g| g.step() < step_limit)
            .copied()
            .collect();
        // Every kept step is below `step_limit`, so the count cannot overflow.
        let step_count = derive_step_count(&gates).unwrap_or(step_limit);
        Self {
            step_count,
            gates,
            qubit_count: self.qubit_count,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Gates in insertion order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Gates scheduled at `step`.
    pub fn gates_at(&self, step: u32) -> impl Iterator<Item = &Gate> {
        self.gates.iter().filter(move |g| g.step() == step)
    }

    /// Number of qubits in the register.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Number of logical steps.
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Number of gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// One past the highest step, or 0 for no gates.
fn derive_step_count(gates: &[Gate]) -> IrResult<u32> {
    let Some((index, last)) = gates.iter().enumerate().max_by_key(|(_, g)| g.step()) else {
        return Ok(0);
    };
    last.step().checked_add(1).ok_or(IrError::IndexOverflow {
        gate: index,
        axis: "step",
    })
}
