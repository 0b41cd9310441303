//! qstep Circuit Model
//!
//! This crate holds the data every other qstep crate speaks: the [`Circuit`]
//! value produced by the translator or an editor, the per-qubit
//! [`QubitState`] returned by an evaluator, the structural [`validate`]
//! pass that runs before any evaluation request is issued, and the
//! [`QuantumError`] taxonomy surfaced to users.
//!
//! # Overview
//!
//! A circuit is a flat, ordered list of [`Gate`]s. Every gate sits on a
//! [`Position`] made of a target qubit and a logical time-slot (`step`).
//! Steps are not wall-clock time; they only order gates for stepped
//! execution.
//!
//! # Example: Building a Bell Circuit
//!
//! ```rust
//! use qstep_ir::{Circuit, Gate};
//!
//! let gates = vec![
//!     Gate::hadamard(0, 0),
//!     Gate::cnot(0, 1, 1).unwrap(),
//!     Gate::measure(1, 2),
//! ];
//! let circuit = Circuit::derive_from_gates("bell", gates).unwrap();
//!
//! assert_eq!(circuit.qubit_count(), 2);
//! assert_eq!(circuit.step_count(), 3);
//! assert!(qstep_ir::validate(&circuit).is_ok());
//! ```
//!
//! # Example: Untrusted JSON
//!
//! ```rust
//! use qstep_ir::{Circuit, ErrorKind};
//!
//! let json = r#"{"gates":[{"type":"H","position":{"qubit":5,"step":0}}],
//!                "qubits":2,"steps":1,"name":"bad"}"#;
//! let err = Circuit::from_json(json).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidQubit);
//! assert_eq!(err.to_string(), "Invalid qubit index 5 at gate 0");
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Wire name | Qubits | Description |
//! |------|-----------|--------|-------------|
//! | [`GateKind::Hadamard`] | `H` | 1 | Hadamard gate |
//! | [`GateKind::PauliX`] | `X` | 1 | Pauli-X (NOT) gate |
//! | [`GateKind::ControlledNot`] | `CNOT` | 2 | Controlled-NOT, control held separately |
//! | [`GateKind::Measure`] | `MEASURE` | 1 | Computational-basis measurement |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod position;
pub mod state;
pub mod validate;

pub use circuit::Circuit;
pub use error::{ErrorKind, IrError, IrResult, QuantumError, QuantumResult};
pub use gate::{Gate, GateKind};
pub use position::Position;
pub use state::QubitState;
pub use validate::{validate, validate_value};
