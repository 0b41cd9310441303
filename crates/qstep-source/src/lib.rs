//! Source ↔ Circuit translation for qstep
//!
//! Two pure functions connect circuit scripts with the circuit model:
//! [`parse`] reads text into a [`Circuit`](qstep_ir::Circuit) and [`render`]
//! writes a circuit back out. Rendering is canonical; parsing is
//! best-effort pattern recognition over a small subset of the language.
//!
//! # Dialects
//!
//! | Dialect | Parse | Render | Example line |
//! |---------|-------|--------|--------------|
//! | [`Dialect::Qiskit`] | ✅ | ✅ | `circuit.cx(0, 1)` |
//! | [`Dialect::QSharp`] | ❌ (empty circuit) | ✅ | `CNOT(qubits[0], qubits[1]);` |
//!
//! # Recognized Qiskit lines
//!
//! | Line | Gate |
//! |------|------|
//! | `circuit.h(q)` | Hadamard on `q` |
//! | `circuit.x(q)` | Pauli-X on `q` |
//! | `circuit.cx(c, t)` | CNOT, control `c`, target `t` |
//! | `circuit.measure(q, ...)` | Measure `q` |
//!
//! `QuantumRegister(N)` anywhere in the script sets the qubit count.
//! Every other line is skipped and does not consume a step.
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use qstep_source::{Dialect, parse, render};
//!
//! let source = "qr = QuantumRegister(2)\ncircuit.h(0)\ncircuit.cx(0, 1)";
//! let circuit = parse(source, Dialect::Qiskit);
//! assert_eq!(circuit.step_count(), 2);
//!
//! let text = render(&circuit, Dialect::Qiskit);
//! assert_eq!(parse(&text, Dialect::Qiskit).gates(), circuit.gates());
//!
//! let qsharp = render(&circuit, Dialect::QSharp);
//! assert!(qsharp.contains("CNOT(qubits[0], qubits[1]);"));
//! ```

mod dialect;
mod emitter;
mod error;
mod lexer;
mod parser;

pub use dialect::Dialect;
pub use emitter::render;
pub use error::{SourceError, SourceResult};
pub use parser::{LineShape, PARSED_CIRCUIT_NAME, match_line, parse};
