//! qstep evaluator boundary
//!
//! The core never evolves quantum state itself. It hands circuits to an
//! [`Evaluator`] and interprets what comes back. This crate defines that
//! boundary:
//!
//! - the [`Evaluator`] trait, with prefix evaluation built on top of
//!   whole-circuit evaluation
//! - the [`CircuitGenerator`] trait for prompt-to-circuit services
//! - [`Evaluation`], the per-qubit state and measurement counts returned
//! - [`HalError`] and its conversion into [`QuantumError`](qstep_ir::QuantumError)
//! - [`EvaluatorConfig`], shared by every evaluator implementation
//!
//! # Evaluators
//!
//! | Evaluator | Crate | Transport |
//! |-----------|-------|-----------|
//! | Remote simulation service | `qstep-adapter-http` | HTTP/JSON |
//! | Local statevector | `qstep-adapter-sim` | in-process |
//!
//! # Implementing an Evaluator
//!
//! ```ignore
//! use async_trait::async_trait;
//! use qstep_hal::{Evaluation, Evaluator, HalResult};
//! use qstep_ir::Circuit;
//!
//! struct Ground;
//!
//! #[async_trait]
//! impl Evaluator for Ground {
//!     fn name(&self) -> &str { "ground" }
//!
//!     async fn evaluate(&self, circuit: &Circuit) -> HalResult<Evaluation> {
//!         Ok(Evaluation::initial(circuit.qubit_count()))
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod result;

pub use config::{ConfigError, EvaluatorConfig, EvaluatorKind, PROVIDERS};
pub use error::{HalError, HalResult};
pub use evaluator::{Evaluator, simulate};
pub use generator::CircuitGenerator;
pub use result::Evaluation;
