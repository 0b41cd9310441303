//! qstep adapter for a remote simulation service
//!
//! Implements [`Evaluator`](qstep_hal::Evaluator) and
//! [`CircuitGenerator`](qstep_hal::CircuitGenerator) over the service's
//! JSON API.
//!
//! # Configuration
//!
//! ```bash
//! export QSTEP_ENDPOINT="http://localhost:8000"
//! export QSTEP_TOKEN="..."        # only needed for generation
//! export QSTEP_PROVIDER="ibm"     # optional, routes to /api/execute
//! ```
//!
//! # Example
//!
//! ```ignore
//! use qstep_adapter_http::HttpEvaluator;
//! use qstep_hal::{Evaluator, EvaluatorConfig};
//!
//! let evaluator = HttpEvaluator::from_config(&EvaluatorConfig::from_env())?;
//! let evaluation = evaluator.evaluate_prefix(&circuit, 2).await?;
//! for state in &evaluation.states {
//!     println!("q{}: {:.3} {:.3}", state.qubit, state.amplitude_zero, state.amplitude_one);
//! }
//! ```

mod api;
mod error;
mod evaluator;
mod generator;

pub use api::{ExecutionRequest, HealthResponse, SimulatorClient};
pub use error::{HttpError, HttpResult};
pub use evaluator::HttpEvaluator;
pub use generator::HttpGenerator;
