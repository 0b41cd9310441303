//! Breakpoint-aware stepped execution for qstep
//!
//! A [`StepController`] turns a whole-circuit [`Evaluator`](qstep_hal::Evaluator)
//! into an interactive debugging session. Each step asks the evaluator for
//! the circuit prefix ending at the next step; nothing is batched, so a
//! breakpoint never depends on evaluator output the controller did not ask
//! for.
//!
//! | Operation | Idle | Running |
//! |-----------|------|---------|
//! | [`start`](StepController::start) | validate, open session | replace session |
//! | [`toggle_breakpoint`](StepController::toggle_breakpoint) | `NotRunning` | toggle |
//! | [`step`](StepController::step) | `NotRunning` | one step |
//! | [`continue_to_breakpoint`](StepController::continue_to_breakpoint) | `NotRunning` | steps until breakpoint/end/failure |
//! | [`stop`](StepController::stop) | no-op | reset to ground |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use qstep_adapter_sim::LocalEvaluator;
//! use qstep_debug::{StepController, StopReason};
//!
//! let controller = StepController::new(Arc::new(LocalEvaluator::new()));
//! controller.start(circuit)?;
//! controller.toggle_breakpoint(2)?;
//!
//! let outcome = controller.continue_to_breakpoint().await?;
//! assert_eq!(outcome.reason, StopReason::Breakpoint(2));
//! println!("{:?}", controller.snapshot().last_states);
//! ```

mod controller;
mod error;
mod session;

pub use controller::{ContinueOutcome, StepController, StepOutcome, StopReason};
pub use error::{DebugError, DebugResult};
pub use session::Snapshot;
