//! The evaluator trait.
//!
//! An [`Evaluator`] turns a circuit into per-qubit state. It is stateless
//! per request: the step controller asks it to re-evaluate a growing prefix
//! on every step.
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `evaluate()` | async | yes | `HalResult<Evaluation>` |
//! | `evaluate_prefix()` | async | provided | `HalResult<Evaluation>` |
//! | `health()` | async | provided | `HalResult<()>` |

use async_trait::async_trait;
use qstep_ir::{Circuit, QuantumResult};
use tracing::debug;

use crate::error::HalResult;
use crate::result::Evaluation;

/// A whole-circuit evaluation primitive.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Name of this evaluator.
    fn name(&self) -> &str;

    /// Evaluate the full circuit.
    async fn evaluate(&self, circuit: &Circuit) -> HalResult<Evaluation>;

    /// Evaluate the circuit as of its first `step_limit` steps.
    async fn evaluate_prefix(&self, circuit: &Circuit, step_limit: u32) -> HalResult<Evaluation> {
        let prefix = circuit.prefix(step_limit);
        debug!(
            "{}: evaluating prefix of {} steps ({} gates)",
            self.name(),
            step_limit,
            prefix.num_gates()
        );
        self.evaluate(&prefix).await
    }

    /// Lightweight liveness check.
    async fn health(&self) -> HalResult<()> {
        Ok(())
    }
}

/// Validate a circuit, then evaluate it.
///
/// Validation failures are returned without contacting the evaluator.
/// Evaluator failures are converted at this boundary.
pub async fn simulate(evaluator: &dyn Evaluator, circuit: &Circuit) -> QuantumResult<Evaluation> {
    qstep_ir::validate(circuit)?;
    Ok(evaluator.evaluate(circuit).await?)
}
