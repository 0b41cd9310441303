//! Error types for the step controller.

use qstep_ir::QuantumError;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned by step controller operations.
///
/// Evaluator failures are not errors of the operation: they are recorded
/// on the session and reported through the operation's outcome.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DebugError {
    /// The operation needs a running session.
    #[error("No debug session is running")]
    NotRunning,

    /// Another step or continue is still waiting on the evaluator.
    #[error("Session {0} already has an evaluation in flight")]
    RequestInFlight(Uuid),

    /// The circuit did not pass validation.
    #[error(transparent)]
    Invalid(#[from] QuantumError),
}

/// Result type for step controller operations.
pub type DebugResult<T> = Result<T, DebugError>;
