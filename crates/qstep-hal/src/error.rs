//! Error types for the evaluator boundary.

use qstep_ir::QuantumError;
use thiserror::Error;

/// Errors that can occur while talking to an evaluator or generator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Evaluator service is not reachable or reports itself unhealthy.
    #[error("Evaluator not available: {0}")]
    Unavailable(String),

    /// Credentials were rejected.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The service answered with a non-success status.
    #[error("Request failed ({status}): {message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Reason phrase or service-provided detail.
        message: String,
    },

    /// Transport failure before a response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The circuit was rejected before or during evaluation.
    #[error("{0}")]
    InvalidCircuit(#[from] QuantumError),

    /// The generation service could not produce a circuit.
    #[error("Generation failed: {0}")]
    Generation(String),
}

impl HalError {
    /// Convert into the user-facing error taxonomy.
    ///
    /// A rejected status keeps its code and becomes `Simulation failed: …`;
    /// validation failures pass through unchanged; everything else becomes
    /// `Simulation error: …`.
    pub fn into_quantum(self) -> QuantumError {
        match self {
            HalError::RequestFailed { status, message } => {
                QuantumError::simulation_failed(message, Some(status))
            }
            HalError::InvalidCircuit(e) => e,
            other => QuantumError::simulation_error(other),
        }
    }
}

impl From<HalError> for QuantumError {
    fn from(e: HalError) -> Self {
        e.into_quantum()
    }
}

/// Result type for evaluator operations.
pub type HalResult<T> = Result<T, HalError>;
