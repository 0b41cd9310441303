//! Error types for the HTTP adapter.

use qstep_hal::HalError;
use qstep_ir::QuantumError;
use thiserror::Error;

/// Result type for HTTP adapter operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors that can occur when talking to the simulation service.
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credentials were rejected.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// No token configured for an authenticated endpoint.
    #[error("Authentication required (set QSTEP_TOKEN)")]
    MissingToken,

    /// Non-success response.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Health endpoint answered with something other than healthy.
    #[error("Service unhealthy: {0}")]
    Unhealthy(String),

    /// The service returned a circuit that does not validate.
    #[error("Generated circuit rejected: {0}")]
    InvalidCircuit(#[from] QuantumError),
}

impl From<HttpError> for HalError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::AuthFailed(_) | HttpError::MissingToken => {
                HalError::AuthenticationFailed(e.to_string())
            }
            HttpError::ApiError { status, message } => HalError::RequestFailed { status, message },
            HttpError::Json(e) => HalError::Serialization(e),
            HttpError::Unhealthy(msg) => HalError::Unavailable(msg),
            HttpError::InvalidCircuit(e) => HalError::InvalidCircuit(e),
            HttpError::Http(e) => HalError::Network(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_display() {
        let err = HttpError::MissingToken;
        assert!(err.to_string().contains("QSTEP_TOKEN"));
    }

    #[test]
    fn test_api_error_display() {
        let err = HttpError::ApiError {
            status: 503,
            message: "Service Unavailable".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("Service Unavailable"));
    }

    #[test]
    fn test_api_error_to_hal_request_failed() {
        let hal: HalError = HttpError::ApiError {
            status: 500,
            message: "Internal Server Error".into(),
        }
        .into();
        assert!(matches!(
            hal,
            HalError::RequestFailed { status: 500, ref message } if message == "Internal Server Error"
        ));
    }

    #[test]
    fn test_api_error_reaches_user_as_simulation_failed() {
        let hal: HalError = HttpError::ApiError {
            status: 502,
            message: "Bad Gateway".into(),
        }
        .into();
        let user: QuantumError = hal.into();
        assert_eq!(user.to_string(), "Simulation failed: Bad Gateway");
    }

    #[test]
    fn test_missing_token_to_hal_auth() {
        let hal: HalError = HttpError::MissingToken.into();
        assert!(matches!(hal, HalError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_unhealthy_to_hal_unavailable() {
        let hal: HalError = HttpError::Unhealthy("degraded".into()).into();
        assert!(matches!(hal, HalError::Unavailable(msg) if msg == "degraded"));
    }

    #[test]
    fn test_invalid_circuit_to_hal() {
        let hal: HalError = HttpError::InvalidCircuit(QuantumError::InvalidGate { gate: 2 }).into();
        assert!(matches!(
            hal,
            HalError::InvalidCircuit(QuantumError::InvalidGate { gate: 2 })
        ));
    }

    #[test]
    fn test_json_error_to_hal_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let hal: HalError = HttpError::Json(json_err).into();
        assert!(matches!(hal, HalError::Serialization(_)));
    }
}
