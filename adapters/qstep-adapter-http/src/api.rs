//! Simulation service REST client.
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `POST` | `/api/simulate` | circuit | `{ measurements, states }` |
//! | `POST` | `/api/execute` | `{ circuit, provider, shots, backend_name }` | `{ measurements, states, ... }` |
//! | `POST` | `/api/chat/generate` | `{ prompt }` (Bearer token) | circuit |
//! | `GET` | `/api/health` | | `{ status }` |

use std::time::Duration;

use qstep_hal::{Evaluation, EvaluatorConfig};
use qstep_ir::Circuit;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{HttpError, HttpResult};

/// User agent string for qstep requests.
const USER_AGENT: &str = concat!("qstep/", env!("CARGO_PKG_VERSION"));

/// Simulation service API client.
#[derive(Clone)]
pub struct SimulatorClient {
    /// HTTP client.
    client: Client,
    /// Service base URL, without trailing slash.
    base_url: String,
    /// Bearer token for authenticated endpoints.
    token: Option<String>,
}

impl std::fmt::Debug for SimulatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatorClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl SimulatorClient {
    /// Create a client with explicit timeouts.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> HttpResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(HttpError::Http)?;

        Ok(Self {
            client,
            base_url: String::new(),
            token: None,
        }
        .with_base_url(base_url))
    }

    /// Create a client from evaluator configuration.
    pub fn from_config(config: &EvaluatorConfig) -> HttpResult<Self> {
        let client = Self::new(
            &config.endpoint,
            Duration::from_secs(config.timeout_seconds),
            Duration::from_secs(config.connect_timeout_seconds),
        )?;
        Ok(match &config.token {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Evaluate a circuit on the service's simulator.
    #[instrument(skip(self, circuit), fields(gates = circuit.num_gates()))]
    pub async fn simulate(&self, circuit: &Circuit) -> HttpResult<Evaluation> {
        let url = self.url("/api/simulate");
        debug!("Simulating at {}", url);

        let response = self.client.post(&url).json(circuit).send().await?;

        self.handle_response(response).await
    }

    /// Execute a circuit on a hardware provider.
    #[instrument(skip(self, request), fields(provider = request.provider))]
    pub async fn execute(&self, request: &ExecutionRequest<'_>) -> HttpResult<Evaluation> {
        let url = self.url("/api/execute");
        debug!("Executing at {}", url);

        let response = self.client.post(&url).json(request).send().await?;

        self.handle_response(response).await
    }

    /// Ask the generation endpoint for a circuit.
    ///
    /// The response is read through the same structural checks as any
    /// untrusted circuit value.
    #[instrument(skip(self, prompt))]
    pub async fn generate(&self, prompt: &str) -> HttpResult<Circuit> {
        let token = self.token.as_deref().ok_or(HttpError::MissingToken)?;
        let url = self.url("/api/chat/generate");
        debug!("Generating circuit at {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&GenerateRequest { prompt })
            .send()
            .await?;

        let value: serde_json::Value = self.handle_response(response).await?;
        Ok(Circuit::from_value(value)?)
    }

    /// Query service health.
    #[instrument(skip(self))]
    pub async fn health(&self) -> HttpResult<HealthResponse> {
        let url = self.url("/api/health");
        debug!("Checking health at {}", url);

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> HttpResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.json().await?;
            Ok(body)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed with {}: {}", status, body);
            let message = error_message(status, &body);

            match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    Err(HttpError::AuthFailed(message))
                }
                _ => Err(HttpError::ApiError {
                    status: status.as_u16(),
                    message,
                }),
            }
        }
    }
}

/// Message for a failed response.
///
/// Uses the service's `detail` field when the body carries one, else the
/// status reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}

// ─── Wire types ─────────────────────────────────────────────────────

/// Body of `POST /api/execute`.
#[derive(Debug, Serialize)]
pub struct ExecutionRequest<'a> {
    pub circuit: &'a Circuit,
    pub provider: &'a str,
    pub shots: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_name: Option<&'a str>,
}

/// Body of `POST /api/chat/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// Whether the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// FastAPI-style error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use qstep_ir::Gate;

    fn client() -> SimulatorClient {
        SimulatorClient::new(
            "http://localhost:8000/",
            Duration::from_secs(5),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_trims_slash() {
        let client = client();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/simulate"), "http://localhost:8000/api/simulate");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = client().with_token("sk-very-secret");
        let debug = format!("{client:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_config() {
        let mut config = EvaluatorConfig::default();
        config.endpoint = "https://sim.example.org/".into();
        config.token = Some("t".into());
        let client = SimulatorClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://sim.example.org");
        assert!(client.token.is_some());
    }

    #[test]
    fn test_error_message_prefers_detail() {
        let msg = error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "provider offline"}"#,
        );
        assert_eq!(msg, "provider offline");
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "Internal Server Error"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, "{}"), "Not Found");
    }

    #[test]
    fn test_execution_request_wire_shape() {
        let circuit = Circuit::derive_from_gates("one", vec![Gate::hadamard(0, 0)]).unwrap();
        let request = ExecutionRequest {
            circuit: &circuit,
            provider: "ibm",
            shots: 1024,
            backend_name: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["provider"], "ibm");
        assert_eq!(json["shots"], 1024);
        assert_eq!(json["circuit"]["qubits"], 1);
        assert!(json.get("backend_name").is_none());
    }

    #[test]
    fn test_health_response() {
        let health: HealthResponse = serde_json::from_str(r#"{"status": "healthy"}"#).unwrap();
        assert!(health.is_healthy());
        let health: HealthResponse = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert!(!health.is_healthy());
    }

    #[tokio::test]
    async fn test_generate_without_token() {
        let err = client().generate("bell state").await.unwrap_err();
        assert!(matches!(err, HttpError::MissingToken));
    }
}
