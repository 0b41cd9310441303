//! Evaluator backed by the remote simulation service.

use async_trait::async_trait;
use qstep_hal::{Evaluation, Evaluator, EvaluatorConfig, HalError, HalResult};
use qstep_ir::Circuit;
use tracing::{instrument, warn};

use crate::api::{ExecutionRequest, HealthResponse, SimulatorClient};
use crate::error::{HttpError, HttpResult};

/// Remote evaluator.
///
/// Circuits go to `/api/simulate` unless a hardware provider is configured,
/// in which case they go to `/api/execute`.
#[derive(Debug, Clone)]
pub struct HttpEvaluator {
    client: SimulatorClient,
    provider: Option<String>,
    shots: u32,
    backend_name: Option<String>,
}

impl HttpEvaluator {
    /// Create an evaluator for the simulator endpoint.
    pub fn new(client: SimulatorClient) -> Self {
        Self {
            client,
            provider: None,
            shots: 1024,
            backend_name: None,
        }
    }

    /// Create an evaluator from configuration.
    pub fn from_config(config: &EvaluatorConfig) -> HalResult<Self> {
        let client = SimulatorClient::from_config(config)?;
        Ok(Self {
            client,
            provider: config.provider.clone(),
            shots: config.shots,
            backend_name: config.backend_name.clone(),
        })
    }

    /// Route evaluations to a hardware provider.
    pub fn with_provider(mut self, provider: impl Into<String>, shots: u32) -> Self {
        self.provider = Some(provider.into());
        self.shots = shots;
        self
    }

    /// Configured provider, if any.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Underlying API client.
    pub fn client(&self) -> &SimulatorClient {
        &self.client
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    fn name(&self) -> &str {
        match self.provider {
            Some(_) => "http-execute",
            None => "http-simulate",
        }
    }

    #[instrument(skip(self, circuit), fields(steps = circuit.step_count()))]
    async fn evaluate(&self, circuit: &Circuit) -> HalResult<Evaluation> {
        let evaluation = match &self.provider {
            Some(provider) => {
                let request = ExecutionRequest {
                    circuit,
                    provider,
                    shots: self.shots,
                    backend_name: self.backend_name.as_deref(),
                };
                self.client.execute(&request).await?
            }
            None => self.client.simulate(circuit).await?,
        };
        Ok(evaluation)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> HalResult<()> {
        let health = self.client.health().await.map_err(|e| {
            warn!("Health check failed: {}", e);
            HalError::Unavailable(e.to_string())
        })?;
        ensure_healthy(&health).map_err(HalError::from)
    }
}

fn ensure_healthy(health: &HealthResponse) -> HttpResult<()> {
    if health.is_healthy() {
        Ok(())
    } else {
        Err(HttpError::Unhealthy(format!(
            "service status: {}",
            health.status
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use qstep_ir::{ErrorKind, Gate, QuantumError};

    fn unreachable_client() -> SimulatorClient {
        // Port 9 (discard) on loopback refuses connections.
        SimulatorClient::new(
            "http://127.0.0.1:9",
            Duration::from_secs(2),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_from_config_routes_to_provider() {
        let mut config = EvaluatorConfig::default();
        config.provider = Some("rigetti".into());
        config.shots = 100;
        let eval = HttpEvaluator::from_config(&config).unwrap();
        assert_eq!(eval.provider(), Some("rigetti"));
        assert_eq!(eval.name(), "http-execute");

        let eval = HttpEvaluator::from_config(&EvaluatorConfig::default()).unwrap();
        assert_eq!(eval.provider(), None);
        assert_eq!(eval.name(), "http-simulate");
    }

    #[tokio::test]
    async fn test_transport_failure_is_simulation_error() {
        let eval = HttpEvaluator::new(unreachable_client());
        let circuit = Circuit::derive_from_gates("one", vec![Gate::hadamard(0, 0)]).unwrap();

        let err = eval.evaluate(&circuit).await.unwrap_err();
        assert!(matches!(err, HalError::Network(_)));

        let user: QuantumError = err.into();
        assert_eq!(user.kind(), ErrorKind::Simulation);
        assert!(user.to_string().starts_with("Simulation error:"));
    }

    #[test]
    fn test_degraded_health_is_unavailable() {
        let health: HealthResponse = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        let err = ensure_healthy(&health).unwrap_err();
        assert!(matches!(err, HttpError::Unhealthy(_)));
        assert_eq!(
            HalError::from(err).to_string(),
            "Evaluator not available: service status: degraded"
        );

        let health: HealthResponse = serde_json::from_str(r#"{"status": "healthy"}"#).unwrap();
        assert!(ensure_healthy(&health).is_ok());
    }

    #[tokio::test]
    async fn test_health_unreachable() {
        let eval = HttpEvaluator::new(unreachable_client()).with_provider("ibm", 10);
        assert!(matches!(
            eval.health().await,
            Err(HalError::Unavailable(_))
        ));
    }
}
