//! Circuit generator backed by the service's chat endpoint.

use async_trait::async_trait;
use qstep_hal::{CircuitGenerator, EvaluatorConfig, HalError, HalResult};
use qstep_ir::Circuit;
use tracing::{info, instrument};

use crate::api::SimulatorClient;
use crate::error::HttpError;

/// Prompt-to-circuit generator.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: SimulatorClient,
}

impl HttpGenerator {
    /// Create a generator using an existing client.
    pub fn new(client: SimulatorClient) -> Self {
        Self { client }
    }

    /// Create a generator from configuration.
    pub fn from_config(config: &EvaluatorConfig) -> HalResult<Self> {
        Ok(Self::new(SimulatorClient::from_config(config)?))
    }
}

#[async_trait]
impl CircuitGenerator for HttpGenerator {
    fn name(&self) -> &str {
        "http-generate"
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> HalResult<Circuit> {
        let circuit = self.client.generate(prompt).await.map_err(|e| match e {
            HttpError::ApiError { status, message } => {
                HalError::Generation(format!("{message} ({status})"))
            }
            other => HalError::from(other),
        })?;
        info!(
            "Generated circuit '{}' with {} gates",
            circuit.name(),
            circuit.num_gates()
        );
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_is_auth_failure() {
        let generator = HttpGenerator::from_config(&EvaluatorConfig::default()).unwrap();
        let err = generator.generate_validated("bell pair").await.unwrap_err();
        assert!(matches!(err, HalError::AuthenticationFailed(_)));
        assert_eq!(generator.name(), "http-generate");
    }
}
