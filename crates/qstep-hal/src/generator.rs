//! Circuit generation from free text.

use async_trait::async_trait;
use qstep_ir::Circuit;

use crate::error::HalResult;

/// A service that turns a prompt into a circuit.
///
/// The returned circuit is not trusted: [`generate_validated`] runs it
/// through the same validator as any other circuit.
///
/// [`generate_validated`]: CircuitGenerator::generate_validated
#[async_trait]
pub trait CircuitGenerator: Send + Sync {
    /// Name of this generator.
    fn name(&self) -> &str;

    /// Ask the service for a circuit.
    async fn generate(&self, prompt: &str) -> HalResult<Circuit>;

    /// Generate, then validate.
    async fn generate_validated(&self, prompt: &str) -> HalResult<Circuit> {
        let circuit = self.generate(prompt).await?;
        qstep_ir::validate(&circuit)?;
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HalError;
    use qstep_ir::{Gate, QuantumError};

    struct Canned(Circuit);

    #[async_trait]
    impl CircuitGenerator for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, _prompt: &str) -> HalResult<Circuit> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_valid_circuit_passes() {
        let circuit = Circuit::derive_from_gates("gen", vec![Gate::hadamard(1, 0)]).unwrap();
        let generator = Canned(circuit.clone());
        assert_eq!(generator.generate_validated("superposition").await.unwrap(), circuit);
    }

    #[tokio::test]
    async fn test_invalid_circuit_is_rejected() {
        let generator = Canned(Circuit::unchecked("gen", 1, 1, vec![Gate::pauli_x(3, 0)]));
        let err = generator.generate_validated("flip").await.unwrap_err();
        assert!(matches!(
            err,
            HalError::InvalidCircuit(QuantumError::InvalidQubit { qubit: 3, gate: 0 })
        ));
    }
}
