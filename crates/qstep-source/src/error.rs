//! Error types for the translator.
//!
//! Parsing and rendering never fail; the only error is naming a dialect
//! that does not exist.

use thiserror::Error;

/// Errors that can occur when selecting a dialect.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// Unknown dialect name.
    #[error("Unknown dialect '{0}'. Available: python (qiskit), qsharp (q#)")]
    UnknownDialect(String),
}

/// Result type for translator operations.
pub type SourceResult<T> = Result<T, SourceError>;
