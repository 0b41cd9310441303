//! Supported textual notations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SourceError;

/// A textual circuit notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Qiskit Python scripts; parsed and rendered.
    #[default]
    #[serde(alias = "python")]
    Qiskit,
    /// Q# operations; rendered only.
    #[serde(alias = "q#")]
    QSharp,
}

impl Dialect {
    /// Whether [`crate::parse`] understands this dialect.
    pub fn is_parseable(self) -> bool {
        matches!(self, Dialect::Qiskit)
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Dialect::Qiskit => "py",
            Dialect::QSharp => "qs",
        }
    }

    /// Guess the dialect from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Some(Dialect::Qiskit),
            "qs" => Some(Dialect::QSharp),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Qiskit => write!(f, "qiskit"),
            Dialect::QSharp => write!(f, "qsharp"),
        }
    }
}

impl FromStr for Dialect {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "qiskit" | "py" => Ok(Dialect::Qiskit),
            "qsharp" | "q#" | "qs" => Ok(Dialect::QSharp),
            other => Err(SourceError::UnknownDialect(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("python".parse::<Dialect>().unwrap(), Dialect::Qiskit);
        assert_eq!("Qiskit".parse::<Dialect>().unwrap(), Dialect::Qiskit);
        assert_eq!("q#".parse::<Dialect>().unwrap(), Dialect::QSharp);
        assert!(matches!(
            "cirq".parse::<Dialect>(),
            Err(SourceError::UnknownDialect(name)) if name == "cirq"
        ));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(Dialect::from_extension("PY"), Some(Dialect::Qiskit));
        assert_eq!(Dialect::from_extension("qs"), Some(Dialect::QSharp));
        assert_eq!(Dialect::from_extension("json"), None);
        assert_eq!(Dialect::QSharp.extension(), "qs");
    }

    #[test]
    fn test_only_qiskit_parses() {
        assert!(Dialect::Qiskit.is_parseable());
        assert!(!Dialect::QSharp.is_parseable());
    }
}
