//! Evaluator configuration.
//!
//! Loaded from a YAML file, then overridden by `QSTEP_*` environment
//! variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `QSTEP_EVALUATOR` | `evaluator` (`http` or `local`) |
//! | `QSTEP_ENDPOINT` | `endpoint` |
//! | `QSTEP_TOKEN` | `token` |
//! | `QSTEP_TIMEOUT` | `timeout_seconds` |
//! | `QSTEP_PROVIDER` | `provider` |
//! | `QSTEP_SHOTS` | `shots` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Providers accepted by the execution endpoint.
pub const PROVIDERS: &[&str] = &["ibm", "rigetti", "google", "microsoft"];

/// Which evaluator to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    /// Remote simulation service over HTTP.
    #[default]
    Http,
    /// In-process statevector simulator.
    Local,
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Http => write!(f, "http"),
            EvaluatorKind::Local => write!(f, "local"),
        }
    }
}

impl FromStr for EvaluatorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" | "remote" => Ok(EvaluatorKind::Http),
            "local" | "sim" => Ok(EvaluatorKind::Local),
            other => Err(ConfigError::ValidationError(format!(
                "Unknown evaluator: {other}"
            ))),
        }
    }
}

/// Evaluator and generation service settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Evaluator kind.
    #[serde(default)]
    pub evaluator: EvaluatorKind,

    /// Base URL of the simulation service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token for the generation endpoint.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Hardware provider. When set, circuits go to the execution endpoint.
    #[serde(default)]
    pub provider: Option<String>,

    /// Shots per execution.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Provider backend name.
    #[serde(default)]
    pub backend_name: Option<String>,

    /// Largest register the local evaluator accepts.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,
}

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_shots() -> u32 {
    1024
}

fn default_max_qubits() -> u32 {
    20
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            evaluator: EvaluatorKind::default(),
            endpoint: default_endpoint(),
            token: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            provider: None,
            shots: default_shots(),
            backend_name: None,
            max_qubits: default_max_qubits(),
        }
    }
}

impl fmt::Debug for EvaluatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluatorConfig")
            .field("evaluator", &self.evaluator)
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("provider", &self.provider)
            .field("shots", &self.shots)
            .field("backend_name", &self.backend_name)
            .field("max_qubits", &self.max_qubits)
            .finish()
    }
}

impl EvaluatorConfig {
    /// Default config file location, `~/.qstep/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".qstep").join("config.yaml"))
    }

    /// Parse a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config = Self::from_yaml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Load the effective configuration.
    ///
    /// Reads `path` if given, else the default file if it exists, else the
    /// defaults; then applies environment overrides and validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!("Loading config from {}", path.display());
                    Self::from_file(path)?
                }
                None => Self::default(),
            },
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `QSTEP_*` environment overrides.
    pub fn merge_env(self) -> Self {
        self.merge_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unset variables leave fields unchanged; unparsable numbers are ignored.
    pub fn merge_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QSTEP_EVALUATOR") {
            if let Ok(kind) = v.parse() {
                self.evaluator = kind;
            }
        }
        if let Some(v) = lookup("QSTEP_ENDPOINT") {
            self.endpoint = v;
        }
        if let Some(v) = lookup("QSTEP_TOKEN") {
            self.token = Some(v);
        }
        if let Some(v) = lookup("QSTEP_TIMEOUT") {
            if let Ok(val) = v.parse() {
                self.timeout_seconds = val;
            }
        }
        if let Some(v) = lookup("QSTEP_PROVIDER") {
            self.provider = Some(v);
        }
        if let Some(v) = lookup("QSTEP_SHOTS") {
            if let Ok(val) = v.parse() {
                self.shots = val;
            }
        }
        self
    }

    /// Check the configuration for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "Endpoint must be an http(s) URL: {}",
                self.endpoint
            )));
        }

        if self.timeout_seconds == 0 || self.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Timeouts must be greater than zero".to_string(),
            ));
        }

        if self.shots == 0 {
            return Err(ConfigError::ValidationError(
                "Shots must be greater than zero".to_string(),
            ));
        }

        if let Some(provider) = &self.provider {
            if !PROVIDERS.contains(&provider.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown provider: {provider} (expected one of {})",
                    PROVIDERS.join(", ")
                )));
            }
        }

        if self.max_qubits == 0 || self.max_qubits > 30 {
            return Err(ConfigError::ValidationError(format!(
                "max_qubits must be in 1..=30, got {}",
                self.max_qubits
            )));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    IoError(String),

    /// The config file is not valid YAML for this schema.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A value is out of range or inconsistent.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
