//! Compile options.
//!
//! Options can be loaded from:
//! 1. A YAML file
//! 2. Environment variables (with `ANSATZ_` prefix)
//!
//! Environment variables override file values, which override defaults.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the first classical register created for measurements.
pub const DEFAULT_MEASURE_REGISTER_PREFIX: &str = "meas_reg";

/// What to do with the qubit list of a tuple-form layer token such as
/// `("ry_layer", [0, 2])`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerQubitPolicy {
    /// Ignore the list, span every qubit, and record a diagnostic.
    #[default]
    Ignore,
    /// Apply the layer only to the listed qubits.
    Honor,
    /// Fail with a configuration error.
    Reject,
}

impl FromStr for LayerQubitPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(LayerQubitPolicy::Ignore),
            "honor" => Ok(LayerQubitPolicy::Honor),
            "reject" => Ok(LayerQubitPolicy::Reject),
            other => Err(ConfigError::ValidationError(format!(
                "Invalid layer qubit policy: {other} (expected ignore, honor, or reject)"
            ))),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Console,
    /// JSON structured logging.
    Json,
}

/// Logging configuration for embedding applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Options controlling one compile call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Name given to the produced circuit.
    #[serde(default = "default_circuit_name")]
    pub circuit_name: String,

    /// Handling of qubit lists on tuple-form layer tokens.
    #[serde(default)]
    pub layer_qubits: LayerQubitPolicy,

    /// Base name for auto-provisioned measurement registers.
    #[serde(default = "default_measure_register_prefix")]
    pub measure_register_prefix: String,

    /// Logging settings, used by [`crate::logging::init_tracing`].
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_circuit_name() -> String {
    "CustomAnsatz".to_string()
}

fn default_measure_register_prefix() -> String {
    DEFAULT_MEASURE_REGISTER_PREFIX.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            circuit_name: default_circuit_name(),
            layer_qubits: LayerQubitPolicy::default(),
            measure_register_prefix: default_measure_register_prefix(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CompileOptions {
    /// Set the layer qubit policy.
    #[must_use]
    pub fn with_layer_qubits(mut self, policy: LayerQubitPolicy) -> Self {
        self.layer_qubits = policy;
        self
    }

    /// Set the circuit name.
    #[must_use]
    pub fn with_circuit_name(mut self, name: impl Into<String>) -> Self {
        self.circuit_name = name.into();
        self
    }

    /// Parse options from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let options: CompileOptions =
            serde_yaml_ng::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().merge_env()
    }

    /// Load options with the following precedence:
    /// 1. Environment variables
    /// 2. The file, if provided
    /// 3. Defaults
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let options = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        options.merge_env()
    }

    /// Apply environment overrides.
    ///
    /// Only variables that are set override the current values:
    /// `ANSATZ_CIRCUIT_NAME`, `ANSATZ_LAYER_QUBITS`, `ANSATZ_MEASURE_REGISTER`,
    /// `ANSATZ_LOG_LEVEL`, `ANSATZ_LOG_FORMAT`.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(name) = var("ANSATZ_CIRCUIT_NAME") {
            self.circuit_name = name;
        }
        if let Some(policy) = var("ANSATZ_LAYER_QUBITS") {
            self.layer_qubits = policy.parse()?;
        }
        if let Some(prefix) = var("ANSATZ_MEASURE_REGISTER") {
            self.measure_register_prefix = prefix;
        }
        if let Some(level) = var("ANSATZ_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ANSATZ_LOG_FORMAT") {
            self.logging.format = match format.as_str() {
                "json" => LogFormat::Json,
                "console" => LogFormat::Console,
                other => {
                    return Err(ConfigError::ValidationError(format!(
                        "Invalid log format: {other}"
                    )));
                }
            };
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate option values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.circuit_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "circuit_name must not be empty".to_string(),
            ));
        }

        if self.measure_register_prefix.is_empty()
            || !self
                .measure_register_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::ValidationError(format!(
                "Invalid measure register prefix: '{}'",
                self.measure_register_prefix
            )));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
