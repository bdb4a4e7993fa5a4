//! Error types for episim.
//!
//! All fallible operations return `Result<T, SimError>` instead of panicking.
//! Parameter errors are caught at construction time; numerical problems
//! surface mid-run as distinguishable instability errors rather than
//! silently producing NaN or negative populations.

use thiserror::Error;

/// Result type alias for episim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all episim operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid model parameter (non-positive population, non-positive rate).
    #[error("Parameter error: {message}")]
    Parameter {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Numerical instability detected during integration.
    #[error("Numerical instability at step {step}: {compartment} = {value:.6e}")]
    NumericalInstability {
        /// Time step index where the instability was detected.
        step: usize,
        /// Compartment that went non-finite or negative.
        compartment: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Invalid configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed trajectory record.
    #[error("Record error: {0}")]
    Record(String),
}

impl SimError {
    /// Create a parameter error with a message.
    #[must_use]
    pub fn parameter(message: impl Into<String>) -> Self {
        Self::Parameter {
            message: message.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a record error.
    #[must_use]
    pub fn record(message: impl Into<String>) -> Self {
        Self::Record(message.into())
    }

    /// Check if this error is a mid-run numerical instability.
    #[must_use]
    pub const fn is_instability(&self) -> bool {
        matches!(self, Self::NumericalInstability { .. })
    }
}
