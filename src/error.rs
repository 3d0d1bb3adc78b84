//! Error types for kamtwist.
//!
//! The orbit generator itself is infallible. Everything at its edges
//! (configuration, figure output, the non-finite guard) returns
//! `Result<T, TwistError>`.

use thiserror::Error;

/// Result type alias for kamtwist operations.
pub type TwistResult<T> = Result<T, TwistError>;

/// Unified error type for all kamtwist operations.
#[derive(Debug, Error)]
pub enum TwistError {
    // ===== Guard Violations =====
    /// Numerical instability detected (NaN or Inf) in an orbit.
    #[error("Guard: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Figure rendering error.
    #[error("Render error: {0}")]
    Render(String),
}

impl TwistError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create a render error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Check if this error came from the non-finite guard.
    #[must_use]
    pub const fn is_guard_violation(&self) -> bool {
        matches!(self, Self::NonFiniteValue { .. })
    }
}
