//! Error types for the Inflexion framework.
//!
//! This module defines the error taxonomy shared by every Inflexion crate.
//! There is no empty-series variant: a zero-length input is a valid
//! value that flows through the pipeline as zero-length outputs.

use thiserror::Error;

/// The main error type for Inflexion operations.
#[derive(Debug, Error)]
pub enum InflexionError {
    /// A range bound could not be resolved to a timestamp.
    #[error("Invalid range format: {0}")]
    InvalidRangeFormat(String),

    /// A tuning parameter is outside its valid domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Malformed or incomplete input data, raised at the loader boundary.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// A required column is missing from the input data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Two sequences that must be aligned have different lengths.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length of the reference sequence.
        expected: usize,
        /// Length of the offending sequence.
        actual: usize,
    },

    /// The external estimator reported a failure.
    #[error("Estimation failed: {0}")]
    EstimationFailed(String),

    /// A signal or preset name is not known.
    #[error("Signal not found: {0}")]
    SignalNotFound(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InflexionError {
    /// Shorthand for an [`InflexionError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for Inflexion operations.
pub type Result<T> = std::result::Result<T, InflexionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InflexionError::invalid_parameter("lag", "must be at least 1");
        assert_eq!(err.to_string(), "Invalid parameter 'lag': must be at least 1");

        let err = InflexionError::MissingColumn("Close".to_string());
        assert_eq!(err.to_string(), "Missing required column: Close");

        let err = InflexionError::LengthMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Length mismatch: expected 3, got 2");
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: InflexionError = io.into();
        assert!(matches!(err, InflexionError::Io(_)));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(InflexionError::EstimationFailed("boom".to_string()));
        assert!(err_result.is_err());
    }
}
