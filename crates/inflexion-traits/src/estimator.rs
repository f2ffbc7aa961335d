//! Boundary contract toward an external Bayesian change-point estimator.
//!
//! The estimator is opaque: it receives a gap-free numeric sequence (timestamps
//! stripped) together with distributional and sampling parameters, and returns
//! an [`EstimationResult`] that Inflexion never inspects. Implementations are
//! long-running and synchronous, and must be callable from a worker thread.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{InflexionError, Result};

/// Likelihood family used by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    /// Gaussian noise.
    Normal,
    /// Heavy-tailed Student-t noise.
    StudentT,
}

impl Distribution {
    /// Canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::StudentT => "student_t",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distribution {
    type Err = InflexionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "normal" | "gaussian" => Ok(Self::Normal),
            "student_t" | "student-t" | "t" => Ok(Self::StudentT),
            other => Err(InflexionError::invalid_parameter(
                "distribution",
                format!("unknown distribution '{}'", other),
            )),
        }
    }
}

/// Caller-chosen parameters passed through to the estimator unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorParams {
    /// Noise distribution.
    pub distribution: Distribution,
    /// Seasonal period in samples; zero disables the seasonal component.
    pub seasonality: u32,
    /// Total sampler iterations.
    pub iterations: u32,
    /// Leading iterations discarded as burn-in. Must be below `iterations`.
    pub burnin: u32,
}

impl EstimatorParams {
    /// Checks the iteration constraints.
    ///
    /// # Errors
    ///
    /// Returns [`InflexionError::InvalidParameter`] if `iterations` is zero or
    /// `burnin` is not strictly less than `iterations`.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(InflexionError::invalid_parameter(
                "iterations",
                "must be at least 1",
            ));
        }
        if self.burnin >= self.iterations {
            return Err(InflexionError::invalid_parameter(
                "burnin",
                format!(
                    "must be less than iterations ({} >= {})",
                    self.burnin, self.iterations
                ),
            ));
        }
        Ok(())
    }
}

/// A single request handed to the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    /// Contiguous values in index order, timestamps stripped.
    pub values: Vec<f64>,
    /// Estimator parameters.
    #[serde(flatten)]
    pub params: EstimatorParams,
}

/// Opaque estimator output, handed to the display layer as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimationResult(serde_json::Value);

impl EstimationResult {
    /// Wraps a raw estimator document.
    pub const fn from_json(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrows the raw document.
    pub const fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consumes self and returns the raw document.
    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

/// An external Bayesian change-point estimator.
///
/// Implementations report their own failures as
/// [`InflexionError::EstimationFailed`].
pub trait ChangePointEstimator: Send + Sync {
    /// Short identifier of the backend.
    fn name(&self) -> &str;

    /// Runs the estimation. May block for a long time.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails in any way.
    fn estimate(&self, request: &EstimationRequest) -> Result<EstimationResult>;
}
