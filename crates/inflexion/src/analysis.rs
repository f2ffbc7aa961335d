//! Analysis mode selection.
//!
//! The two modes have separate contracts and never share code paths: the
//! classic mode is a pure synchronous computation, the Bayesian mode is a
//! delegated call that runs off the caller's thread.

use std::sync::Arc;
use std::time::Duration;

use inflexion_detect::{ChangePointDetector, Detection, DetectorConfig};
use inflexion_estimator::{EstimatorAdapter, spawn_estimate};
use inflexion_traits::{
    ChangePointEstimator, EstimationResult, EstimatorParams, InflexionError, Result, TimeSeries,
};
use serde::{Deserialize, Serialize};

/// Which analysis to run, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Analysis {
    /// Rule-based momentum/reversion detection.
    Classic(DetectorConfig),
    /// Delegation to the external Bayesian estimator.
    Bayesian(EstimatorParams),
}

impl Analysis {
    /// Short name of the mode.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Classic(_) => "classic",
            Self::Bayesian(_) => "bayesian",
        }
    }

    /// Runs the classic detector directly on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`InflexionError::InvalidParameter`] for a bad detector
    /// configuration, or when called on a Bayesian analysis.
    pub fn detect(&self, series: &TimeSeries) -> Result<Detection> {
        match self {
            Self::Classic(config) => ChangePointDetector::new(*config)?.analyze(series),
            Self::Bayesian(_) => Err(InflexionError::invalid_parameter(
                "mode",
                "bayesian analysis requires an estimator; use Analyzer::run",
            )),
        }
    }
}

/// Output of an [`Analysis`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "result", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Classic mode output.
    Classic(Detection),
    /// Bayesian mode output, uninterpreted.
    Bayesian(EstimationResult),
}

/// Runs either analysis mode against a configured estimator.
#[derive(Debug)]
pub struct Analyzer<E> {
    estimator: Arc<EstimatorAdapter<E>>,
    timeout: Option<Duration>,
}

impl<E: ChangePointEstimator + 'static> Analyzer<E> {
    /// An analyzer delegating Bayesian runs to `estimator`.
    pub fn new(estimator: E) -> Self {
        Self {
            estimator: Arc::new(EstimatorAdapter::new(estimator)),
            timeout: None,
        }
    }

    /// Stops waiting for a Bayesian result after `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The estimator adapter.
    pub fn estimator(&self) -> &EstimatorAdapter<E> {
        &self.estimator
    }

    /// Runs `analysis` on `series`.
    ///
    /// Classic runs complete inline. Bayesian runs are moved to a blocking
    /// worker and awaited, so the calling task stays responsive.
    ///
    /// # Errors
    ///
    /// Propagates detector parameter errors and estimator failures.
    pub async fn run(&self, analysis: &Analysis, series: &TimeSeries) -> Result<AnalysisOutcome> {
        match analysis {
            Analysis::Classic(_) => analysis.detect(series).map(AnalysisOutcome::Classic),
            Analysis::Bayesian(params) => {
                self.estimate(params, series).await.map(AnalysisOutcome::Bayesian)
            }
        }
    }

    /// Runs the external estimator on `series` with `params`.
    ///
    /// The backend runs on a blocking worker; the configured timeout, if any,
    /// bounds how long this call waits for it.
    ///
    /// # Errors
    ///
    /// Returns [`InflexionError::InvalidParameter`] for bad parameters and
    /// [`InflexionError::EstimationFailed`] for backend failures or a missed
    /// deadline.
    pub async fn estimate(
        &self,
        params: &EstimatorParams,
        series: &TimeSeries,
    ) -> Result<EstimationResult> {
        let task = spawn_estimate(Arc::clone(&self.estimator), series.clone(), *params);
        match self.timeout {
            Some(timeout) => task.wait_timeout(timeout).await,
            None => task.wait().await,
        }
    }
}
