//! Adapter between a time-indexed series and an opaque estimator.

use std::time::Instant;

use inflexion_traits::{
    ChangePointEstimator, EstimationRequest, EstimationResult, EstimatorParams, InflexionError,
    Result, TimeSeries,
};
use tracing::{debug, warn};

/// Hands a windowed series to an external estimator.
///
/// The adapter's only obligations are to supply a contiguous value sequence
/// with timestamps stripped and to forward the caller's parameters unchanged.
/// It never interprets the result.
#[derive(Debug)]
pub struct EstimatorAdapter<E> {
    backend: E,
}

impl<E: ChangePointEstimator> EstimatorAdapter<E> {
    /// Wraps a backend.
    pub const fn new(backend: E) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub const fn backend(&self) -> &E {
        &self.backend
    }

    /// Builds the request the backend will receive.
    ///
    /// # Errors
    ///
    /// Returns [`InflexionError::InvalidParameter`] if `params` does not validate.
    pub fn request(series: &TimeSeries, params: EstimatorParams) -> Result<EstimationRequest> {
        params.validate()?;
        Ok(EstimationRequest {
            values: series.values().to_vec(),
            params,
        })
    }

    /// Runs the backend on `series`. Blocks until the backend returns.
    ///
    /// # Errors
    ///
    /// Parameter errors propagate as [`InflexionError::InvalidParameter`];
    /// anything the backend reports surfaces as
    /// [`InflexionError::EstimationFailed`].
    pub fn estimate(
        &self,
        series: &TimeSeries,
        params: &EstimatorParams,
    ) -> Result<EstimationResult> {
        let request = Self::request(series, *params)?;
        debug!(
            backend = self.backend.name(),
            samples = request.values.len(),
            distribution = %params.distribution,
            seasonality = params.seasonality,
            iterations = params.iterations,
            burnin = params.burnin,
            "starting estimation"
        );

        let started = Instant::now();
        match self.backend.estimate(&request) {
            Ok(result) => {
                debug!(
                    backend = self.backend.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "estimation finished"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(backend = self.backend.name(), error = %err, "estimation failed");
                Err(match err {
                    InflexionError::EstimationFailed(_) => err,
                    other => InflexionError::EstimationFailed(other.to_string()),
                })
            }
        }
    }
}
