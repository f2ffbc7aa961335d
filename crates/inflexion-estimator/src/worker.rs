//! Off-thread estimation with a one-shot completion signal.

use std::sync::Arc;
use std::time::Duration;

use inflexion_traits::{
    ChangePointEstimator, EstimationResult, EstimatorParams, InflexionError, Result, TimeSeries,
};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::debug;

use crate::EstimatorAdapter;

/// Pending result of an estimation running on a blocking worker thread.
///
/// The result is delivered exactly once. Dropping the task, or giving up on
/// it through [`wait_timeout`](Self::wait_timeout), abandons the result but
/// does not interrupt the backend; use the backend's own timeout for that.
#[derive(Debug)]
pub struct EstimationTask {
    receiver: oneshot::Receiver<Result<EstimationResult>>,
}

impl EstimationTask {
    /// Waits for the result.
    ///
    /// # Errors
    ///
    /// Returns the estimation error, or [`InflexionError::EstimationFailed`]
    /// if the worker stopped without producing a result.
    pub async fn wait(self) -> Result<EstimationResult> {
        self.receiver.await.map_err(|_| {
            InflexionError::EstimationFailed(
                "estimation worker stopped without a result".to_string(),
            )
        })?
    }

    /// Waits for the result for at most `timeout`.
    ///
    /// # Errors
    ///
    /// As [`wait`](Self::wait), plus [`InflexionError::EstimationFailed`] when
    /// the deadline passes first.
    pub async fn wait_timeout(self, timeout: Duration) -> Result<EstimationResult> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| {
                InflexionError::EstimationFailed(format!("no result within {:?}", timeout))
            })?
    }

    /// Takes the result if it is ready, without waiting.
    ///
    /// Returns `None` while the estimation is still running.
    pub fn try_take(&mut self) -> Option<Result<EstimationResult>> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(InflexionError::EstimationFailed(
                "estimation worker stopped without a result".to_string(),
            ))),
        }
    }
}

/// Starts an estimation on tokio's blocking thread pool.
///
/// Must be called from within a tokio runtime. The series is moved to the
/// worker, so the caller's thread never blocks on the backend.
pub fn spawn_estimate<E>(
    adapter: Arc<EstimatorAdapter<E>>,
    series: TimeSeries,
    params: EstimatorParams,
) -> EstimationTask
where
    E: ChangePointEstimator + 'static,
{
    let (sender, receiver) = oneshot::channel();

    tokio::task::spawn_blocking(move || {
        let outcome = adapter.estimate(&series, &params);
        if sender.send(outcome).is_err() {
            debug!("estimation finished after its task was abandoned");
        }
    });

    EstimationTask { receiver }
}
