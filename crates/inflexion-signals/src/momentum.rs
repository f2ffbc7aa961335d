//! Momentum signal based on lagged price differences.

use inflexion_traits::{InflexionError, Result, Signal, SignalSeries, TimeSeries};
use serde::{Deserialize, Serialize};

/// Computes `values[t] - values[t - lag]` for every position.
///
/// The first `lag` positions have no prior sample to compare against and are
/// `None`; when `lag >= values.len()` the whole output is `None`. Nothing looks
/// ahead of `t`.
///
/// # Errors
///
/// Returns [`InflexionError::InvalidParameter`] if `lag` is zero.
pub fn momentum(values: &[f64], lag: usize) -> Result<Vec<Option<f64>>> {
    if lag == 0 {
        return Err(InflexionError::invalid_parameter(
            "lag",
            "must be at least 1",
        ));
    }

    Ok((0..values.len())
        .map(|t| t.checked_sub(lag).map(|past| values[t] - values[past]))
        .collect())
}

/// Configuration for the momentum signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Number of samples to look back (default: 1)
    pub lag: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { lag: 1 }
    }
}

/// Momentum signal.
///
/// Positive values mean the price is above where it was `lag` samples ago.
///
/// # Example
///
/// ```
/// use inflexion_signals::{Momentum, MomentumConfig};
///
/// let signal = Momentum::new(MomentumConfig { lag: 5 });
/// assert_eq!(signal.lag(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Momentum {
    config: MomentumConfig,
}

impl Momentum {
    /// Create a new momentum signal with the given configuration.
    #[must_use]
    pub const fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    /// Get the lag in samples.
    #[must_use]
    pub const fn lag(&self) -> usize {
        self.config.lag
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(MomentumConfig::default())
    }
}

impl Signal for Momentum {
    fn name(&self) -> &str {
        "momentum"
    }

    fn lookback(&self) -> usize {
        self.config.lag
    }

    fn compute(&self, series: &TimeSeries) -> Result<SignalSeries> {
        series.with_values(momentum(series.values(), self.config.lag)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let index = (0..values.len())
            .map(|i| start + chrono::Duration::minutes(i as i64))
            .collect();
        TimeSeries::new(index, values.to_vec()).unwrap()
    }

    #[test]
    fn test_unit_lag() {
        let mom = momentum(&[10.0, 12.0, 11.0, 9.0, 13.0], 1).unwrap();
        assert_eq!(
            mom,
            vec![None, Some(2.0), Some(-1.0), Some(-2.0), Some(4.0)]
        );
    }

    #[test]
    fn test_longer_lag() {
        let mom = momentum(&[1.0, 2.0, 4.0, 8.0, 16.0], 2).unwrap();
        assert_eq!(mom[..2], [None, None]);
        assert_relative_eq!(mom[2].unwrap(), 3.0);
        assert_relative_eq!(mom[3].unwrap(), 6.0);
        assert_relative_eq!(mom[4].unwrap(), 12.0);
    }

    #[test]
    fn test_lag_at_or_beyond_length_is_undefined() {
        let values = [3.0, 1.0, 4.0];
        for lag in [3, 4, 30] {
            let mom = momentum(&values, lag).unwrap();
            assert_eq!(mom.len(), values.len());
            assert!(mom.iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_zero_lag_rejected() {
        assert!(matches!(
            momentum(&[1.0, 2.0], 0),
            Err(InflexionError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(momentum(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_signal_keeps_index() {
        let input = series(&[5.0, 6.0, 8.0]);
        let signal = Momentum::new(MomentumConfig { lag: 1 });

        let out = signal.compute(&input).unwrap();
        assert_eq!(out.index(), input.index());
        assert_eq!(out.values(), &[None, Some(1.0), Some(2.0)]);
        assert_eq!(signal.lookback(), 1);
        assert_eq!(signal.name(), "momentum");
    }

    #[test]
    fn test_default_config() {
        assert_eq!(MomentumConfig::default().lag, 1);
        assert_eq!(Momentum::default().lag(), 1);
    }
}
