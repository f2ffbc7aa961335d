//! Mean-reversion signal: deviation from a trailing moving average.

use inflexion_traits::{InflexionError, Result, Signal, SignalSeries, TimeSeries};
use serde::{Deserialize, Serialize};

fn check_window(window: usize) -> Result<()> {
    if window == 0 {
        return Err(InflexionError::invalid_parameter(
            "window",
            "must be at least 1",
        ));
    }
    Ok(())
}

/// Trailing arithmetic mean over exactly `window` samples ending at each position.
///
/// Positions with fewer than `window` samples up to and including themselves
/// are `None`. Each window is summed left to right from scratch, so the result
/// at a position never depends on earlier positions' rounding.
///
/// # Errors
///
/// Returns [`InflexionError::InvalidParameter`] if `window` is zero.
pub fn moving_average(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    check_window(window)?;

    Ok((0..values.len())
        .map(|t| {
            let start = (t + 1).checked_sub(window)?;
            let sum = values[start..=t].iter().fold(0.0, |acc, v| acc + v);
            Some(sum / window as f64)
        })
        .collect())
}

/// Computes `values[t] - moving_average(values, window)[t]`.
///
/// With `window == 1` the average is the value itself, so every defined
/// position is exactly zero.
///
/// # Errors
///
/// Returns [`InflexionError::InvalidParameter`] if `window` is zero.
pub fn reversion(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    Ok(values
        .iter()
        .zip(moving_average(values, window)?)
        .map(|(value, mean)| mean.map(|m| value - m))
        .collect())
}

/// Configuration for the reversion signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversionConfig {
    /// Moving-average window in samples (default: 1)
    pub window: usize,
}

impl Default for ReversionConfig {
    fn default() -> Self {
        Self { window: 1 }
    }
}

/// Reversion signal.
///
/// Large magnitudes mean the price has stretched away from its recent mean.
#[derive(Debug, Clone)]
pub struct Reversion {
    config: ReversionConfig,
}

impl Reversion {
    /// Create a new reversion signal with the given configuration.
    #[must_use]
    pub const fn new(config: ReversionConfig) -> Self {
        Self { config }
    }

    /// Get the moving-average window in samples.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.config.window
    }
}

impl Default for Reversion {
    fn default() -> Self {
        Self::new(ReversionConfig::default())
    }
}

impl Signal for Reversion {
    fn name(&self) -> &str {
        "reversion"
    }

    fn lookback(&self) -> usize {
        self.config.window.saturating_sub(1)
    }

    fn compute(&self, series: &TimeSeries) -> Result<SignalSeries> {
        series.with_values(reversion(series.values(), self.config.window)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    #[test]
    fn test_moving_average_trailing_window() {
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(ma[..2], [None, None]);
        assert_relative_eq!(ma[2].unwrap(), 2.0);
        assert_relative_eq!(ma[3].unwrap(), 3.0);
        assert_relative_eq!(ma[4].unwrap(), 4.0);
    }

    #[test]
    fn test_window_longer_than_series() {
        let ma = moving_average(&[1.0, 2.0], 3).unwrap();
        assert_eq!(ma, vec![None, None]);
        let rev = reversion(&[1.0, 2.0], 3).unwrap();
        assert_eq!(rev, vec![None, None]);
    }

    #[test]
    fn test_reversion_values() {
        let rev = reversion(&[10.0, 12.0, 11.0, 9.0, 13.0], 2).unwrap();
        assert_eq!(rev[0], None);
        assert_relative_eq!(rev[1].unwrap(), 1.0);
        assert_relative_eq!(rev[2].unwrap(), -0.5);
        assert_relative_eq!(rev[3].unwrap(), -1.0);
        assert_relative_eq!(rev[4].unwrap(), 2.0);
    }

    #[test]
    fn test_unit_window_is_zero() {
        let values = [101.25, 99.5, 0.1, -3.3, 1e12, 0.0];
        let rev = reversion(&values, 1).unwrap();
        assert_eq!(rev.len(), values.len());
        assert!(rev.iter().all(|r| *r == Some(0.0)));
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            reversion(&[1.0], 0),
            Err(InflexionError::InvalidParameter { .. })
        ));
        assert!(moving_average(&[1.0], 0).is_err());
    }

    #[test]
    fn test_repeatable() {
        let values: Vec<f64> = (0..200).map(|i| (i as f64 * 0.37).sin() * 100.0).collect();
        let a = reversion(&values, 17).unwrap();
        let b = reversion(&values, 17).unwrap();
        let bits = |v: &[Option<f64>]| v.iter().map(|x| x.map(f64::to_bits)).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_signal_keeps_index() {
        let t0 = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let index = (0..4).map(|i| t0 + chrono::Duration::hours(i)).collect();
        let input = TimeSeries::new(index, vec![2.0, 4.0, 6.0, 8.0]).unwrap();
        let signal = Reversion::new(ReversionConfig { window: 2 });

        let out = signal.compute(&input).unwrap();
        assert_eq!(out.index(), input.index());
        assert_eq!(out.values(), &[None, Some(1.0), Some(1.0), Some(1.0)]);
        assert_eq!(signal.lookback(), 1);
        assert_eq!(signal.window(), 2);
    }
}
