//! Signal trait for deriving per-timestamp indicators from a price series.
//!
//! A signal is a pure, backward-looking transform: it reads a [`TimeSeries`]
//! and returns a [`SignalSeries`] on exactly the same index, with `None` at
//! positions that lack enough history. Signals hold only their configuration
//! and never cache between calls.

use crate::{Result, SignalSeries, TimeSeries};

/// A time-series signal.
///
/// Implementations should be thread-safe (`Send + Sync`) so a signal can be
/// shared across worker threads.
///
/// # Example
///
/// ```
/// use inflexion_traits::{Result, Signal, SignalSeries, TimeSeries};
///
/// struct Identity;
///
/// impl Signal for Identity {
///     fn name(&self) -> &str {
///         "identity"
///     }
///
///     fn lookback(&self) -> usize {
///         0
///     }
///
///     fn compute(&self, series: &TimeSeries) -> Result<SignalSeries> {
///         Ok(series.map(|v| Some(*v)))
///     }
/// }
/// ```
pub trait Signal: Send + Sync {
    /// Returns the name of this signal.
    fn name(&self) -> &str;

    /// Number of prior samples a position needs before the signal is defined.
    ///
    /// The first `lookback()` positions of every output are `None`.
    fn lookback(&self) -> usize;

    /// Computes the signal over the whole series.
    ///
    /// The output has the same length and index as `series`.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal's configuration is invalid.
    fn compute(&self, series: &TimeSeries) -> Result<SignalSeries>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Shifted {
        lookback: usize,
    }

    impl Signal for Shifted {
        fn name(&self) -> &str {
            "shifted"
        }

        fn lookback(&self) -> usize {
            self.lookback
        }

        fn compute(&self, series: &TimeSeries) -> Result<SignalSeries> {
            let values = series
                .values()
                .iter()
                .enumerate()
                .map(|(i, _)| i.checked_sub(self.lookback).map(|j| series.values()[j]))
                .collect();
            series.with_values(values)
        }
    }

    #[test]
    fn test_signal_output_is_aligned() {
        let t = |d| {
            NaiveDate::from_ymd_opt(2024, 3, d)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        };
        let series = TimeSeries::new(vec![t(1), t(2), t(3)], vec![1.0, 2.0, 3.0]).unwrap();
        let signal = Shifted { lookback: 1 };

        let out = signal.compute(&series).unwrap();
        assert_eq!(out.index(), series.index());
        assert_eq!(out.values(), &[None, Some(1.0), Some(2.0)]);
        assert_eq!(signal.name(), "shifted");
    }

    #[test]
    fn test_signal_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn Signal>>();
    }
}
