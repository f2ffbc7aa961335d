//! Change-point detector combining momentum flips and reversion breaches.

use inflexion_signals::{Momentum, MomentumConfig, Reversion, ReversionConfig};
use inflexion_traits::{ChangePointMask, Result, Signal, SignalSeries, TimeSeries};
use serde::Serialize;

use crate::{DetectorConfig, momentum_flips, reversion_breaches};

/// Full output of one detection pass, every member on the input index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Momentum signal.
    pub momentum: SignalSeries,
    /// Reversion signal.
    pub reversion: SignalSeries,
    /// Positions flagged by the momentum sign-flip condition.
    pub momentum_flags: ChangePointMask,
    /// Positions flagged by the reversion threshold condition.
    pub reversion_flags: ChangePointMask,
    /// Union of both conditions.
    pub mask: ChangePointMask,
}

/// Rule-based change-point detector.
///
/// Holds only its validated configuration; each call is an independent
/// O(len * window) pass over the input.
#[derive(Debug, Clone)]
pub struct ChangePointDetector {
    config: DetectorConfig,
    momentum: Momentum,
    reversion: Reversion,
}

impl ChangePointDetector {
    /// Create a detector.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`](inflexion_traits::InflexionError::InvalidParameter)
    /// if the configuration does not validate.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            momentum: Momentum::new(MomentumConfig { lag: config.lag }),
            reversion: Reversion::new(ReversionConfig {
                window: config.window,
            }),
        })
    }

    /// The detector's configuration.
    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Runs both conditions and returns every intermediate series.
    ///
    /// # Errors
    ///
    /// Propagates signal errors; none occur for a validated configuration.
    pub fn analyze(&self, series: &TimeSeries) -> Result<Detection> {
        let momentum = self.momentum.compute(series)?;
        let reversion = self.reversion.compute(series)?;

        let flips = momentum_flips(momentum.values());
        let breaches = reversion_breaches(reversion.values(), self.config.threshold);
        let combined = flips
            .iter()
            .zip(&breaches)
            .map(|(flip, breach)| *flip || *breach)
            .collect();

        Ok(Detection {
            momentum_flags: series.with_values(flips)?,
            reversion_flags: series.with_values(breaches)?,
            mask: series.with_values(combined)?,
            momentum,
            reversion,
        })
    }

    /// Returns the change-point mask for `series`.
    ///
    /// An empty series yields an empty mask.
    ///
    /// # Errors
    ///
    /// Propagates signal errors; none occur for a validated configuration.
    pub fn detect(&self, series: &TimeSeries) -> Result<ChangePointMask> {
        Ok(self.analyze(series)?.mask)
    }
}

/// One-shot detection with explicit parameters.
///
/// # Errors
///
/// Returns [`InvalidParameter`](inflexion_traits::InflexionError::InvalidParameter)
/// if `lag` or `window` is zero or `threshold` is NaN.
pub fn detect(
    series: &TimeSeries,
    lag: usize,
    window: usize,
    threshold: f64,
) -> Result<ChangePointMask> {
    ChangePointDetector::new(DetectorConfig {
        lag,
        window,
        threshold,
    })?
    .detect(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use inflexion_traits::{InflexionError, Timestamp};

    fn at(i: usize) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            + chrono::Duration::minutes(i as i64)
    }

    fn series(values: &[f64]) -> TimeSeries {
        TimeSeries::new((0..values.len()).map(at).collect(), values.to_vec()).unwrap()
    }

    fn detector(lag: usize, window: usize, threshold: f64) -> ChangePointDetector {
        ChangePointDetector::new(DetectorConfig {
            lag,
            window,
            threshold,
        })
        .unwrap()
    }

    #[test]
    fn test_momentum_flip_scenario() {
        let s = series(&[10.0, 12.0, 11.0, 9.0, 13.0]);
        let detection = detector(1, 1, 0.0).analyze(&s).unwrap();

        assert_eq!(
            detection.momentum.values(),
            &[None, Some(2.0), Some(-1.0), Some(-2.0), Some(4.0)]
        );
        assert_eq!(
            detection.momentum_flags.values(),
            &[false, false, true, false, true]
        );
        // window 1 leaves reversion identically zero
        assert_eq!(detection.reversion_flags.count(), 0);
        assert_eq!(detection.mask.values(), detection.momentum_flags.values());
        assert_eq!(detection.mask.flagged().collect::<Vec<_>>(), vec![at(2), at(4)]);
    }

    #[test]
    fn test_constant_series_never_flags() {
        let s = series(&[5.0; 5]);
        for (lag, window, threshold) in [(1, 1, 0.0), (2, 3, 0.0), (4, 5, 10.0), (7, 2, 0.5)] {
            let mask = detector(lag, window, threshold).detect(&s).unwrap();
            assert_eq!(mask.len(), 5);
            assert_eq!(mask.count(), 0);
        }
    }

    #[test]
    fn test_reversion_breach_flags() {
        let s = series(&[10.0, 10.0, 10.0, 16.0, 10.0]);
        let detection = detector(30, 3, 1.0).analyze(&s).unwrap();

        // lag beyond the series: no momentum at all
        assert_eq!(detection.momentum.defined_count(), 0);
        assert_eq!(detection.momentum_flags.count(), 0);

        let rev = detection.reversion.values();
        assert_eq!(rev[..2], [None, None]);
        assert_relative_eq!(rev[2].unwrap(), 0.0);
        assert_relative_eq!(rev[3].unwrap(), 4.0);
        assert_relative_eq!(rev[4].unwrap(), -2.0);
        assert_eq!(
            detection.mask.values(),
            &[false, false, false, true, true]
        );
    }

    #[test]
    fn test_mask_is_union() {
        let s = series(&[1.0, 3.0, 2.0, 2.5, 10.0, 9.0, 9.5]);
        let detection = detector(1, 3, 2.0).analyze(&s).unwrap();
        for i in 0..s.len() {
            assert_eq!(
                detection.mask.values()[i],
                detection.momentum_flags.values()[i] || detection.reversion_flags.values()[i]
            );
        }
    }

    #[test]
    fn test_zero_threshold_flags_nonzero_reversion() {
        let s = series(&[4.0, 4.0, 5.0]);
        let detection = detector(30, 2, 0.0).analyze(&s).unwrap();
        assert_eq!(detection.reversion_flags.values(), &[false, false, true]);
    }

    #[test]
    fn test_negative_threshold_flags_every_defined_reversion() {
        let s = series(&[4.0, 4.0, 4.0, 4.0]);
        let detection = detector(30, 2, -1.0).analyze(&s).unwrap();
        assert_eq!(detection.reversion_flags.values(), &[false, true, true, true]);
    }

    #[test]
    fn test_empty_series() {
        let mask = detector(3, 3, 1.0).detect(&TimeSeries::empty()).unwrap();
        assert!(mask.is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        let s = series(&[1.0, 2.0]);
        assert!(matches!(
            detect(&s, 0, 3, 1.0),
            Err(InflexionError::InvalidParameter { ref name, .. }) if name == "lag"
        ));
        assert!(matches!(
            detect(&s, 3, 0, 1.0),
            Err(InflexionError::InvalidParameter { ref name, .. }) if name == "window"
        ));
        assert!(ChangePointDetector::new(DetectorConfig {
            threshold: f64::NAN,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_free_function_matches_detector() {
        let s = series(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
        assert_eq!(
            detect(&s, 2, 3, 1.5).unwrap(),
            detector(2, 3, 1.5).detect(&s).unwrap()
        );
    }

    #[test]
    fn test_config_accessor() {
        let d = detector(5, 7, 12.5);
        assert_eq!(d.config().lag, 5);
        assert_eq!(d.config().window, 7);
        assert_relative_eq!(d.config().threshold, 12.5);
    }
}
