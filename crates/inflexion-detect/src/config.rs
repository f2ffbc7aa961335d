//! Detector configuration.

use std::ops::RangeInclusive;

use inflexion_traits::{InflexionError, Result};
use serde::{Deserialize, Serialize};

/// Momentum lags offered to interactive callers.
pub const LAG_RANGE: RangeInclusive<usize> = 1..=30;

/// Moving-average windows offered to interactive callers.
pub const WINDOW_RANGE: RangeInclusive<usize> = 1..=30;

/// Reversion thresholds offered to interactive callers.
pub const THRESHOLD_RANGE: RangeInclusive<f64> = 0.0..=1000.0;

/// Parameters of the rule-based detector.
///
/// The detector itself only requires `lag >= 1`, `window >= 1` and a
/// threshold that is not NaN. The `*_RANGE` constants describe the domain
/// interactive front ends are expected to clamp to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Momentum lag in samples (default: 1)
    pub lag: usize,
    /// Moving-average window in samples (default: 1)
    pub window: usize,
    /// Reversion magnitude that must be exceeded (default: 0.0)
    pub threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            lag: *LAG_RANGE.start(),
            window: *WINDOW_RANGE.start(),
            threshold: *THRESHOLD_RANGE.start(),
        }
    }
}

impl DetectorConfig {
    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`InflexionError::InvalidParameter`] if `lag` or `window` is
    /// zero, or if `threshold` is NaN.
    pub fn validate(&self) -> Result<()> {
        if self.lag == 0 {
            return Err(InflexionError::invalid_parameter("lag", "must be at least 1"));
        }
        if self.window == 0 {
            return Err(InflexionError::invalid_parameter(
                "window",
                "must be at least 1",
            ));
        }
        if self.threshold.is_nan() {
            return Err(InflexionError::invalid_parameter(
                "threshold",
                "must be a number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.lag, 1);
        assert_eq!(config.window, 1);
        assert_relative_eq!(config.threshold, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let bad_lag = DetectorConfig {
            lag: 0,
            ..Default::default()
        };
        assert!(bad_lag.validate().is_err());

        let bad_window = DetectorConfig {
            window: 0,
            ..Default::default()
        };
        assert!(bad_window.validate().is_err());

        let nan = DetectorConfig {
            threshold: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let negative = DetectorConfig {
            threshold: -5.0,
            ..Default::default()
        };
        assert!(negative.validate().is_ok());

        let large = DetectorConfig {
            lag: 500,
            window: 500,
            threshold: 1e9,
        };
        assert!(large.validate().is_ok());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: DetectorConfig = serde_json::from_str(r#"{"window": 20}"#).unwrap();
        assert_eq!(config.lag, 1);
        assert_eq!(config.window, 20);
    }
}
