//! Configuration file support for the Inflexion CLI.
//!
//! A config file is a JSON document with three optional sections:
//!
//! ```json
//! {
//!   "detector": { "lag": 5, "window": 20, "threshold": 1.5 },
//!   "presets": {
//!     "fast": { "distribution": "normal", "seasonality": 0, "iterations": 2000, "burnin": 200 }
//!   },
//!   "estimator": { "program": "beast-runner", "args": ["--json"], "timeout_secs": 600 }
//! }
//! ```
//!
//! Presets named in the file are added to, or replace, the built-in ones.

use std::path::Path;
use std::time::Duration;

use inflexion::detect::{LAG_RANGE, THRESHOLD_RANGE, WINDOW_RANGE};
use inflexion::{CommandEstimator, DetectorConfig, InflexionError, PresetTable};
use serde::{Deserialize, Serialize};

/// Program run for Bayesian estimation when none is configured.
pub(crate) const DEFAULT_ESTIMATOR_PROGRAM: &str = "inflexion-estimator";

/// External estimator program settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EstimatorSettings {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) timeout_secs: Option<u64>,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_ESTIMATOR_PROGRAM.to_string(),
            args: Vec::new(),
            timeout_secs: None,
        }
    }
}

impl EstimatorSettings {
    /// Build the estimator backend these settings describe.
    pub(crate) fn backend(&self) -> CommandEstimator {
        let backend = CommandEstimator::new(&self.program).with_args(&self.args);
        match self.timeout_secs {
            Some(secs) => backend.with_timeout(Duration::from_secs(secs)),
            None => backend,
        }
    }
}

/// Settings loaded from a config file, falling back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) detector: DetectorConfig,
    pub(crate) presets: PresetTable,
    pub(crate) estimator: EstimatorSettings,
}

impl Config {
    /// Load the config file at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, InflexionError> {
        match path {
            Some(path) => Self::from_json(&std::fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Parse a config document and validate it.
    pub(crate) fn from_json(text: &str) -> Result<Self, InflexionError> {
        let mut config: Self = serde_json::from_str(text)?;
        config.presets = PresetTable::default().merged(config.presets);
        config.presets.validate()?;
        config.detector.validate()?;
        check_detector_domain(&config.detector)?;
        Ok(config)
    }
}

/// Holds config-file detector values to the same domains as the command-line flags.
fn check_detector_domain(detector: &DetectorConfig) -> Result<(), InflexionError> {
    if !LAG_RANGE.contains(&detector.lag) {
        return Err(InflexionError::invalid_parameter(
            "detector.lag",
            format!(
                "{} is outside {}..={}",
                detector.lag,
                LAG_RANGE.start(),
                LAG_RANGE.end()
            ),
        ));
    }
    if !WINDOW_RANGE.contains(&detector.window) {
        return Err(InflexionError::invalid_parameter(
            "detector.window",
            format!(
                "{} is outside {}..={}",
                detector.window,
                WINDOW_RANGE.start(),
                WINDOW_RANGE.end()
            ),
        ));
    }
    if !THRESHOLD_RANGE.contains(&detector.threshold) {
        return Err(InflexionError::invalid_parameter(
            "detector.threshold",
            format!(
                "{} is outside {}..={}",
                detector.threshold,
                THRESHOLD_RANGE.start(),
                THRESHOLD_RANGE.end()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inflexion::{Distribution, EstimatorPreset};

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.detector, DetectorConfig::default());
        assert_eq!(
            config.presets.get("trend").unwrap(),
            EstimatorPreset::Trend.params()
        );
        assert_eq!(config.estimator.program, DEFAULT_ESTIMATOR_PROGRAM);
        assert!(config.estimator.backend().timeout().is_none());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_json(r#"{"detector": {"lag": 5}}"#).unwrap();
        assert_eq!(config.detector.lag, 5);
        assert_eq!(config.detector.window, 1);
        assert!(config.presets.get("seasonal").is_ok());
    }

    #[test]
    fn test_presets_merge_over_builtins() {
        let config = Config::from_json(
            r#"{
                "presets": {
                    "trend": {"distribution": "normal", "seasonality": 0, "iterations": 500, "burnin": 50},
                    "fast": {"distribution": "student_t", "seasonality": 0, "iterations": 100, "burnin": 10}
                },
                "estimator": {"program": "beast-runner", "timeout_secs": 30}
            }"#,
        )
        .unwrap();

        let trend = config.presets.get("trend").unwrap();
        assert_eq!(trend.distribution, Distribution::Normal);
        assert_eq!(trend.iterations, 500);
        assert_eq!(config.presets.get("fast").unwrap().burnin, 10);
        assert_eq!(
            config.presets.get("seasonal").unwrap(),
            EstimatorPreset::Seasonal.params()
        );
        assert_eq!(
            config.estimator.backend().timeout(),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_invalid_files() {
        assert!(matches!(
            Config::from_json(r#"{"detector": {"lag": 0}}"#),
            Err(InflexionError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Config::from_json(
                r#"{"presets": {"bad": {"distribution": "normal", "seasonality": 0, "iterations": 10, "burnin": 10}}}"#
            ),
            Err(InflexionError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Config::from_json("not json"),
            Err(InflexionError::Json(_))
        ));
    }

    #[test]
    fn test_detector_values_held_to_flag_domains() {
        for (text, field) in [
            (r#"{"detector": {"threshold": -5}}"#, "detector.threshold"),
            (r#"{"detector": {"threshold": 1000.5}}"#, "detector.threshold"),
            (r#"{"detector": {"lag": 31}}"#, "detector.lag"),
            (r#"{"detector": {"window": 40}}"#, "detector.window"),
        ] {
            assert!(
                matches!(
                    Config::from_json(text),
                    Err(InflexionError::InvalidParameter { ref name, .. }) if name == field
                ),
                "{text}"
            );
        }

        let edge =
            Config::from_json(r#"{"detector": {"lag": 30, "window": 30, "threshold": 1000}}"#)
                .unwrap();
        assert_eq!(edge.detector.lag, 30);
        assert_eq!(edge.detector.window, 30);
    }
}
