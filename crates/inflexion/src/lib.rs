#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/inflexion/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Crate Organization
//!
//! - [`traits`] - Series types, error taxonomy, signal and estimator traits
//! - [`signals`] - Momentum and reversion signals
//! - [`detect`] - Rule-based change-point detector
//! - [`estimator`] - External estimator adapter, presets and worker
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use inflexion::{Analysis, DetectorConfig, TimeSeries};
//!
//! let t0 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(9, 30, 0).unwrap();
//! let index = (0..5).map(|i| t0 + chrono::Duration::minutes(i)).collect();
//! let series = TimeSeries::new(index, vec![10.0, 12.0, 11.0, 9.0, 13.0]).unwrap();
//!
//! let analysis = Analysis::Classic(DetectorConfig::default());
//! let detection = analysis.detect(&series).unwrap();
//! assert_eq!(detection.mask.count(), 2);
//! ```

/// Version information for the inflexion crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod analysis;

pub use analysis::{Analysis, AnalysisOutcome, Analyzer};

// ============================================================================
// Core Types
// ============================================================================

/// Series types, error taxonomy, and the signal and estimator traits.
pub mod traits {
    pub use inflexion_traits::*;
}

pub use inflexion_traits::{
    ChangePointEstimator, ChangePointMask, Distribution, EstimationResult, EstimatorParams,
    InflexionError, Observation, Result, Signal, SignalSeries, TimeSeries, Timestamp,
};

// ============================================================================
// Signals
// ============================================================================

/// Momentum and moving-average reversion signals.
pub mod signals {
    pub use inflexion_signals::*;
}

// ============================================================================
// Detection
// ============================================================================

/// Rule-based change-point detection.
pub mod detect {
    pub use inflexion_detect::*;
}

pub use inflexion_detect::{ChangePointDetector, Detection, DetectorConfig};

// ============================================================================
// External Estimator
// ============================================================================

/// Boundary toward the external Bayesian estimator.
pub mod estimator {
    pub use inflexion_estimator::*;
}

pub use inflexion_estimator::{CommandEstimator, EstimatorAdapter, EstimatorPreset, PresetTable};
