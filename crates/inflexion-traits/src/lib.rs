#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/inflexion/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the Inflexion change-point framework.
//!
//! This crate provides the foundational abstractions shared by the signal,
//! detection and estimator crates: time-indexed series, the signal trait,
//! and the boundary contract toward an external change-point estimator.

/// The version of the inflexion-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod estimator;
pub mod signal;
pub mod types;

// Re-exports
pub use error::{InflexionError, Result};
pub use estimator::{
    ChangePointEstimator, Distribution, EstimationRequest, EstimationResult, EstimatorParams,
};
pub use signal::Signal;
pub use types::{ChangePointMask, Observation, SignalSeries, TimeIndexed, TimeSeries, Timestamp};
