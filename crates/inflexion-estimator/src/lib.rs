//! External Bayesian estimator boundary for Inflexion.
//!
//! The estimator itself is opaque. This crate supplies everything around it:
//! - [`EstimatorAdapter`]: strips timestamps, validates iteration parameters
//!   and passes the caller's parameters through unmodified
//! - [`EstimatorPreset`] / [`PresetTable`]: named parameter sets, swappable
//!   through configuration
//! - [`CommandEstimator`]: a backend that runs an external program and
//!   exchanges JSON over stdin/stdout
//! - [`spawn_estimate`]: runs an estimation on a blocking worker thread and
//!   delivers the result through a one-shot completion channel
//!
//! # Example
//!
//! ```no_run
//! use inflexion_estimator::{CommandEstimator, EstimatorAdapter, EstimatorPreset};
//! use inflexion_traits::TimeSeries;
//!
//! # fn example(series: &TimeSeries) -> inflexion_traits::Result<()> {
//! let adapter = EstimatorAdapter::new(CommandEstimator::new("beast-bridge"));
//! let result = adapter.estimate(series, &EstimatorPreset::Trend.params())?;
//! println!("{}", result.as_json());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod adapter;
mod command;
mod preset;
mod worker;

pub use adapter::EstimatorAdapter;
pub use command::CommandEstimator;
pub use preset::{EstimatorPreset, PresetTable};
pub use worker::{EstimationTask, spawn_estimate};
