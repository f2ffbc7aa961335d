//! Signal implementations for Inflexion change-point detection.
//!
//! This crate provides the two backward-looking signals the detector combines:
//! - Momentum: lagged difference, `x[t] - x[t - lag]`
//! - Reversion: deviation from the trailing moving average of `window` samples
//!
//! Both return one entry per input position; positions without enough history
//! are `None`.
//!
//! # Example
//!
//! ```
//! use inflexion_signals::{momentum, reversion};
//!
//! let prices = [10.0, 12.0, 11.0, 9.0, 13.0];
//! let mom = momentum(&prices, 1).unwrap();
//! assert_eq!(mom, vec![None, Some(2.0), Some(-1.0), Some(-2.0), Some(4.0)]);
//!
//! let rev = reversion(&prices, 1).unwrap();
//! assert!(rev.iter().flatten().all(|r| *r == 0.0));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod momentum;
pub mod registry;
pub mod reversion;

// Re-export key types
pub use momentum::{Momentum, MomentumConfig, momentum};
pub use registry::{SignalCategory, SignalInfo, create_signal};
pub use reversion::{Reversion, ReversionConfig, moving_average, reversion};
