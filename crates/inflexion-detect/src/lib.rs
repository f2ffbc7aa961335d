//! Rule-based change-point detection for Inflexion.
//!
//! A position is flagged as a change point when either
//! - momentum changes sign relative to the previous position, and the
//!   previous momentum was non-zero, or
//! - the magnitude of the reversion signal exceeds the threshold.
//!
//! Positions where an operand is undefined never satisfy a condition. The
//! resulting [`ChangePointMask`](inflexion_traits::ChangePointMask) has the
//! same index as the analysed series. Detection is pure and stateless: every
//! call recomputes from scratch and never logs.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use inflexion_detect::{ChangePointDetector, DetectorConfig};
//! use inflexion_traits::TimeSeries;
//!
//! let t0 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(9, 30, 0).unwrap();
//! let index = (0..5).map(|i| t0 + chrono::Duration::minutes(i)).collect();
//! let series = TimeSeries::new(index, vec![10.0, 12.0, 11.0, 9.0, 13.0]).unwrap();
//!
//! let detector = ChangePointDetector::new(DetectorConfig {
//!     lag: 1,
//!     window: 1,
//!     threshold: 0.0,
//! })
//! .unwrap();
//!
//! let mask = detector.detect(&series).unwrap();
//! assert_eq!(mask.values(), &[false, false, true, false, true]);
//! ```

mod condition;
mod config;
mod detector;

pub use condition::{momentum_flips, reversion_breaches};
pub use config::{DetectorConfig, LAG_RANGE, THRESHOLD_RANGE, WINDOW_RANGE};
pub use detector::{ChangePointDetector, Detection, detect};
