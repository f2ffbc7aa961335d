//! Common types used throughout the Inflexion framework.
//!
//! Every series in Inflexion is a [`TimeIndexed`] sequence: a vector of values
//! bound 1:1 to a non-decreasing timestamp index. Derived signals and masks
//! are built on the index of the series they were computed from, so
//! positional alignment is preserved end to end.

use serde::{Deserialize, Serialize};

use crate::{InflexionError, Result};

/// Timestamp type used to index series.
pub type Timestamp = chrono::NaiveDateTime;

/// A price series: one closing value per timestamp.
pub type TimeSeries = TimeIndexed<f64>;

/// A derived signal. `None` marks positions without enough history.
pub type SignalSeries = TimeIndexed<Option<f64>>;

/// Boolean change-point flags aligned to the analysed series.
pub type ChangePointMask = TimeIndexed<bool>;

/// A single (timestamp, value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// When the value was observed.
    pub timestamp: Timestamp,
    /// The observed value.
    pub value: f64,
}

impl Observation {
    /// Creates a new observation.
    pub const fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Values bound to an ordered timestamp index.
///
/// # Invariants
///
/// - `index.len() == values.len()`
/// - `index` is non-decreasing
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use inflexion_traits::TimeSeries;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let series = TimeSeries::new(vec![day(1), day(2), day(3)], vec![10.0, 11.0, 12.0]).unwrap();
///
/// let window = series.window(day(2), day(3));
/// assert_eq!(window.values(), &[11.0, 12.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeIndexed<T> {
    index: Vec<Timestamp>,
    values: Vec<T>,
}

impl<T> TimeIndexed<T> {
    /// Creates a series from a timestamp index and its values.
    ///
    /// # Errors
    ///
    /// Returns [`InflexionError::LengthMismatch`] if the two vectors differ in
    /// length, and [`InflexionError::DataFormat`] if the index ever decreases.
    pub fn new(index: Vec<Timestamp>, values: Vec<T>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(InflexionError::LengthMismatch {
                expected: index.len(),
                actual: values.len(),
            });
        }

        if let Some(pos) = index.windows(2).position(|w| w[1] < w[0]) {
            return Err(InflexionError::DataFormat(format!(
                "timestamp index decreases at position {}: {} after {}",
                pos + 1,
                index[pos + 1],
                index[pos]
            )));
        }

        Ok(Self { index, values })
    }

    /// Creates an empty series.
    pub const fn empty() -> Self {
        Self {
            index: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the series has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the timestamp index.
    pub fn index(&self) -> &[Timestamp] {
        &self.index
    }

    /// Returns the values in index order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Consumes self and returns the values, dropping the index.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Returns the entry at a position.
    pub fn get(&self, position: usize) -> Option<(Timestamp, &T)> {
        Some((*self.index.get(position)?, self.values.get(position)?))
    }

    /// Iterates over `(timestamp, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, &T)> + '_ {
        self.index.iter().copied().zip(self.values.iter())
    }

    /// Earliest timestamp, if any.
    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.index.first().copied()
    }

    /// Latest timestamp, if any.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.index.last().copied()
    }

    /// Binds new values to this series' index.
    ///
    /// # Errors
    ///
    /// Returns [`InflexionError::LengthMismatch`] if `values` does not have
    /// exactly one entry per index position.
    pub fn with_values<U>(&self, values: Vec<U>) -> Result<TimeIndexed<U>> {
        if values.len() != self.index.len() {
            return Err(InflexionError::LengthMismatch {
                expected: self.index.len(),
                actual: values.len(),
            });
        }
        Ok(TimeIndexed {
            index: self.index.clone(),
            values,
        })
    }

    /// Applies `f` to every value, keeping the index.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> TimeIndexed<U> {
        TimeIndexed {
            index: self.index.clone(),
            values: self.values.iter().map(f).collect(),
        }
    }

    /// Position range of entries whose timestamp lies in `[start, end]`.
    fn range_positions(&self, start: Timestamp, end: Timestamp) -> std::ops::Range<usize> {
        if start > end {
            return 0..0;
        }
        let lo = self.index.partition_point(|t| *t < start);
        let hi = self.index.partition_point(|t| *t <= end);
        lo..hi.max(lo)
    }
}

impl<T: Clone> TimeIndexed<T> {
    /// Extracts the entries whose timestamp lies in the inclusive range
    /// `[start, end]`, preserving order.
    ///
    /// An inverted range or a range that matches nothing yields an empty
    /// series rather than an error.
    pub fn window(&self, start: Timestamp, end: Timestamp) -> Self {
        let range = self.range_positions(start, end);
        Self {
            index: self.index[range.clone()].to_vec(),
            values: self.values[range].to_vec(),
        }
    }
}

impl<T> Default for TimeIndexed<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl TimeIndexed<f64> {
    /// Builds a series from unordered observations.
    ///
    /// Observations are sorted by timestamp (stable), and when several share
    /// a timestamp the one that came last in the input wins.
    pub fn from_observations(observations: impl IntoIterator<Item = Observation>) -> Self {
        let mut sorted: Vec<Observation> = observations.into_iter().collect();
        sorted.sort_by_key(|o| o.timestamp);

        let mut index: Vec<Timestamp> = Vec::with_capacity(sorted.len());
        let mut values: Vec<f64> = Vec::with_capacity(sorted.len());
        for obs in sorted {
            if index.last() == Some(&obs.timestamp) {
                if let Some(last) = values.last_mut() {
                    *last = obs.value;
                }
            } else {
                index.push(obs.timestamp);
                values.push(obs.value);
            }
        }

        Self { index, values }
    }
}

impl TimeIndexed<Option<f64>> {
    /// Number of positions where the signal is defined.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

impl TimeIndexed<bool> {
    /// Number of flagged positions.
    pub fn count(&self) -> usize {
        self.values.iter().filter(|&&flag| flag).count()
    }

    /// Timestamps of the flagged positions, in order.
    pub fn flagged(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.iter()
            .filter_map(|(timestamp, &flag)| flag.then_some(timestamp))
    }
}
