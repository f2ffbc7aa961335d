//! Named estimator parameter sets.

use std::collections::BTreeMap;
use std::str::FromStr;

use inflexion_traits::{Distribution, EstimatorParams, InflexionError, Result};
use serde::{Deserialize, Serialize};

/// Built-in estimator presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorPreset {
    /// Heavy-tailed noise, no seasonal component, long chain.
    Trend,
    /// Gaussian noise with a seasonal component, shorter chain.
    Seasonal,
}

impl EstimatorPreset {
    /// Every built-in preset.
    pub const ALL: [Self; 2] = [Self::Trend, Self::Seasonal];

    /// Preset name used in configuration files and on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::Seasonal => "seasonal",
        }
    }

    /// The parameters this preset stands for.
    #[must_use]
    pub const fn params(&self) -> EstimatorParams {
        match self {
            Self::Trend => EstimatorParams {
                distribution: Distribution::StudentT,
                seasonality: 0,
                iterations: 15_000,
                burnin: 2_000,
            },
            Self::Seasonal => EstimatorParams {
                distribution: Distribution::Normal,
                seasonality: 1,
                iterations: 11_000,
                burnin: 1_000,
            },
        }
    }
}

impl FromStr for EstimatorPreset {
    type Err = InflexionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                InflexionError::invalid_parameter("preset", format!("unknown preset '{}'", s))
            })
    }
}

/// Estimator parameter sets keyed by name.
///
/// Starts out with the built-in presets; configuration can add new entries
/// or replace built-in ones without touching detection code.
///
/// # Example
///
/// ```
/// use inflexion_estimator::PresetTable;
///
/// let table: PresetTable = serde_json::from_str(
///     r#"{"quick": {"distribution": "normal", "seasonality": 0, "iterations": 500, "burnin": 50}}"#,
/// ).unwrap();
///
/// let merged = PresetTable::default().merged(table);
/// assert_eq!(merged.get("quick").unwrap().iterations, 500);
/// assert!(merged.get("trend").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetTable(BTreeMap<String, EstimatorParams>);

impl Default for PresetTable {
    fn default() -> Self {
        Self(
            EstimatorPreset::ALL
                .into_iter()
                .map(|preset| (preset.name().to_string(), preset.params()))
                .collect(),
        )
    }
}

impl PresetTable {
    /// An empty table.
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Looks up a preset by name.
    ///
    /// # Errors
    ///
    /// Returns [`InflexionError::InvalidParameter`] if no preset has that name.
    pub fn get(&self, name: &str) -> Result<EstimatorParams> {
        self.0.get(name).copied().ok_or_else(|| {
            InflexionError::invalid_parameter(
                "preset",
                format!(
                    "unknown preset '{}' (available: {})",
                    name,
                    self.names().collect::<Vec<_>>().join(", ")
                ),
            )
        })
    }

    /// Adds or replaces a preset.
    pub fn insert(&mut self, name: impl Into<String>, params: EstimatorParams) {
        self.0.insert(name.into(), params);
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns `self` with every entry of `overrides` added or replaced.
    #[must_use]
    pub fn merged(mut self, overrides: Self) -> Self {
        self.0.extend(overrides.0);
        self
    }

    /// Validates every preset.
    ///
    /// # Errors
    ///
    /// Returns the first [`InflexionError::InvalidParameter`] found, naming the preset.
    pub fn validate(&self) -> Result<()> {
        for (name, params) in &self.0 {
            params.validate().map_err(|err| match err {
                InflexionError::InvalidParameter { name: field, reason } => {
                    InflexionError::invalid_parameter(
                        format!("{}.{}", name, field),
                        reason,
                    )
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets() {
        let trend = EstimatorPreset::Trend.params();
        assert_eq!(trend.distribution, Distribution::StudentT);
        assert_eq!(trend.seasonality, 0);
        assert_eq!(trend.iterations, 15_000);
        assert_eq!(trend.burnin, 2_000);

        let seasonal = EstimatorPreset::Seasonal.params();
        assert_eq!(seasonal.distribution, Distribution::Normal);
        assert_eq!(seasonal.seasonality, 1);
        assert!(seasonal.iterations < trend.iterations);

        for preset in EstimatorPreset::ALL {
            assert!(preset.params().validate().is_ok());
        }
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(
            "Seasonal".parse::<EstimatorPreset>().unwrap(),
            EstimatorPreset::Seasonal
        );
        assert!("weekly".parse::<EstimatorPreset>().is_err());
    }

    #[test]
    fn test_default_table() {
        let table = PresetTable::default();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["seasonal", "trend"]);
        assert_eq!(table.get("trend").unwrap(), EstimatorPreset::Trend.params());
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_unknown_preset_lists_names() {
        let err = PresetTable::default().get("weekly").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("weekly"));
        assert!(msg.contains("seasonal, trend"));
    }

    #[test]
    fn test_merge_replaces_builtin() {
        let mut overrides = PresetTable::empty();
        overrides.insert(
            "trend",
            EstimatorParams {
                distribution: Distribution::Normal,
                seasonality: 0,
                iterations: 100,
                burnin: 10,
            },
        );

        let table = PresetTable::default().merged(overrides);
        assert_eq!(table.get("trend").unwrap().iterations, 100);
        assert_eq!(table.get("seasonal").unwrap(), EstimatorPreset::Seasonal.params());
    }

    #[test]
    fn test_validate_names_offending_preset() {
        let mut table = PresetTable::empty();
        table.insert(
            "bad",
            EstimatorParams {
                distribution: Distribution::Normal,
                seasonality: 0,
                iterations: 10,
                burnin: 10,
            },
        );
        match table.validate() {
            Err(InflexionError::InvalidParameter { name, .. }) => assert_eq!(name, "bad.burnin"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_table_round_trips_through_json() {
        let json = serde_json::to_string(&PresetTable::default()).unwrap();
        let parsed: PresetTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, PresetTable::default());
    }
}
