//! Signal registry for discovering and constructing available signals.

use inflexion_traits::{InflexionError, Result, Signal};
use serde::{Deserialize, Serialize};

use crate::{Momentum, MomentumConfig, Reversion, ReversionConfig};

/// Signal category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalCategory {
    /// Price momentum signals
    Momentum,
    /// Mean reversion signals
    Reversion,
}

impl SignalCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Momentum => "Lagged price differences; sign flips mark turns",
            Self::Reversion => "Deviation from a trailing moving average",
        }
    }
}

/// Metadata about a signal.
#[derive(Debug, Clone, Serialize)]
pub struct SignalInfo {
    /// Unique identifier for the signal
    pub name: &'static str,

    /// Category classification
    pub category: SignalCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Name of the integer parameter the signal takes
    pub parameter: &'static str,

    /// Default value of that parameter
    pub default_parameter: usize,
}

/// Get information about all available signals.
#[must_use]
pub fn available_signals() -> Vec<SignalInfo> {
    vec![
        SignalInfo {
            name: "momentum",
            category: SignalCategory::Momentum,
            description: "Value minus the value `lag` samples earlier",
            parameter: "lag",
            default_parameter: MomentumConfig::default().lag,
        },
        SignalInfo {
            name: "reversion",
            category: SignalCategory::Reversion,
            description: "Value minus its trailing moving average over `window` samples",
            parameter: "window",
            default_parameter: ReversionConfig::default().window,
        },
    ]
}

/// Get all signals in a specific category.
#[must_use]
pub fn signals_by_category(category: &SignalCategory) -> Vec<SignalInfo> {
    available_signals()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a specific signal by name.
#[must_use]
pub fn get_signal_info(name: &str) -> Option<SignalInfo> {
    available_signals()
        .into_iter()
        .find(|info| info.name == name)
}

/// Create a signal instance by name with its integer parameter.
///
/// `mom` and `rev` are accepted as aliases.
///
/// # Errors
///
/// Returns [`InflexionError::SignalNotFound`] for an unknown name.
pub fn create_signal(name: &str, parameter: usize) -> Result<Box<dyn Signal>> {
    match name {
        "momentum" | "mom" => Ok(Box::new(Momentum::new(MomentumConfig { lag: parameter }))),
        "reversion" | "rev" => Ok(Box::new(Reversion::new(ReversionConfig {
            window: parameter,
        }))),
        _ => Err(InflexionError::SignalNotFound(format!(
            "Unknown signal: '{}'. Use 'inflexion signals' to list available signals.",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_signals() {
        let signals = available_signals();
        assert_eq!(signals.len(), 2);

        let categories: Vec<_> = signals.iter().map(|s| s.category).collect();
        assert!(categories.contains(&SignalCategory::Momentum));
        assert!(categories.contains(&SignalCategory::Reversion));
    }

    #[test]
    fn test_signals_by_category() {
        assert_eq!(signals_by_category(&SignalCategory::Momentum).len(), 1);
        assert_eq!(signals_by_category(&SignalCategory::Reversion).len(), 1);
    }

    #[test]
    fn test_get_signal_info() {
        let info = get_signal_info("reversion").unwrap();
        assert_eq!(info.category, SignalCategory::Reversion);
        assert_eq!(info.parameter, "window");
        assert_eq!(info.default_parameter, 1);

        assert!(get_signal_info("nonexistent_signal").is_none());
    }

    #[test]
    fn test_create_signal() {
        let mom = create_signal("mom", 4).unwrap();
        assert_eq!(mom.name(), "momentum");
        assert_eq!(mom.lookback(), 4);

        let rev = create_signal("reversion", 10).unwrap();
        assert_eq!(rev.name(), "reversion");
        assert_eq!(rev.lookback(), 9);

        assert!(matches!(
            create_signal("rsi", 14),
            Err(InflexionError::SignalNotFound(_))
        ));
    }

    #[test]
    fn test_category_descriptions() {
        assert!(!SignalCategory::Momentum.description().is_empty());
        assert!(!SignalCategory::Reversion.description().is_empty());
    }
}
