//! Scenario conversion constants and cash-flow trend thresholds

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Fixed conversion constants used by scenario projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScenarioAssumptions {
    /// Share of profit that converts to cash flow
    pub cash_conversion_ratio: f64,

    /// Fully loaded monthly cost per head
    pub cost_per_head: f64,

    /// Default projection horizon in months
    pub default_months: usize,
}

impl Default for ScenarioAssumptions {
    fn default() -> Self {
        Self {
            cash_conversion_ratio: 0.85,
            cost_per_head: 5000.0,
            default_months: 12,
        }
    }
}

impl ScenarioAssumptions {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.cash_conversion_ratio.is_finite() || !self.cost_per_head.is_finite() {
            return Err(ConfigError::Invalid(
                "scenario constants must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Average-growth bands (percent) used to classify a cash-flow trend
///
/// Averages strictly above `improving` are improving, strictly below
/// `declining` are declining; the closed band in between is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendThresholds {
    pub improving: f64,
    pub declining: f64,
    pub periods: usize,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            improving: 5.0,
            declining: -5.0,
            periods: 3,
        }
    }
}

impl TrendThresholds {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.declining > self.improving {
            return Err(ConfigError::Invalid(format!(
                "cashFlow.declining ({}) must not exceed cashFlow.improving ({})",
                self.declining, self.improving
            )));
        }
        Ok(())
    }
}
