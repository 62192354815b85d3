//! Named, overridable constants used by the calculation engines
//!
//! Defaults reproduce the dashboard's reference values. A JSON file only needs
//! to carry the fields it overrides; everything else falls back to `Default`.

mod targets;
mod assumptions;

pub use targets::{KpiConfig, KpiTargets};
pub use assumptions::{ScenarioAssumptions, TrendThresholds};

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default location of an optional configuration override file
pub const DEFAULT_CONFIG_PATH: &str = "data/config.json";

/// Container for every engine's configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsConfig {
    pub kpi: KpiConfig,
    pub scenario: ScenarioAssumptions,
    pub cash_flow: TrendThresholds,
}

impl AnalyticsConfig {
    /// Load configuration from the default location
    pub fn from_json() -> Result<Self, ConfigError> {
        Self::from_json_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from a specific JSON file
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        log::debug!("loaded analytics config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a JSON document
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the engines rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.kpi.validate()?;
        self.scenario.validate()?;
        self.cash_flow.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let raw = r#"{ "kpi": { "targets": { "cac": 80.0 } }, "scenario": { "costPerHead": 6500.0 } }"#;
        let config = AnalyticsConfig::from_json_str(raw).unwrap();

        assert_eq!(config.kpi.targets.cac, 80.0);
        assert_eq!(config.kpi.targets.ltv, 1000.0);
        assert_eq!(config.kpi.ltv_gross_margin, 0.65);
        assert_eq!(config.scenario.cost_per_head, 6500.0);
        assert_eq!(config.scenario.cash_conversion_ratio, 0.85);
        assert_eq!(config.cash_flow, TrendThresholds::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = AnalyticsConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let raw = r#"{ "cashFlow": { "improving": -5.0, "declining": 5.0 } }"#;
        let err = AnalyticsConfig::from_json_str(raw).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = AnalyticsConfig::from_json_str("{ kpi: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = AnalyticsConfig::from_json().unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }
}
