//! KPI benchmark targets

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// External benchmark for each tracked KPI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiTargets {
    pub cac: f64,
    pub ltv: f64,
    pub roas: f64,
    pub mrr: f64,
    pub churn: f64,
    pub conversion: f64,
}

impl Default for KpiTargets {
    fn default() -> Self {
        Self {
            cac: 95.0,
            ltv: 1000.0,
            roas: 3.5,
            mrr: 150_000.0,
            churn: 2.0,
            conversion: 4.0,
        }
    }
}

/// KPI engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KpiConfig {
    pub targets: KpiTargets,

    /// Gross margin (fraction) applied to revenue per customer for LTV
    pub ltv_gross_margin: f64,

    /// Percent of target above which a KPI is "warning" rather than "danger"
    pub status_threshold: f64,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            targets: KpiTargets::default(),
            ltv_gross_margin: 0.65,
            status_threshold: 80.0,
        }
    }
}

impl KpiConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.ltv_gross_margin) {
            return Err(ConfigError::Invalid(format!(
                "kpi.ltvGrossMargin must be within [0, 1], got {}",
                self.ltv_gross_margin
            )));
        }
        let t = &self.targets;
        for (name, value) in [
            ("cac", t.cac),
            ("ltv", t.ltv),
            ("roas", t.roas),
            ("mrr", t.mrr),
            ("churn", t.churn),
            ("conversion", t.conversion),
        ] {
            // Targets divide the current value in KPI status checks
            if !value.is_finite() || value == 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "kpi.targets.{} must be a finite non-zero number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
