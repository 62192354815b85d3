//! Scenario projection engine
//!
//! Growth factors scale linearly with `month / 12`: month 0 uses the base
//! values unchanged and nothing compounds.

use std::collections::BTreeMap;

use crate::config::ScenarioAssumptions;
use crate::error::MetricError;
use crate::metrics::{checked_percent, growth_rate};

use super::params::{ProjectedMetrics, ScenarioField, ScenarioParams};

/// Default percentage each field is varied by in sensitivity runs
pub const DEFAULT_SENSITIVITY_VARIATION: f64 = 10.0;

/// Horizon of every sensitivity run, independent of the configured default
pub const SENSITIVITY_MONTHS: usize = 12;

/// Projection engine bound to a set of conversion constants
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    assumptions: ScenarioAssumptions,
}

impl ScenarioEngine {
    pub fn new(assumptions: ScenarioAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &ScenarioAssumptions {
        &self.assumptions
    }

    /// Project `months` periods of revenue, expenses, profit, cash flow and ROI
    pub fn project(&self, params: &ScenarioParams, months: usize) -> Result<Vec<ProjectedMetrics>, MetricError> {
        (0..months).map(|month| self.project_month(params, month)).collect()
    }

    /// Project the configured default horizon
    pub fn project_default(&self, params: &ScenarioParams) -> Result<Vec<ProjectedMetrics>, MetricError> {
        self.project(params, self.assumptions.default_months)
    }

    fn project_month(&self, params: &ScenarioParams, month: usize) -> Result<ProjectedMetrics, MetricError> {
        let elapsed = month as f64 / 12.0;

        let growth_factor = 1.0 + params.sales_growth / 100.0 * elapsed;
        let expense_factor = 1.0 + params.expense_growth / 100.0 * elapsed;
        let expansion_factor = 1.0 + params.market_expansion / 100.0 * elapsed;

        let revenue = params.base_revenue * growth_factor * expansion_factor;
        let expenses = params.base_expenses * expense_factor
            + params.headcount * self.assumptions.cost_per_head;
        let profit = revenue - expenses;

        Ok(ProjectedMetrics {
            revenue,
            expenses,
            profit,
            cash_flow: profit * self.assumptions.cash_conversion_ratio,
            roi: checked_percent(revenue - expenses, expenses, "scenario roi")?,
        })
    }

    /// One `SENSITIVITY_MONTHS` projection per field, with only that field
    /// raised by `variation_pct` percent
    pub fn sensitivity(
        &self,
        base: &ScenarioParams,
        variation_pct: f64,
    ) -> Result<BTreeMap<ScenarioField, Vec<ProjectedMetrics>>, MetricError> {
        ScenarioField::ALL
            .iter()
            .map(|&field| {
                let varied = base.with_varied(field, variation_pct);
                Ok((field, self.project(&varied, SENSITIVITY_MONTHS)?))
            })
            .collect()
    }
}

/// Project with the default conversion constants
pub fn scenario_projections(params: &ScenarioParams, months: usize) -> Result<Vec<ProjectedMetrics>, MetricError> {
    ScenarioEngine::default().project(params, months)
}

/// Single-factor sensitivity with the default conversion constants
pub fn sensitivity_analysis(
    base: &ScenarioParams,
    variation_pct: f64,
) -> Result<BTreeMap<ScenarioField, Vec<ProjectedMetrics>>, MetricError> {
    ScenarioEngine::default().sensitivity(base, variation_pct)
}

/// Haircut revenue, profit, cash flow and ROI by `risk_factor` (0 to 1)
///
/// Expenses are left as projected.
pub fn risk_adjusted_metrics(
    projections: &[ProjectedMetrics],
    risk_factor: f64,
) -> Result<Vec<ProjectedMetrics>, MetricError> {
    if !(0.0..=1.0).contains(&risk_factor) {
        return Err(MetricError::InvalidParameter {
            name: "risk_factor",
            reason: format!("must be within [0, 1], got {}", risk_factor),
        });
    }
    let retained = 1.0 - risk_factor;

    Ok(projections
        .iter()
        .map(|p| ProjectedMetrics {
            revenue: p.revenue * retained,
            expenses: p.expenses,
            profit: p.profit * retained,
            cash_flow: p.cash_flow * retained,
            roi: p.roi * retained,
        })
        .collect())
}

/// Month-by-month profit growth of `scenario` over `base`, in percent
///
/// Months where the base profit is zero are `None`. Only months present in
/// both projections are compared.
pub fn scenario_impact(base: &[ProjectedMetrics], scenario: &[ProjectedMetrics]) -> Vec<Option<f64>> {
    base.iter()
        .zip(scenario)
        .map(|(b, s)| growth_rate(s.profit, b.profit).ok())
        .collect()
}

/// Apply growth and expansion (percent) to a single value, then a percentage
/// risk haircut
pub fn scenario_impact_value(base_value: f64, growth_pct: f64, market_expansion: f64, risk_pct: f64) -> f64 {
    let grown = base_value * (1.0 + growth_pct / 100.0);
    let expanded = grown * (1.0 + market_expansion / 100.0);
    expanded * (1.0 - risk_pct / 100.0)
}
