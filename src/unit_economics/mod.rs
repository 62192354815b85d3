//! Per-unit profitability waterfall and product returns

use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::metrics::{checked_percent, gross_profit};

/// Per-unit waterfall from price down to operating income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitEconomics {
    pub gross_profit_per_unit: f64,
    pub operating_income_per_unit: f64,
    /// Gross profit in percent of unit revenue
    pub gross_margin_per_unit: f64,
}

/// Unit economics from per-unit revenue, cost of goods and operating expense
pub fn unit_economics(revenue: f64, cogs: f64, operating_expenses: f64) -> Result<UnitEconomics, MetricError> {
    let gross = gross_profit(revenue, cogs);
    Ok(UnitEconomics {
        gross_profit_per_unit: gross,
        operating_income_per_unit: gross - operating_expenses,
        gross_margin_per_unit: checked_percent(gross, revenue, "unit gross margin")?,
    })
}

/// Return on product costs in percent
pub fn product_roi(revenue: f64, costs: f64) -> Result<f64, MetricError> {
    checked_percent(revenue - costs, costs, "product roi")
}

/// Product profit in percent of product revenue
pub fn product_margin(revenue: f64, costs: f64) -> Result<f64, MetricError> {
    checked_percent(revenue - costs, revenue, "product margin")
}
