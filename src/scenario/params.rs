//! Scenario inputs and per-month projection output

use serde::{Deserialize, Serialize};

/// Planning assumptions for one scenario
///
/// Growth, expense growth and expansion are annual percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParams {
    pub sales_growth: f64,
    pub expense_growth: f64,
    pub market_expansion: f64,
    pub headcount: f64,
    pub base_revenue: f64,
    pub base_expenses: f64,
}

impl ScenarioParams {
    pub fn get(&self, field: ScenarioField) -> f64 {
        match field {
            ScenarioField::SalesGrowth => self.sales_growth,
            ScenarioField::ExpenseGrowth => self.expense_growth,
            ScenarioField::MarketExpansion => self.market_expansion,
            ScenarioField::Headcount => self.headcount,
            ScenarioField::BaseRevenue => self.base_revenue,
            ScenarioField::BaseExpenses => self.base_expenses,
        }
    }

    pub fn set(&mut self, field: ScenarioField, value: f64) {
        match field {
            ScenarioField::SalesGrowth => self.sales_growth = value,
            ScenarioField::ExpenseGrowth => self.expense_growth = value,
            ScenarioField::MarketExpansion => self.market_expansion = value,
            ScenarioField::Headcount => self.headcount = value,
            ScenarioField::BaseRevenue => self.base_revenue = value,
            ScenarioField::BaseExpenses => self.base_expenses = value,
        }
    }

    /// Copy with one field scaled by `1 + variation_pct / 100`
    pub fn with_varied(&self, field: ScenarioField, variation_pct: f64) -> Self {
        let mut varied = self.clone();
        varied.set(field, self.get(field) * (1.0 + variation_pct / 100.0));
        varied
    }
}

impl Default for ScenarioParams {
    /// The dashboard's base scenario
    fn default() -> Self {
        Self {
            sales_growth: 10.0,
            expense_growth: 5.0,
            market_expansion: 15.0,
            headcount: 50.0,
            base_revenue: 1_000_000.0,
            base_expenses: 750_000.0,
        }
    }
}

/// The scalar fields of `ScenarioParams`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioField {
    SalesGrowth,
    ExpenseGrowth,
    MarketExpansion,
    Headcount,
    BaseRevenue,
    BaseExpenses,
}

impl ScenarioField {
    pub const ALL: [ScenarioField; 6] = [
        ScenarioField::SalesGrowth,
        ScenarioField::ExpenseGrowth,
        ScenarioField::MarketExpansion,
        ScenarioField::Headcount,
        ScenarioField::BaseRevenue,
        ScenarioField::BaseExpenses,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenarioField::SalesGrowth => "salesGrowth",
            ScenarioField::ExpenseGrowth => "expenseGrowth",
            ScenarioField::MarketExpansion => "marketExpansion",
            ScenarioField::Headcount => "headcount",
            ScenarioField::BaseRevenue => "baseRevenue",
            ScenarioField::BaseExpenses => "baseExpenses",
        }
    }
}

/// Projected results for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedMetrics {
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    pub cash_flow: f64,
    /// Profit over expenses, in percent
    pub roi: f64,
}

/// Totals across a projection horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_months: usize,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_profit: f64,
    pub total_cash_flow: f64,
    pub final_roi: f64,
}

impl ProjectionSummary {
    pub fn from_months(months: &[ProjectedMetrics]) -> Self {
        Self {
            total_months: months.len(),
            total_revenue: months.iter().map(|m| m.revenue).sum(),
            total_expenses: months.iter().map(|m| m.expenses).sum(),
            total_profit: months.iter().map(|m| m.profit).sum(),
            total_cash_flow: months.iter().map(|m| m.cash_flow).sum(),
            final_roi: months.last().map(|m| m.roi).unwrap_or(0.0),
        }
    }
}
