//! Revenue and expense forecast under growth, seasonality and market conditions

use serde::{Deserialize, Serialize};

use super::trend::seasonal_adjustment;

/// Forecast drivers, all in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastParams {
    pub growth_rate: f64,
    pub seasonality: f64,
    pub market_condition: f64,
    pub months: usize,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            growth_rate: 12.0,
            seasonality: 5.0,
            market_condition: 3.0,
            months: 12,
        }
    }
}

/// One forecast month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// 1-based month offset from the last actual month
    pub offset: usize,
    /// Calendar month number (1-12)
    pub month: u32,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Expense growth as a share of revenue growth
const EXPENSE_GROWTH_SHARE: f64 = 0.7;

/// Forecast forward from the last actual month's revenue and expenses
///
/// Revenue grows linearly with `offset / 12`, carries a sine seasonality keyed
/// on the calendar month, and a flat market-condition uplift. Expenses ramp
/// linearly from zero with `offset / 12`.
pub fn market_forecast(last_revenue: f64, last_expenses: f64, params: &ForecastParams) -> Vec<ForecastPoint> {
    let market_factor = 1.0 + params.market_condition / 100.0;

    (1..=params.months)
        .map(|offset| {
            let month = match offset % 12 {
                0 => 12,
                m => m,
            };
            let elapsed = offset as f64 / 12.0;

            let seasonal_factor = 1.0 + seasonal_adjustment(month) * (params.seasonality / 100.0);
            let growth_factor = 1.0 + params.growth_rate / 100.0 * elapsed;

            let revenue = last_revenue * growth_factor * seasonal_factor * market_factor;
            let expenses = last_expenses * (1.0 + params.growth_rate * EXPENSE_GROWTH_SHARE / 100.0) * elapsed;

            ForecastPoint {
                offset,
                month: month as u32,
                revenue,
                expenses,
                profit: revenue - expenses,
            }
        })
        .collect()
}

/// Growth in percent of the final forecast revenue over the last actual
pub fn forecast_growth(last_revenue: f64, forecast: &[ForecastPoint]) -> Option<f64> {
    forecast
        .last()
        .and_then(|point| crate::metrics::growth_rate(point.revenue, last_revenue).ok())
}
