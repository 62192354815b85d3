//! Headline dashboard cards

use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::metrics::{cac, growth_rate, ltv, moving_average, profit_margin, roas};

use super::TREND_WINDOW;

/// Current and previous value of a metric plus its monthly history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSeries {
    pub current: f64,
    pub previous: f64,
    #[serde(default)]
    pub historical: Vec<f64>,
}

impl PeriodSeries {
    /// Growth over the previous period, `None` when the previous value is zero
    fn growth(&self) -> Option<f64> {
        growth_rate(self.current, self.previous).ok()
    }
}

/// Marketing inputs for the dashboard; margin and churn are fractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingInput {
    pub spend: f64,
    pub revenue: f64,
    pub new_customers: f64,
    pub average_revenue: f64,
    pub gross_margin: f64,
    pub churn_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardInput {
    pub revenue: PeriodSeries,
    pub costs: PeriodSeries,
    pub users: PeriodSeries,
    pub marketing: MarketingInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueCard {
    pub current: f64,
    pub growth: Option<f64>,
    pub trend: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitCard {
    pub current: f64,
    pub growth: Option<f64>,
    pub margin: f64,
    pub trend: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersCard {
    pub active: f64,
    pub growth: Option<f64>,
    /// Net new users in percent of the previous period's base
    pub acquisition: Option<f64>,
    pub trend: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingCard {
    pub cac: f64,
    pub ltv: f64,
    pub roas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub revenue: RevenueCard,
    pub profit: ProfitCard,
    pub users: UsersCard,
    pub marketing: MarketingCard,
}

/// Build the headline cards
///
/// Profit is revenue minus costs, so the two histories must line up month
/// for month. CAC treats the marketing spend as the whole acquisition cost.
pub fn dashboard_metrics(input: &DashboardInput) -> Result<DashboardMetrics, MetricError> {
    let revenue = &input.revenue;
    let costs = &input.costs;
    if revenue.historical.len() != costs.historical.len() {
        return Err(MetricError::LengthMismatch {
            left: revenue.historical.len(),
            right: costs.historical.len(),
        });
    }

    let current_profit = revenue.current - costs.current;
    let previous_profit = revenue.previous - costs.previous;
    let profit_history: Vec<f64> = revenue
        .historical
        .iter()
        .zip(&costs.historical)
        .map(|(rev, cost)| rev - cost)
        .collect();

    let users = &input.users;
    let user_growth = users.growth();

    let marketing = &input.marketing;

    Ok(DashboardMetrics {
        revenue: RevenueCard {
            current: revenue.current,
            growth: revenue.growth(),
            trend: moving_average(&revenue.historical, TREND_WINDOW)?,
        },
        profit: ProfitCard {
            current: current_profit,
            growth: growth_rate(current_profit, previous_profit).ok(),
            margin: profit_margin(current_profit, revenue.current)?,
            trend: moving_average(&profit_history, TREND_WINDOW)?,
        },
        users: UsersCard {
            active: users.current,
            growth: user_growth,
            acquisition: user_growth,
            trend: moving_average(&users.historical, TREND_WINDOW)?,
        },
        marketing: MarketingCard {
            cac: cac(marketing.spend, 0.0, marketing.new_customers)?,
            ltv: ltv(marketing.average_revenue, marketing.gross_margin, marketing.churn_rate)?,
            roas: roas(marketing.revenue, marketing.spend)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_input() -> DashboardInput {
        DashboardInput {
            revenue: PeriodSeries {
                current: 91_000.0,
                previous: 82_000.0,
                historical: vec![65_000.0, 72_000.0, 68_000.0, 78_000.0, 82_000.0, 91_000.0],
            },
            costs: PeriodSeries {
                current: 59_000.0,
                previous: 53_000.0,
                historical: vec![42_000.0, 47_000.0, 46_000.0, 51_000.0, 53_000.0, 59_000.0],
            },
            users: PeriodSeries {
                current: 1950.0,
                previous: 1790.0,
                historical: vec![1200.0, 1350.0, 1480.0, 1620.0, 1790.0, 1950.0],
            },
            marketing: MarketingInput {
                spend: 15_000.0,
                revenue: 91_000.0,
                new_customers: 380.0,
                average_revenue: 250.0,
                gross_margin: 0.65,
                churn_rate: 0.08,
            },
        }
    }

    #[test]
    fn test_revenue_card() {
        let metrics = dashboard_metrics(&sample_input()).unwrap();
        assert_relative_eq!(metrics.revenue.growth.unwrap(), 11.0, epsilon = 0.05);
        assert_eq!(metrics.revenue.trend.len(), 4);
        assert_relative_eq!(metrics.revenue.trend[0], 205_000.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_profit_card() {
        let metrics = dashboard_metrics(&sample_input()).unwrap();
        assert_relative_eq!(metrics.profit.current, 32_000.0);
        assert_relative_eq!(metrics.profit.growth.unwrap(), 3_000.0 / 29_000.0 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.profit.margin, 32_000.0 / 91_000.0 * 100.0, epsilon = 1e-9);
        // Profits 23k, 25k, 22k, 27k, 29k, 32k
        assert_relative_eq!(metrics.profit.trend[0], 70_000.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.profit.trend[3], 88_000.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_users_and_marketing_cards() {
        let metrics = dashboard_metrics(&sample_input()).unwrap();
        let growth = 160.0 / 1790.0 * 100.0;
        assert_relative_eq!(metrics.users.growth.unwrap(), growth, epsilon = 1e-9);
        assert_relative_eq!(metrics.users.acquisition.unwrap(), growth, epsilon = 1e-9);
        assert_relative_eq!(metrics.marketing.cac, 15_000.0 / 380.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.marketing.ltv, 2031.25, epsilon = 1e-9);
        assert_relative_eq!(metrics.marketing.roas, 91_000.0 / 15_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_previous_has_no_growth() {
        let mut input = sample_input();
        input.users.previous = 0.0;
        let metrics = dashboard_metrics(&input).unwrap();
        assert_eq!(metrics.users.growth, None);
        assert_eq!(metrics.users.acquisition, None);
    }

    #[test]
    fn test_misaligned_histories() {
        let mut input = sample_input();
        input.costs.historical.pop();
        assert_eq!(
            dashboard_metrics(&input),
            Err(MetricError::LengthMismatch { left: 6, right: 5 })
        );
    }

    #[test]
    fn test_short_history_has_empty_trend() {
        let mut input = sample_input();
        input.revenue.historical = vec![82_000.0, 91_000.0];
        input.costs.historical = vec![53_000.0, 59_000.0];
        let metrics = dashboard_metrics(&input).unwrap();
        assert!(metrics.revenue.trend.is_empty());
        assert!(metrics.profit.trend.is_empty());
    }
}
