//! Per-month revenue and customer trend series

use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::metrics::{moving_average, percentage, period_growth_rates, profit_margin};

use super::TREND_WINDOW;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub revenue: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCustomers {
    pub active: f64,
    #[serde(rename = "new")]
    pub new_customers: f64,
}

/// Revenue trend series; `None` entries mark months with a zero base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMetrics {
    pub revenue_ma: Vec<f64>,
    pub profit_ma: Vec<f64>,
    pub revenue_growth_rates: Vec<Option<f64>>,
    pub profit_margins: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMetrics {
    pub active_growth_rates: Vec<Option<f64>>,
    /// New customers in percent of active customers
    pub acquisition_rates: Vec<Option<f64>>,
}

pub fn revenue_metrics(monthly: &[MonthlyRevenue]) -> Result<RevenueMetrics, MetricError> {
    let revenues: Vec<f64> = monthly.iter().map(|m| m.revenue).collect();
    let profits: Vec<f64> = monthly.iter().map(|m| m.profit).collect();

    Ok(RevenueMetrics {
        revenue_ma: moving_average(&revenues, TREND_WINDOW)?,
        profit_ma: moving_average(&profits, TREND_WINDOW)?,
        revenue_growth_rates: period_growth_rates(&revenues),
        profit_margins: monthly.iter().map(|m| profit_margin(m.profit, m.revenue).ok()).collect(),
    })
}

pub fn customer_metrics(monthly: &[MonthlyCustomers]) -> CustomerMetrics {
    let active: Vec<f64> = monthly.iter().map(|m| m.active).collect();

    CustomerMetrics {
        active_growth_rates: period_growth_rates(&active),
        acquisition_rates: monthly
            .iter()
            .map(|m| percentage(m.new_customers, m.active).ok())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_revenue_metrics() {
        let monthly: Vec<MonthlyRevenue> = [(100.0, 20.0), (110.0, 22.0), (121.0, 30.25), (0.0, -5.0)]
            .iter()
            .map(|&(revenue, profit)| MonthlyRevenue { revenue, profit })
            .collect();
        let metrics = revenue_metrics(&monthly).unwrap();

        assert_eq!(metrics.revenue_ma.len(), 2);
        assert_relative_eq!(metrics.revenue_ma[0], 110.333_333_333_333_33, epsilon = 1e-9);
        assert_relative_eq!(metrics.profit_ma[1], 47.25 / 3.0, epsilon = 1e-9);

        assert_eq!(metrics.revenue_growth_rates[0], Some(0.0));
        assert_relative_eq!(metrics.revenue_growth_rates[1].unwrap(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.revenue_growth_rates[3].unwrap(), -100.0, epsilon = 1e-9);

        assert_relative_eq!(metrics.profit_margins[0].unwrap(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.profit_margins[2].unwrap(), 25.0, epsilon = 1e-9);
        assert_eq!(metrics.profit_margins[3], None);
    }

    #[test]
    fn test_customer_metrics() {
        let monthly = [
            MonthlyCustomers { active: 1200.0, new_customers: 180.0 },
            MonthlyCustomers { active: 1350.0, new_customers: 210.0 },
            MonthlyCustomers { active: 0.0, new_customers: 0.0 },
            MonthlyCustomers { active: 1480.0, new_customers: 148.0 },
        ];
        let metrics = customer_metrics(&monthly);

        assert_eq!(metrics.active_growth_rates[0], Some(0.0));
        assert_relative_eq!(metrics.active_growth_rates[1].unwrap(), 12.5, epsilon = 1e-9);
        assert_eq!(metrics.active_growth_rates[3], None);

        assert_relative_eq!(metrics.acquisition_rates[0].unwrap(), 15.0, epsilon = 1e-9);
        assert_eq!(metrics.acquisition_rates[2], None);
        assert_relative_eq!(metrics.acquisition_rates[3].unwrap(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_monthly_customers_json_key() {
        let row: MonthlyCustomers = serde_json::from_str(r#"{ "active": 10, "new": 2 }"#).unwrap();
        assert_relative_eq!(row.new_customers, 2.0);
    }

    #[test]
    fn test_empty_months() {
        let metrics = revenue_metrics(&[]).unwrap();
        assert!(metrics.revenue_ma.is_empty());
        assert!(metrics.revenue_growth_rates.is_empty());
        assert!(customer_metrics(&[]).acquisition_rates.is_empty());
    }
}
