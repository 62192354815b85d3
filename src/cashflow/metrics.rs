//! Net cash flow, liquidity ratios and trend classification

use serde::{Deserialize, Serialize};

use crate::config::TrendThresholds;
use crate::error::MetricError;
use crate::metrics::{checked_div, growth_rate, runway, MetricResult};

/// Monthly cash movements plus the current cash position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowInput {
    pub inflows: Vec<f64>,
    pub outflows: Vec<f64>,
    pub cash_reserves: f64,
    #[serde(alias = "monthlyBurnRate")]
    pub burn_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowMetrics {
    pub inflow: MetricResult,
    pub outflow: MetricResult,
    pub net_cash_flow: MetricResult,
    /// Months of cash left at `burn_rate`
    pub runway: f64,
    pub burn_rate: f64,
    /// Cash reserves less the latest month's outflow
    pub working_capital: f64,
}

/// Calculate headline cash-flow metrics
///
/// Inflow and outflow series must be the same, non-zero length.
pub fn cash_flow_metrics(input: &CashFlowInput) -> Result<CashFlowMetrics, MetricError> {
    if input.inflows.len() != input.outflows.len() {
        return Err(MetricError::LengthMismatch {
            left: input.inflows.len(),
            right: input.outflows.len(),
        });
    }

    let net_flows: Vec<f64> = input
        .inflows
        .iter()
        .zip(&input.outflows)
        .map(|(inflow, outflow)| inflow - outflow)
        .collect();

    let inflow = MetricResult::from_series("inflow", input.inflows.clone())?;
    let outflow = MetricResult::from_series("outflow", input.outflows.clone())?;
    let net_cash_flow = MetricResult::from_series("net cash flow", net_flows)?;

    Ok(CashFlowMetrics {
        runway: runway(input.cash_reserves, input.burn_rate)?,
        burn_rate: input.burn_rate,
        working_capital: input.cash_reserves - outflow.current,
        inflow,
        outflow,
        net_cash_flow,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowRatios {
    /// Total inflow over operating expenses
    pub operating_cash_flow_ratio: f64,
    /// Total inflow over total outflow
    pub cash_flow_coverage_ratio: f64,
    /// Net flow as a fraction of total inflow
    pub cash_flow_to_income_ratio: f64,
}

pub fn cash_flow_ratios(
    inflows: &[f64],
    outflows: &[f64],
    operating_expenses: f64,
) -> Result<CashFlowRatios, MetricError> {
    let total_inflow: f64 = inflows.iter().sum();
    let total_outflow: f64 = outflows.iter().sum();

    Ok(CashFlowRatios {
        operating_cash_flow_ratio: checked_div(total_inflow, operating_expenses, "operating cash flow ratio")?,
        cash_flow_coverage_ratio: checked_div(total_inflow, total_outflow, "cash flow coverage ratio")?,
        cash_flow_to_income_ratio: checked_div(
            total_inflow - total_outflow,
            total_inflow,
            "cash flow to income ratio",
        )?,
    })
}

/// Direction of recent cash flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowTrend {
    Improving,
    Stable,
    Declining,
}

impl TrendThresholds {
    /// Classify the trailing `self.periods` values of `series`
    pub fn classify(&self, series: &[f64]) -> Result<CashFlowTrend, MetricError> {
        let start = series.len().saturating_sub(self.periods);
        let recent = &series[start..];

        if recent.len() < 2 {
            log::debug!("cash flow trend: {} point(s), treating as stable", recent.len());
            return Ok(CashFlowTrend::Stable);
        }

        let mut total = 0.0;
        for pair in recent.windows(2) {
            total += growth_rate(pair[1], pair[0])?;
        }
        let average_growth = total / (recent.len() - 1) as f64;

        Ok(if average_growth > self.improving {
            CashFlowTrend::Improving
        } else if average_growth < self.declining {
            CashFlowTrend::Declining
        } else {
            CashFlowTrend::Stable
        })
    }
}

/// Classify the average growth of the last `periods` values against ±5%
pub fn analyze_cash_flow_trend(series: &[f64], periods: usize) -> Result<CashFlowTrend, MetricError> {
    TrendThresholds {
        periods,
        ..TrendThresholds::default()
    }
    .classify(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_input() -> CashFlowInput {
        CashFlowInput {
            inflows: vec![85_000.0, 92_000.0, 88_000.0, 95_000.0, 98_000.0, 102_000.0],
            outflows: vec![65_000.0, 72_000.0, 70_000.0, 68_000.0, 75_000.0, 78_000.0],
            cash_reserves: 250_000.0,
            burn_rate: 15_000.0,
        }
    }

    #[test]
    fn test_sample_cash_flow() {
        let metrics = cash_flow_metrics(&sample_input()).unwrap();

        assert_eq!(metrics.net_cash_flow.current, 24_000.0);
        assert_eq!(metrics.net_cash_flow.previous, Some(23_000.0));
        assert_relative_eq!(metrics.runway, 16.666_666_666, epsilon = 1e-6);
        assert_eq!(metrics.burn_rate, 15_000.0);
        assert_eq!(metrics.working_capital, 172_000.0);

        assert_eq!(metrics.inflow.current, 102_000.0);
        assert_eq!(metrics.inflow.previous, Some(98_000.0));
        assert_relative_eq!(metrics.inflow.growth.unwrap(), 4.0816, epsilon = 1e-4);
        assert_relative_eq!(metrics.outflow.growth.unwrap(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.net_cash_flow.growth.unwrap(), 4.3478, epsilon = 1e-4);
    }

    #[test]
    fn test_net_flow_is_elementwise_difference() {
        let input = sample_input();
        let metrics = cash_flow_metrics(&input).unwrap();

        assert_eq!(metrics.net_cash_flow.trend.len(), input.inflows.len());
        for (i, net) in metrics.net_cash_flow.trend.iter().enumerate() {
            assert_eq!(*net, input.inflows[i] - input.outflows[i]);
        }
        assert_eq!(metrics.inflow.trend, input.inflows);
        assert_eq!(metrics.outflow.trend, input.outflows);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let mut input = sample_input();
        input.outflows.pop();
        assert_eq!(
            cash_flow_metrics(&input),
            Err(MetricError::LengthMismatch { left: 6, right: 5 })
        );
    }

    #[test]
    fn test_single_month_has_no_growth() {
        let input = CashFlowInput {
            inflows: vec![10_000.0],
            outflows: vec![4_000.0],
            cash_reserves: 50_000.0,
            burn_rate: 5_000.0,
        };
        let metrics = cash_flow_metrics(&input).unwrap();
        assert_eq!(metrics.net_cash_flow.current, 6_000.0);
        assert_eq!(metrics.net_cash_flow.previous, None);
        assert_eq!(metrics.net_cash_flow.growth, None);
    }

    #[test]
    fn test_empty_series_and_zero_burn() {
        let empty = CashFlowInput {
            inflows: Vec::new(),
            outflows: Vec::new(),
            cash_reserves: 1.0,
            burn_rate: 1.0,
        };
        assert!(matches!(
            cash_flow_metrics(&empty),
            Err(MetricError::InsufficientHistory { .. })
        ));

        let mut no_burn = sample_input();
        no_burn.burn_rate = 0.0;
        assert_eq!(
            cash_flow_metrics(&no_burn),
            Err(MetricError::DivisionByZero { metric: "runway" })
        );
    }

    #[test]
    fn test_burn_rate_alias() {
        let raw = r#"{ "inflows": [1.0], "outflows": [0.5], "cashReserves": 10.0, "monthlyBurnRate": 2.0 }"#;
        let input: CashFlowInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input.burn_rate, 2.0);
    }

    #[test]
    fn test_ratios() {
        let input = sample_input();
        let ratios = cash_flow_ratios(&input.inflows, &input.outflows, 45_000.0).unwrap();

        // 560,000 in, 428,000 out
        assert_relative_eq!(ratios.operating_cash_flow_ratio, 560_000.0 / 45_000.0);
        assert_relative_eq!(ratios.cash_flow_coverage_ratio, 560_000.0 / 428_000.0);
        assert_relative_eq!(ratios.cash_flow_to_income_ratio, 132_000.0 / 560_000.0);
    }

    #[test]
    fn test_ratios_zero_denominators() {
        assert!(cash_flow_ratios(&[1.0], &[1.0], 0.0).is_err());
        assert!(cash_flow_ratios(&[1.0], &[], 1.0).is_err());
        assert!(cash_flow_ratios(&[], &[1.0], 1.0).is_err());
    }

    #[test]
    fn test_trend_improving_and_declining() {
        assert_eq!(
            analyze_cash_flow_trend(&[100.0, 110.0, 121.0], 3).unwrap(),
            CashFlowTrend::Improving
        );
        assert_eq!(
            analyze_cash_flow_trend(&[100.0, 90.0, 81.0], 3).unwrap(),
            CashFlowTrend::Declining
        );
        assert_eq!(
            analyze_cash_flow_trend(&[100.0, 101.0, 102.0], 3).unwrap(),
            CashFlowTrend::Stable
        );
    }

    #[test]
    fn test_trend_boundaries_are_stable() {
        // Exactly +5% and -5% average growth
        assert_eq!(
            analyze_cash_flow_trend(&[100.0, 105.0], 3).unwrap(),
            CashFlowTrend::Stable
        );
        assert_eq!(
            analyze_cash_flow_trend(&[100.0, 95.0], 3).unwrap(),
            CashFlowTrend::Stable
        );
        assert_eq!(
            analyze_cash_flow_trend(&[100.0, 105.5], 3).unwrap(),
            CashFlowTrend::Improving
        );
        assert_eq!(
            analyze_cash_flow_trend(&[100.0, 94.5], 3).unwrap(),
            CashFlowTrend::Declining
        );
    }

    #[test]
    fn test_trend_uses_trailing_window_only() {
        // Early collapse is outside the last three periods
        let series = [500.0, 100.0, 110.0, 121.0];
        assert_eq!(analyze_cash_flow_trend(&series, 3).unwrap(), CashFlowTrend::Improving);
        assert_eq!(analyze_cash_flow_trend(&series, 4).unwrap(), CashFlowTrend::Declining);
    }

    #[test]
    fn test_trend_short_history_is_stable() {
        assert_eq!(analyze_cash_flow_trend(&[], 3).unwrap(), CashFlowTrend::Stable);
        assert_eq!(analyze_cash_flow_trend(&[42.0], 3).unwrap(), CashFlowTrend::Stable);
        assert_eq!(analyze_cash_flow_trend(&[1.0, 2.0], 1).unwrap(), CashFlowTrend::Stable);
    }

    #[test]
    fn test_trend_zero_base_fails() {
        assert!(analyze_cash_flow_trend(&[0.0, 10.0, 20.0], 3).is_err());
    }

    #[test]
    fn test_sample_net_flow_trend() {
        let metrics = cash_flow_metrics(&sample_input()).unwrap();
        // 27k -> 23k -> 24k averages about -5.2%
        assert_eq!(
            analyze_cash_flow_trend(&metrics.net_cash_flow.trend, 3).unwrap(),
            CashFlowTrend::Declining
        );
        assert_eq!(
            analyze_cash_flow_trend(&metrics.inflow.trend, 3).unwrap(),
            CashFlowTrend::Stable
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = TrendThresholds {
            improving: 1.0,
            declining: -1.0,
            periods: 3,
        };
        assert_eq!(strict.classify(&[100.0, 101.0, 103.0]).unwrap(), CashFlowTrend::Improving);
    }
}
