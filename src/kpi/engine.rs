//! KPI calculation against configurable targets and historical trend

use serde::{Deserialize, Serialize};

use crate::config::KpiConfig;
use crate::error::MetricError;
use crate::metrics::{self, checked_div, latest_growth};

use super::status::{kpi_status, KpiStatus};

/// Raw monthly figures the KPIs are derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiInput {
    pub marketing_spend: f64,
    #[serde(default)]
    pub sales_expenses: f64,
    pub new_customers: f64,
    pub revenue: f64,
    /// Paid media spend; falls back to `marketing_spend` when absent
    #[serde(default)]
    pub ad_spend: Option<f64>,
    pub churned_customers: f64,
    pub total_customers: f64,
    pub conversions: f64,
    pub visitors: f64,
}

/// One historical period of KPI values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub cac: f64,
    pub ltv: f64,
    pub roas: f64,
    pub mrr: f64,
    pub churn: f64,
    pub conversion: f64,
}

/// Names of the tracked KPIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiKind {
    Cac,
    Ltv,
    Roas,
    Mrr,
    Churn,
    Conversion,
}

impl KpiKind {
    pub const ALL: [KpiKind; 6] = [
        KpiKind::Cac,
        KpiKind::Ltv,
        KpiKind::Roas,
        KpiKind::Mrr,
        KpiKind::Churn,
        KpiKind::Conversion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KpiKind::Cac => "cac",
            KpiKind::Ltv => "ltv",
            KpiKind::Roas => "roas",
            KpiKind::Mrr => "mrr",
            KpiKind::Churn => "churn",
            KpiKind::Conversion => "conversion",
        }
    }

    /// Select this KPI's value from a snapshot
    pub fn value(self, snapshot: &KpiSnapshot) -> f64 {
        match self {
            KpiKind::Cac => snapshot.cac,
            KpiKind::Ltv => snapshot.ltv,
            KpiKind::Roas => snapshot.roas,
            KpiKind::Mrr => snapshot.mrr,
            KpiKind::Churn => snapshot.churn,
            KpiKind::Conversion => snapshot.conversion,
        }
    }
}

/// Current value of a KPI with its benchmark and recent movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiValue {
    pub current: f64,
    pub target: f64,
    /// Growth in percent between the last two historical periods
    pub trend: Option<f64>,
}

impl KpiValue {
    pub fn status(&self, threshold: f64) -> Result<KpiStatus, MetricError> {
        kpi_status(self.current, self.target, threshold)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiMetrics {
    pub cac: KpiValue,
    pub ltv: KpiValue,
    pub roas: KpiValue,
    pub mrr: KpiValue,
    pub churn: KpiValue,
    pub conversion: KpiValue,
}

impl KpiMetrics {
    pub fn get(&self, kind: KpiKind) -> &KpiValue {
        match kind {
            KpiKind::Cac => &self.cac,
            KpiKind::Ltv => &self.ltv,
            KpiKind::Roas => &self.roas,
            KpiKind::Mrr => &self.mrr,
            KpiKind::Churn => &self.churn,
            KpiKind::Conversion => &self.conversion,
        }
    }
}

/// Growth between the last two history entries for one KPI
pub fn kpi_trend(history: &[KpiSnapshot], kind: KpiKind) -> Option<f64> {
    let series: Vec<f64> = history.iter().map(|s| kind.value(s)).collect();
    let trend = latest_growth(&series);
    if trend.is_none() {
        log::debug!("{} trend undefined over {} period(s)", kind.name(), history.len());
    }
    trend
}

/// KPI engine bound to a set of targets
#[derive(Debug, Clone, Default)]
pub struct KpiEngine {
    config: KpiConfig,
}

impl KpiEngine {
    pub fn new(config: KpiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KpiConfig {
        &self.config
    }

    /// Calculate all six KPIs for the latest period
    pub fn calculate(&self, input: &KpiInput, history: &[KpiSnapshot]) -> Result<KpiMetrics, MetricError> {
        let targets = &self.config.targets;

        let cac = metrics::cac(input.marketing_spend, input.sales_expenses, input.new_customers)?;

        let average_revenue = checked_div(input.revenue, input.total_customers, "revenue per customer")?;
        let churn_fraction = checked_div(input.churned_customers, input.total_customers, "churn rate")?;
        let ltv = metrics::ltv(average_revenue, self.config.ltv_gross_margin, churn_fraction)?;

        let ad_spend = input.ad_spend.unwrap_or(input.marketing_spend);
        let roas = metrics::roas(input.revenue, ad_spend)?;

        let churn = metrics::churn_rate(input.churned_customers, input.total_customers)?;
        let conversion = metrics::conversion_rate(input.conversions, input.visitors)?;

        let value = |current: f64, target: f64, kind: KpiKind| KpiValue {
            current,
            target,
            trend: kpi_trend(history, kind),
        };

        Ok(KpiMetrics {
            cac: value(cac, targets.cac, KpiKind::Cac),
            ltv: value(ltv, targets.ltv, KpiKind::Ltv),
            roas: value(roas, targets.roas, KpiKind::Roas),
            mrr: value(input.revenue, targets.mrr, KpiKind::Mrr),
            churn: value(churn, targets.churn, KpiKind::Churn),
            conversion: value(conversion, targets.conversion, KpiKind::Conversion),
        })
    }
}

/// Calculate KPIs against the default targets
pub fn kpi_metrics(input: &KpiInput, history: &[KpiSnapshot]) -> Result<KpiMetrics, MetricError> {
    KpiEngine::default().calculate(input, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KpiTargets;
    use approx::assert_relative_eq;

    fn sample_input() -> KpiInput {
        KpiInput {
            marketing_spend: 50_000.0,
            sales_expenses: 0.0,
            new_customers: 500.0,
            revenue: 145_000.0,
            ad_spend: None,
            churned_customers: 75.0,
            total_customers: 5000.0,
            conversions: 190.0,
            visitors: 5000.0,
        }
    }

    fn sample_history() -> Vec<KpiSnapshot> {
        vec![
            KpiSnapshot { cac: 110.0, ltv: 950.0, roas: 3.6, mrr: 135_000.0, churn: 1.8, conversion: 3.6 },
            KpiSnapshot { cac: 105.0, ltv: 980.0, roas: 3.8, mrr: 140_000.0, churn: 1.7, conversion: 3.7 },
            KpiSnapshot { cac: 100.0, ltv: 1020.0, roas: 4.0, mrr: 145_000.0, churn: 1.5, conversion: 3.8 },
        ]
    }

    #[test]
    fn test_sample_kpis() {
        let kpis = kpi_metrics(&sample_input(), &sample_history()).unwrap();

        assert_relative_eq!(kpis.cac.current, 100.0);
        // 29 revenue per customer * 0.65 margin / 1.5% churn
        assert_relative_eq!(kpis.ltv.current, 1256.666_666, epsilon = 1e-5);
        assert!(kpis.ltv.current > kpis.cac.current);
        assert_relative_eq!(kpis.roas.current, 2.9, epsilon = 1e-9);
        assert_eq!(kpis.mrr.current, 145_000.0);
        assert_relative_eq!(kpis.churn.current, 1.5, epsilon = 1e-9);
        assert_relative_eq!(kpis.conversion.current, 3.8, epsilon = 1e-9);
    }

    #[test]
    fn test_sales_expenses_and_ad_spend() {
        let mut input = sample_input();
        input.sales_expenses = 10_000.0;
        input.ad_spend = Some(29_000.0);

        let kpis = kpi_metrics(&input, &[]).unwrap();
        assert_relative_eq!(kpis.cac.current, 120.0);
        assert_relative_eq!(kpis.roas.current, 5.0);
    }

    #[test]
    fn test_default_targets() {
        let kpis = kpi_metrics(&sample_input(), &sample_history()).unwrap();
        assert_eq!(kpis.cac.target, 95.0);
        assert_eq!(kpis.ltv.target, 1000.0);
        assert_eq!(kpis.roas.target, 3.5);
        assert_eq!(kpis.mrr.target, 150_000.0);
        assert_eq!(kpis.churn.target, 2.0);
        assert_eq!(kpis.conversion.target, 4.0);
    }

    #[test]
    fn test_configured_targets_and_margin() {
        let config = KpiConfig {
            targets: KpiTargets {
                mrr: 200_000.0,
                ..KpiTargets::default()
            },
            ltv_gross_margin: 0.5,
            ..KpiConfig::default()
        };
        let kpis = KpiEngine::new(config).calculate(&sample_input(), &[]).unwrap();

        assert_eq!(kpis.mrr.target, 200_000.0);
        assert_relative_eq!(kpis.ltv.current, 29.0 * 0.5 / 0.015, epsilon = 1e-6);
    }

    #[test]
    fn test_trends_from_last_two_periods() {
        let kpis = kpi_metrics(&sample_input(), &sample_history()).unwrap();

        assert_relative_eq!(kpis.cac.trend.unwrap(), -4.7619, epsilon = 1e-4);
        assert_relative_eq!(kpis.ltv.trend.unwrap(), 4.0816, epsilon = 1e-4);
        assert_relative_eq!(kpis.roas.trend.unwrap(), 5.2631, epsilon = 1e-4);
        assert_relative_eq!(kpis.mrr.trend.unwrap(), 3.5714, epsilon = 1e-4);
        assert_relative_eq!(kpis.churn.trend.unwrap(), -11.7647, epsilon = 1e-4);
        assert_relative_eq!(kpis.conversion.trend.unwrap(), 2.7027, epsilon = 1e-4);
    }

    #[test]
    fn test_short_history_leaves_trend_undefined() {
        let history = sample_history();
        for len in 0..2 {
            let kpis = kpi_metrics(&sample_input(), &history[..len]).unwrap();
            for kind in KpiKind::ALL {
                assert_eq!(kpis.get(kind).trend, None, "{} with {} periods", kind.name(), len);
            }
        }
    }

    #[test]
    fn test_zero_denominators_fail() {
        let mut no_customers = sample_input();
        no_customers.new_customers = 0.0;
        assert_eq!(
            kpi_metrics(&no_customers, &[]),
            Err(MetricError::DivisionByZero { metric: "cac" })
        );

        let mut no_churn = sample_input();
        no_churn.churned_customers = 0.0;
        assert_eq!(
            kpi_metrics(&no_churn, &[]),
            Err(MetricError::DivisionByZero { metric: "ltv" })
        );

        let mut no_visitors = sample_input();
        no_visitors.visitors = 0.0;
        assert!(kpi_metrics(&no_visitors, &[]).is_err());
    }

    #[test]
    fn test_kpi_status_from_value() {
        let kpis = kpi_metrics(&sample_input(), &sample_history()).unwrap();
        assert_eq!(kpis.mrr.status(80.0).unwrap(), KpiStatus::Warning);
        assert_eq!(kpis.ltv.status(80.0).unwrap(), KpiStatus::Success);
        assert_eq!(kpis.roas.status(90.0).unwrap(), KpiStatus::Danger);
    }

    #[test]
    fn test_history_from_json() {
        let raw = r#"[{ "cac": 110, "ltv": 950, "roas": 3.6, "mrr": 135000, "churn": 1.8, "conversion": 3.6 }]"#;
        let history: Vec<KpiSnapshot> = serde_json::from_str(raw).unwrap();
        assert_eq!(KpiKind::Mrr.value(&history[0]), 135_000.0);
    }
}
