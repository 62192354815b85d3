//! Business analytics calculation engine
//!
//! This library provides:
//! - Growth, margin, income-statement and marketing ratio primitives
//! - Cash-flow metrics, ratios, trend classification and expense projection
//! - KPI calculation against configurable targets
//! - Scenario projections, sensitivity analysis, risk adjustment and break-even
//! - Compounding, seasonal and market-condition forecasts
//! - Unit economics and dashboard roll-ups
//!
//! Every calculation is a pure function of its inputs. Raw series come from a
//! [`source::DataSource`] chosen by the caller.

pub mod error;
pub mod config;
pub mod metrics;
pub mod cashflow;
pub mod kpi;
pub mod scenario;
pub mod forecast;
pub mod unit_economics;
pub mod dashboard;
pub mod source;

// Re-export commonly used types
pub use error::{ConfigError, MetricError, SourceError};
pub use config::{AnalyticsConfig, KpiConfig, KpiTargets, ScenarioAssumptions, TrendThresholds};
pub use metrics::{
    cac, growth_rate, gross_margin, ltv, moving_average, percentage, profit_margin, roas, runway,
    MetricResult,
};
pub use cashflow::{
    analyze_cash_flow_trend, cash_flow_metrics, cash_flow_ratios, expense_projections, CashFlowInput,
    CashFlowMetrics, CashFlowRatios, CashFlowTrend, ExpenseRecord,
};
pub use kpi::{kpi_metrics, kpi_status, KpiEngine, KpiInput, KpiMetrics, KpiSnapshot, KpiStatus};
pub use scenario::{
    break_even_point, risk_adjusted_metrics, scenario_projections, sensitivity_analysis,
    ProjectedMetrics, ScenarioEngine, ScenarioParams, ScenarioRunner,
};
pub use forecast::{linear_projection, market_forecast, seasonal_projection, ForecastParams};
pub use unit_economics::{product_margin, product_roi, unit_economics, UnitEconomics};
pub use dashboard::{customer_metrics, dashboard_metrics, revenue_metrics, DashboardMetrics};
pub use source::{CsvSource, DataSource, InMemorySource};
