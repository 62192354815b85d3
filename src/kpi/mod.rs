//! KPI engine: CAC, LTV, ROAS, MRR, churn and conversion against targets

mod engine;
mod status;

pub use engine::{kpi_metrics, kpi_trend, KpiEngine, KpiInput, KpiKind, KpiMetrics, KpiSnapshot, KpiValue};
pub use status::{kpi_status, KpiStatus};
