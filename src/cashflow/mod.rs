//! Cash flow engine: net flow, liquidity ratios, trend and expense schedule

mod metrics;
mod expenses;

pub use metrics::{
    analyze_cash_flow_trend, cash_flow_metrics, cash_flow_ratios, CashFlowInput, CashFlowMetrics,
    CashFlowRatios, CashFlowTrend,
};
pub use expenses::{
    expense_projections, expenses_by_category, pending_total, ExpenseRecord, ExpenseStatus,
};
