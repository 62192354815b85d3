//! Dashboard roll-ups over the core primitives
//!
//! `headline` builds the top-of-dashboard cards from current, previous and
//! historical values; `monthly` derives per-month trend series.

mod headline;
mod monthly;

pub use headline::{
    dashboard_metrics, DashboardInput, DashboardMetrics, MarketingCard, MarketingInput, PeriodSeries,
    ProfitCard, RevenueCard, UsersCard,
};
pub use monthly::{
    customer_metrics, revenue_metrics, CustomerMetrics, MonthlyCustomers, MonthlyRevenue, RevenueMetrics,
};

/// Window of the dashboard trend lines
pub const TREND_WINDOW: usize = 3;
