//! Core math primitives shared by every engine

mod primitives;
mod series;
mod marketing;

pub(crate) use self::primitives::{checked_div, checked_percent};
pub use self::primitives::{
    cash_burn_rate, free_cash_flow, gross_margin, gross_profit, growth_rate, net_income,
    operating_income, percentage, profit_margin, runway,
};
pub use series::{last_two, latest_growth, moving_average, period_growth_rates, MetricResult};
pub use marketing::{
    cac, channel_summary, churn_rate, conversion_rate, ltv, roas, ChannelPerformance,
    ChannelSummary,
};
