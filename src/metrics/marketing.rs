//! Customer acquisition, retention and channel efficiency ratios

use crate::error::MetricError;
use serde::{Deserialize, Serialize};

use super::primitives::{checked_div, checked_percent};

/// Customer acquisition cost: total acquisition spend per new customer
pub fn cac(marketing_expenses: f64, sales_expenses: f64, new_customers: f64) -> Result<f64, MetricError> {
    checked_div(marketing_expenses + sales_expenses, new_customers, "cac")
}

/// Customer lifetime value
///
/// `gross_margin` and `churn_rate` are fractions, not percentages.
pub fn ltv(average_revenue: f64, gross_margin: f64, churn_rate: f64) -> Result<f64, MetricError> {
    checked_div(average_revenue * gross_margin, churn_rate, "ltv")
}

/// Return on ad spend
pub fn roas(revenue: f64, ad_spend: f64) -> Result<f64, MetricError> {
    checked_div(revenue, ad_spend, "roas")
}

/// Conversion rate in percent of visitors
pub fn conversion_rate(conversions: f64, total_visitors: f64) -> Result<f64, MetricError> {
    checked_percent(conversions, total_visitors, "conversion rate")
}

/// Churn rate in percent of the customer base
pub fn churn_rate(customers_lost: f64, total_customers: f64) -> Result<f64, MetricError> {
    checked_percent(customers_lost, total_customers, "churn rate")
}

/// Spend and results of one marketing channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPerformance {
    pub name: String,
    pub spend: f64,
    pub revenue: f64,
    pub conversions: f64,
}

impl ChannelPerformance {
    /// Cost per acquisition for this channel
    pub fn cpa(&self) -> Result<f64, MetricError> {
        checked_div(self.spend, self.conversions, "cpa")
    }
}

/// Totals across all channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub total_spend: f64,
    pub total_revenue: f64,
    pub total_conversions: f64,
    /// `(revenue - spend) / spend * 100`
    pub average_roi: f64,
    pub blended_cpa: f64,
    pub blended_roas: f64,
}

/// Roll channel performance up into blended totals
pub fn channel_summary(channels: &[ChannelPerformance]) -> Result<ChannelSummary, MetricError> {
    let total_spend: f64 = channels.iter().map(|c| c.spend).sum();
    let total_revenue: f64 = channels.iter().map(|c| c.revenue).sum();
    let total_conversions: f64 = channels.iter().map(|c| c.conversions).sum();

    Ok(ChannelSummary {
        total_spend,
        total_revenue,
        total_conversions,
        average_roi: checked_percent(total_revenue - total_spend, total_spend, "average roi")?,
        blended_cpa: checked_div(total_spend, total_conversions, "cpa")?,
        blended_roas: roas(total_revenue, total_spend)?,
    })
}
