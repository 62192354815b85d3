//! Growth, percentage, margin and income-statement primitives

use crate::error::MetricError;

/// Divide, reporting a zero denominator or a non-finite quotient as an error
/// for `metric`
pub(crate) fn checked_div(numerator: f64, denominator: f64, metric: &'static str) -> Result<f64, MetricError> {
    if denominator == 0.0 {
        log::debug!("{}: zero denominator", metric);
        return Err(MetricError::DivisionByZero { metric });
    }
    let quotient = numerator / denominator;
    if !quotient.is_finite() {
        log::debug!("{}: {} / {} is not finite", metric, numerator, denominator);
        return Err(MetricError::DivisionByZero { metric });
    }
    Ok(quotient)
}

/// `checked_div` scaled to percent, still rejecting a non-finite result
pub(crate) fn checked_percent(numerator: f64, denominator: f64, metric: &'static str) -> Result<f64, MetricError> {
    let percent = checked_div(numerator, denominator, metric)? * 100.0;
    if !percent.is_finite() {
        return Err(MetricError::DivisionByZero { metric });
    }
    Ok(percent)
}

/// Period-over-period growth in percent: `(current - previous) / previous * 100`
pub fn growth_rate(current: f64, previous: f64) -> Result<f64, MetricError> {
    checked_percent(current - previous, previous, "growth rate")
}

/// `part` as a percentage of `total`
pub fn percentage(part: f64, total: f64) -> Result<f64, MetricError> {
    checked_percent(part, total, "percentage")
}

pub fn gross_profit(revenue: f64, cogs: f64) -> f64 {
    revenue - cogs
}

/// Gross margin in percent of revenue
pub fn gross_margin(revenue: f64, cogs: f64) -> Result<f64, MetricError> {
    checked_percent(revenue - cogs, revenue, "gross margin")
}

pub fn operating_income(revenue: f64, cogs: f64, operating_expenses: f64) -> f64 {
    revenue - cogs - operating_expenses
}

pub fn net_income(
    revenue: f64,
    cogs: f64,
    operating_expenses: f64,
    other_expenses: f64,
    taxes: f64,
) -> f64 {
    revenue - cogs - operating_expenses - other_expenses - taxes
}

/// Net income in percent of revenue
pub fn profit_margin(net_income: f64, revenue: f64) -> Result<f64, MetricError> {
    checked_percent(net_income, revenue, "profit margin")
}

pub fn free_cash_flow(operating_cash_flow: f64, capital_expenditures: f64) -> f64 {
    operating_cash_flow - capital_expenditures
}

/// Average monthly cash consumed between two balances
pub fn cash_burn_rate(starting_cash: f64, ending_cash: f64, months: u32) -> Result<f64, MetricError> {
    checked_div(starting_cash - ending_cash, months as f64, "cash burn rate")
}

/// Months of operation left at the given monthly burn
pub fn runway(cash_balance: f64, monthly_burn_rate: f64) -> Result<f64, MetricError> {
    checked_div(cash_balance, monthly_burn_rate, "runway")
}
