//! Time-series helpers and the `MetricResult` record

use crate::error::MetricError;
use serde::{Deserialize, Serialize};

use super::primitives::growth_rate;

/// A headline metric with its prior value, growth and full history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricResult {
    /// Latest value in the series
    pub current: f64,

    /// Second-to-last value, if the series has one
    pub previous: Option<f64>,

    /// Growth of `current` over `previous` in percent; `None` when there is
    /// no previous value or it is zero
    pub growth: Option<f64>,

    /// The series the metric was derived from
    pub trend: Vec<f64>,
}

impl MetricResult {
    /// Build from a non-empty series
    pub fn from_series(metric: &'static str, series: Vec<f64>) -> Result<Self, MetricError> {
        let (current, previous) = last_two(&series);
        let current = current.ok_or(MetricError::InsufficientHistory {
            metric,
            required: 1,
            actual: 0,
        })?;
        Ok(Self {
            current,
            previous,
            growth: previous.and_then(|prev| growth_rate(current, prev).ok()),
            trend: series,
        })
    }
}

/// Last and second-to-last elements
pub fn last_two(series: &[f64]) -> (Option<f64>, Option<f64>) {
    match series {
        [] => (None, None),
        [only] => (Some(*only), None),
        [.., prev, last] => (Some(*last), Some(*prev)),
    }
}

/// Growth between the last two points, `None` when undefined
pub fn latest_growth(series: &[f64]) -> Option<f64> {
    match last_two(series) {
        (Some(current), Some(previous)) => growth_rate(current, previous).ok(),
        _ => None,
    }
}

/// Month-over-month growth for every point; the first point is 0
///
/// Points whose prior value is zero report `None`.
pub fn period_growth_rates(series: &[f64]) -> Vec<Option<f64>> {
    series
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if i == 0 {
                Some(0.0)
            } else {
                growth_rate(value, series[i - 1]).ok()
            }
        })
        .collect()
}

/// Trailing arithmetic mean over `window` points
///
/// Produces `series.len() - window + 1` points, or none when the window is
/// longer than the series.
pub fn moving_average(series: &[f64], window: usize) -> Result<Vec<f64>, MetricError> {
    if window == 0 {
        return Err(MetricError::InvalidParameter {
            name: "window",
            reason: "moving average window must be at least 1".to_string(),
        });
    }
    Ok(series
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect())
}
