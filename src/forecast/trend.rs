//! Extrapolation of a history by its average growth

use std::f64::consts::PI;

use crate::error::MetricError;
use crate::metrics::checked_div;

/// Mean period-over-period growth as a fraction, `None` below two points
pub fn average_growth(history: &[f64]) -> Result<Option<f64>, MetricError> {
    if history.len() < 2 {
        return Ok(None);
    }
    let mut total = 0.0;
    for pair in history.windows(2) {
        total += checked_div(pair[1] - pair[0], pair[0], "average growth")?;
    }
    Ok(Some(total / (history.len() - 1) as f64))
}

/// Compound the last value forward by the average historical growth
///
/// A history shorter than two points has no growth and yields no projection.
pub fn linear_projection(history: &[f64], periods: usize) -> Result<Vec<f64>, MetricError> {
    let (Some(growth), Some(&last)) = (average_growth(history)?, history.last()) else {
        log::debug!("linear projection: {} point(s) of history, nothing to project", history.len());
        return Ok(Vec::new());
    };

    let mut value = last;
    Ok((0..periods)
        .map(|_| {
            value *= 1.0 + growth;
            value
        })
        .collect())
}

/// Linear projection with a 12-period sine seasonality applied
///
/// Output `i` is scaled by `1 + sin(i / 12 * 2π) * seasonality_factor`.
pub fn seasonal_projection(
    history: &[f64],
    periods: usize,
    seasonality_factor: f64,
) -> Result<Vec<f64>, MetricError> {
    Ok(linear_projection(history, periods)?
        .into_iter()
        .enumerate()
        .map(|(i, value)| value * (1.0 + seasonal_adjustment(i) * seasonality_factor))
        .collect())
}

pub(crate) fn seasonal_adjustment(index: usize) -> f64 {
    (index as f64 / 12.0 * PI * 2.0).sin()
}
