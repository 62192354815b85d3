//! Traffic-light status of a KPI against its target

use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::metrics::percentage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Success,
    Warning,
    Danger,
}

/// `Success` at or above target, `Warning` at or above `threshold` percent of
/// target, otherwise `Danger`
pub fn kpi_status(current: f64, target: f64, threshold: f64) -> Result<KpiStatus, MetricError> {
    let attainment = percentage(current, target)?;

    Ok(if attainment >= 100.0 {
        KpiStatus::Success
    } else if attainment >= threshold {
        KpiStatus::Warning
    } else {
        KpiStatus::Danger
    })
}
