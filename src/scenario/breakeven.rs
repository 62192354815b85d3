//! Break-even volume

use crate::error::MetricError;
use crate::metrics::checked_div;

/// Units that must be sold for contribution margin to cover `fixed_costs`
///
/// Fails when each unit sells at or below its variable cost, since no volume
/// ever breaks even, or when the margin is so thin the volume is not finite.
pub fn break_even_point(
    fixed_costs: f64,
    variable_cost_per_unit: f64,
    price_per_unit: f64,
) -> Result<f64, MetricError> {
    if price_per_unit <= variable_cost_per_unit {
        return Err(MetricError::NoContributionMargin {
            price: price_per_unit,
            variable_cost: variable_cost_per_unit,
        });
    }
    checked_div(fixed_costs, price_per_unit - variable_cost_per_unit, "break even point")
}
