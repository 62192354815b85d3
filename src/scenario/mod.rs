//! Scenario planning: linear-factor projections, sensitivity, risk and break-even

mod params;
mod engine;
mod breakeven;
mod runner;

pub use params::{ProjectedMetrics, ProjectionSummary, ScenarioField, ScenarioParams};
pub use engine::{
    risk_adjusted_metrics, scenario_impact, scenario_impact_value, scenario_projections,
    sensitivity_analysis, ScenarioEngine, DEFAULT_SENSITIVITY_VARIATION, SENSITIVITY_MONTHS,
};
pub use breakeven::break_even_point;
pub use runner::{NamedScenario, ScenarioProjection, ScenarioRunner};
