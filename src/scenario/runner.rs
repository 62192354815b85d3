//! Scenario runner for comparing many named scenarios
//!
//! Holds one set of conversion constants and runs any number of scenarios
//! against it, so saved, duplicated and edited scenarios are projected the
//! same way.

use serde::{Deserialize, Serialize};

use crate::config::ScenarioAssumptions;
use crate::error::MetricError;

use super::engine::{scenario_impact, ScenarioEngine};
use super::params::{ProjectedMetrics, ProjectionSummary, ScenarioParams};

/// A saved scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub params: ScenarioParams,
}

/// Projection of one named scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub id: String,
    pub name: String,
    pub months: Vec<ProjectedMetrics>,
}

impl ScenarioProjection {
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary::from_months(&self.months)
    }
}

/// Runs scenarios against shared conversion constants
///
/// # Example
/// ```
/// use bizmetrics::scenario::{ScenarioRunner, ScenarioParams};
///
/// let runner = ScenarioRunner::new();
/// let months = runner.run(&ScenarioParams::default()).unwrap();
/// assert_eq!(months.len(), 12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ScenarioEngine,
}

impl ScenarioRunner {
    /// Create runner with the default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with custom constants
    pub fn with_assumptions(assumptions: ScenarioAssumptions) -> Self {
        Self {
            engine: ScenarioEngine::new(assumptions),
        }
    }

    pub fn engine(&self) -> &ScenarioEngine {
        &self.engine
    }

    /// Project one scenario over the default horizon
    pub fn run(&self, params: &ScenarioParams) -> Result<Vec<ProjectedMetrics>, MetricError> {
        self.engine.project_default(params)
    }

    /// Project one named scenario over the default horizon
    pub fn run_named(&self, scenario: &NamedScenario) -> Result<ScenarioProjection, MetricError> {
        Ok(ScenarioProjection {
            id: scenario.id.clone(),
            name: scenario.name.clone(),
            months: self.run(&scenario.params)?,
        })
    }

    /// Project every scenario; the first failure aborts the batch
    pub fn run_batch(&self, scenarios: &[NamedScenario]) -> Result<Vec<ScenarioProjection>, MetricError> {
        scenarios.iter().map(|s| self.run_named(s)).collect()
    }

    /// Profit impact of each scenario relative to `baseline`
    pub fn compare(
        &self,
        baseline: &NamedScenario,
        scenarios: &[NamedScenario],
    ) -> Result<Vec<(String, Vec<Option<f64>>)>, MetricError> {
        let base = self.run(&baseline.params)?;
        scenarios
            .iter()
            .map(|s| Ok((s.id.clone(), scenario_impact(&base, &self.run(&s.params)?))))
            .collect()
    }
}
