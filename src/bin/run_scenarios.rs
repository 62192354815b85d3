//! Project every scenario in a CSV file in parallel
//!
//! Outputs one row per scenario and month for comparison in a spreadsheet

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use bizmetrics::config::AnalyticsConfig;
use bizmetrics::scenario::{NamedScenario, ScenarioParams, ScenarioProjection, ScenarioRunner};
use clap::Parser;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(author, version, about = "Project a file of scenarios in parallel", long_about = None)]
struct Args {
    /// Scenario CSV: id,name,salesGrowth,expenseGrowth,marketExpansion,headcount,baseRevenue,baseExpenses
    #[arg(long)]
    input: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "scenario_projections.csv")]
    output: PathBuf,

    /// Configuration override file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Projection horizon, overriding the configured default
    #[arg(long)]
    months: Option<usize>,
}

/// Raw CSV row of a saved scenario
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioRow {
    id: String,
    name: String,
    sales_growth: f64,
    expense_growth: f64,
    market_expansion: f64,
    headcount: f64,
    base_revenue: f64,
    base_expenses: f64,
}

impl ScenarioRow {
    fn into_scenario(self) -> NamedScenario {
        NamedScenario {
            id: self.id,
            name: self.name,
            params: ScenarioParams {
                sales_growth: self.sales_growth,
                expense_growth: self.expense_growth,
                market_expansion: self.market_expansion,
                headcount: self.headcount,
                base_revenue: self.base_revenue,
                base_expenses: self.base_expenses,
            },
        }
    }
}

/// One projected month of one scenario
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OutputRow<'a> {
    scenario_id: &'a str,
    month: usize,
    revenue: f64,
    expenses: f64,
    profit: f64,
    cash_flow: f64,
    roi: f64,
}

fn load_scenarios(path: &Path) -> Result<Vec<NamedScenario>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    reader
        .deserialize::<ScenarioRow>()
        .enumerate()
        .map(|(i, row)| {
            row.map(ScenarioRow::into_scenario)
                .with_context(|| format!("invalid scenario at row {}", i + 1))
        })
        .collect()
}

fn write_projections(path: &Path, projections: &[ScenarioProjection]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for projection in projections {
        for (month, m) in projection.months.iter().enumerate() {
            writer.serialize(OutputRow {
                scenario_id: &projection.id,
                month,
                revenue: m.revenue,
                expenses: m.expenses,
                profit: m.profit,
                cash_flow: m.cash_flow,
                roi: m.roi,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalyticsConfig::from_json_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AnalyticsConfig::default(),
    };
    if let Some(months) = args.months {
        config.scenario.default_months = months;
    }

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());
    let scenarios = load_scenarios(&args.input)?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::with_assumptions(config.scenario.clone());

    println!("Running projections...");
    let proj_start = Instant::now();

    // Scenarios are independent; run them in parallel
    let projections: Vec<ScenarioProjection> = scenarios
        .par_iter()
        .map(|scenario| {
            runner
                .run_named(scenario)
                .with_context(|| format!("scenario '{}' failed", scenario.id))
        })
        .collect::<Result<_>>()?;

    println!("Projections complete in {:?}", proj_start.elapsed());

    write_projections(&args.output, &projections)?;
    println!("Output written to {}", args.output.display());

    println!("\nScenario Summary:");
    for projection in &projections {
        let summary = projection.summary();
        println!(
            "  {:<20} revenue=${:.0}, profit=${:.0}, final ROI={:.2}%",
            projection.name, summary.total_revenue, summary.total_profit, summary.final_roi
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
