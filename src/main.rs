//! Business metrics CLI
//!
//! Runs one calculation engine over a JSON input file and prints the result
//! as a text table, or as JSON with `--json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bizmetrics::cashflow::{cash_flow_metrics, cash_flow_ratios, CashFlowInput};
use bizmetrics::config::{AnalyticsConfig, DEFAULT_CONFIG_PATH};
use bizmetrics::dashboard::{dashboard_metrics, DashboardInput};
use bizmetrics::forecast::{linear_projection, market_forecast, seasonal_projection, ForecastParams};
use bizmetrics::kpi::{KpiEngine, KpiInput, KpiKind, KpiSnapshot};
use bizmetrics::scenario::{
    break_even_point, risk_adjusted_metrics, ProjectionSummary, ScenarioEngine, ScenarioParams,
    DEFAULT_SENSITIVITY_VARIATION, SENSITIVITY_MONTHS,
};
use bizmetrics::source::{cash_flow_input, CsvSource};
use bizmetrics::unit_economics::unit_economics;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Financial analytics for revenue, cash flow, KPI, scenario and unit-economics views
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration override file (defaults to data/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Net cash flow, runway, ratios and trend
    Cashflow(CashflowArgs),
    /// The six KPIs against configured targets
    Kpi(InputArgs),
    /// Month-by-month scenario projection
    Scenario(ScenarioArgs),
    /// Single-factor sensitivity of a scenario
    Sensitivity(SensitivityArgs),
    /// Compounding trend forecast of a monthly history
    Forecast(ForecastArgs),
    /// Per-unit profitability waterfall
    Unit(UnitArgs),
    /// Headline dashboard cards
    Dashboard(InputArgs),
}

#[derive(Parser)]
struct InputArgs {
    /// JSON input file
    #[arg(long)]
    input: PathBuf,
}

#[derive(Parser)]
struct CashflowArgs {
    /// JSON `CashFlowInput` file
    #[arg(long, conflicts_with = "csv", required_unless_present = "csv")]
    input: Option<PathBuf>,

    /// Monthly CSV with `inflows` and `outflows` columns
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Cash reserves, required with --csv
    #[arg(long, requires = "csv", required_unless_present = "input")]
    reserves: Option<f64>,

    /// Monthly burn rate, required with --csv
    #[arg(long, requires = "csv", required_unless_present = "input")]
    burn_rate: Option<f64>,

    /// Operating expenses over the whole period, enables the cash-flow ratios
    #[arg(long)]
    operating_expenses: Option<f64>,
}

#[derive(Parser)]
struct ScenarioArgs {
    /// JSON `ScenarioParams` file; the base scenario when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Projection horizon in months
    #[arg(long)]
    months: Option<usize>,

    /// Haircut applied to revenue, profit, cash flow and ROI (0 to 1)
    #[arg(long)]
    risk: Option<f64>,
}

#[derive(Parser)]
struct SensitivityArgs {
    /// JSON `ScenarioParams` file; the base scenario when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Percentage each field is raised by
    #[arg(long, default_value_t = DEFAULT_SENSITIVITY_VARIATION)]
    variation: f64,
}

#[derive(Parser)]
struct ForecastArgs {
    /// JSON array of monthly values, oldest first
    #[arg(long)]
    input: PathBuf,

    #[arg(long, default_value_t = 12)]
    periods: usize,

    /// Amplitude of the 12-month seasonal cycle as a fraction
    #[arg(long, default_value_t = 0.0)]
    seasonality: f64,

    /// Last month's expenses; adds a market-condition forecast
    #[arg(long)]
    last_expenses: Option<f64>,
}

#[derive(Parser)]
struct UnitArgs {
    #[arg(long)]
    revenue: f64,

    #[arg(long)]
    cogs: f64,

    #[arg(long)]
    opex: f64,

    /// Fixed costs; adds the break-even volume at a variable cost of `cogs`
    #[arg(long)]
    fixed_costs: Option<f64>,
}

/// KPI input file: the latest period plus prior KPI values
#[derive(Deserialize)]
struct KpiRequest {
    current: KpiInput,
    #[serde(default)]
    history: Vec<KpiSnapshot>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Cashflow(args) => run_cashflow(args, &config, cli.json),
        Commands::Kpi(args) => run_kpi(args, &config, cli.json),
        Commands::Scenario(args) => run_scenario(args, &config, cli.json),
        Commands::Sensitivity(args) => run_sensitivity(args, &config, cli.json),
        Commands::Forecast(args) => run_forecast(args, cli.json),
        Commands::Unit(args) => run_unit(args, cli.json),
        Commands::Dashboard(args) => run_dashboard(args, cli.json),
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    match path {
        Some(path) => AnalyticsConfig::from_json_path(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            AnalyticsConfig::from_json().context("failed to load default config")
        }
        None => Ok(AnalyticsConfig::default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

fn load_params(path: Option<&Path>) -> Result<ScenarioParams> {
    path.map_or_else(|| Ok(ScenarioParams::default()), read_json)
}

fn run_cashflow(args: CashflowArgs, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let input: CashFlowInput = match (&args.input, &args.csv) {
        (Some(path), _) => read_json(path)?,
        (None, Some(path)) => {
            let source = CsvSource::from_path(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            let reserves = args.reserves.context("--reserves is required with --csv")?;
            let burn_rate = args.burn_rate.context("--burn-rate is required with --csv")?;
            cash_flow_input(&source, reserves, burn_rate)?
        }
        (None, None) => anyhow::bail!("either --input or --csv is required"),
    };

    let metrics = cash_flow_metrics(&input)?;
    let trend = config.cash_flow.classify(&metrics.net_cash_flow.trend)?;
    let ratios = args
        .operating_expenses
        .map(|opex| cash_flow_ratios(&input.inflows, &input.outflows, opex))
        .transpose()?;

    if json {
        return print_json(&serde_json::json!({
            "metrics": metrics,
            "trend": trend,
            "ratios": ratios,
        }));
    }

    println!("Cash Flow ({} months):", metrics.net_cash_flow.trend.len());
    println!("{:>5} {:>14} {:>14} {:>14}", "Month", "Inflow", "Outflow", "Net");
    println!("{}", "-".repeat(50));
    for (i, net) in metrics.net_cash_flow.trend.iter().enumerate() {
        println!(
            "{:>5} {:>14.2} {:>14.2} {:>14.2}",
            i + 1,
            metrics.inflow.trend[i],
            metrics.outflow.trend[i],
            net
        );
    }
    println!();
    println!("  Net cash flow:   {:.2} (growth {}%)", metrics.net_cash_flow.current, fmt_opt(metrics.net_cash_flow.growth));
    println!("  Runway:          {:.2} months", metrics.runway);
    println!("  Burn rate:       {:.2}", metrics.burn_rate);
    println!("  Working capital: {:.2}", metrics.working_capital);
    println!("  Trend:           {:?}", trend);
    if let Some(ratios) = ratios {
        println!("  Operating CF ratio:  {:.4}", ratios.operating_cash_flow_ratio);
        println!("  Coverage ratio:      {:.4}", ratios.cash_flow_coverage_ratio);
        println!("  CF to income ratio:  {:.4}", ratios.cash_flow_to_income_ratio);
    }
    Ok(())
}

fn run_kpi(args: InputArgs, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let request: KpiRequest = read_json(&args.input)?;
    let engine = KpiEngine::new(config.kpi.clone());
    let metrics = engine.calculate(&request.current, &request.history)?;

    if json {
        return print_json(&metrics);
    }

    println!("{:<12} {:>14} {:>14} {:>10} {:>9}", "KPI", "Current", "Target", "Trend %", "Status");
    println!("{}", "-".repeat(63));
    for kind in KpiKind::ALL {
        let value = metrics.get(kind);
        let status = value.status(config.kpi.status_threshold)?;
        println!(
            "{:<12} {:>14.2} {:>14.2} {:>10} {:>9}",
            kind.name(),
            value.current,
            value.target,
            fmt_opt(value.trend),
            format!("{:?}", status)
        );
    }
    Ok(())
}

fn run_scenario(args: ScenarioArgs, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let params = load_params(args.input.as_deref())?;
    let engine = ScenarioEngine::new(config.scenario.clone());
    let months = args.months.unwrap_or(config.scenario.default_months);

    let mut projection = engine.project(&params, months)?;
    if let Some(risk) = args.risk {
        projection = risk_adjusted_metrics(&projection, risk)?;
    }
    let summary = ProjectionSummary::from_months(&projection);

    if json {
        return print_json(&serde_json::json!({
            "months": projection,
            "summary": summary,
        }));
    }

    println!("{:>5} {:>14} {:>14} {:>14} {:>14} {:>8}", "Month", "Revenue", "Expenses", "Profit", "Cash Flow", "ROI %");
    println!("{}", "-".repeat(75));
    for (i, m) in projection.iter().enumerate() {
        println!(
            "{:>5} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>8.2}",
            i, m.revenue, m.expenses, m.profit, m.cash_flow, m.roi
        );
    }
    println!();
    println!("  Total revenue: {:.2}", summary.total_revenue);
    println!("  Total profit:  {:.2}", summary.total_profit);
    println!("  Final ROI:     {:.2}%", summary.final_roi);
    Ok(())
}

fn run_sensitivity(args: SensitivityArgs, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let params = load_params(args.input.as_deref())?;
    let engine = ScenarioEngine::new(config.scenario.clone());
    let results = engine.sensitivity(&params, args.variation)?;

    if json {
        return print_json(&results);
    }

    let base = ProjectionSummary::from_months(&engine.project(&params, SENSITIVITY_MONTHS)?);
    println!("Sensitivity (+{}% per field):", args.variation);
    println!("{:<16} {:>16} {:>16} {:>10}", "Field", "Total Revenue", "Total Profit", "Final ROI");
    println!("{}", "-".repeat(61));
    println!("{:<16} {:>16.2} {:>16.2} {:>10.2}", "base", base.total_revenue, base.total_profit, base.final_roi);
    for (field, months) in &results {
        let summary = ProjectionSummary::from_months(months);
        println!(
            "{:<16} {:>16.2} {:>16.2} {:>10.2}",
            field.name(),
            summary.total_revenue,
            summary.total_profit,
            summary.final_roi
        );
    }
    Ok(())
}

fn run_forecast(args: ForecastArgs, json: bool) -> Result<()> {
    let history: Vec<f64> = read_json(&args.input)?;
    let projection = if args.seasonality == 0.0 {
        linear_projection(&history, args.periods)?
    } else {
        seasonal_projection(&history, args.periods, args.seasonality)?
    };

    let market = match (args.last_expenses, history.last()) {
        (Some(expenses), Some(&revenue)) => {
            let params = ForecastParams {
                months: args.periods,
                ..ForecastParams::default()
            };
            Some(market_forecast(revenue, expenses, &params))
        }
        _ => None,
    };

    if json {
        return print_json(&serde_json::json!({
            "projection": projection,
            "market": market,
        }));
    }

    if projection.is_empty() {
        println!("Not enough history to forecast ({} point(s))", history.len());
    }
    for (i, value) in projection.iter().enumerate() {
        println!("{:>5} {:>14.2}", i + 1, value);
    }
    if let Some(market) = market {
        println!();
        println!("{:>5} {:>14} {:>14} {:>14}", "Month", "Revenue", "Expenses", "Profit");
        println!("{}", "-".repeat(50));
        for point in &market {
            println!("{:>5} {:>14.2} {:>14.2} {:>14.2}", point.month, point.revenue, point.expenses, point.profit);
        }
    }
    Ok(())
}

fn run_unit(args: UnitArgs, json: bool) -> Result<()> {
    let unit = unit_economics(args.revenue, args.cogs, args.opex)?;
    let break_even = args
        .fixed_costs
        .map(|fixed| break_even_point(fixed, args.cogs, args.revenue))
        .transpose()?;

    if json {
        return print_json(&serde_json::json!({
            "unitEconomics": unit,
            "breakEvenUnits": break_even,
        }));
    }

    println!("  Gross profit / unit:     {:.2}", unit.gross_profit_per_unit);
    println!("  Operating income / unit: {:.2}", unit.operating_income_per_unit);
    println!("  Gross margin / unit:     {:.2}%", unit.gross_margin_per_unit);
    if let Some(units) = break_even {
        println!("  Break-even volume:       {:.2} units", units);
    }
    Ok(())
}

fn run_dashboard(args: InputArgs, json: bool) -> Result<()> {
    let input: DashboardInput = read_json(&args.input)?;
    let metrics = dashboard_metrics(&input)?;

    if json {
        return print_json(&metrics);
    }

    println!("  Revenue:   {:.2} (growth {}%)", metrics.revenue.current, fmt_opt(metrics.revenue.growth));
    println!(
        "  Profit:    {:.2} (growth {}%, margin {:.2}%)",
        metrics.profit.current,
        fmt_opt(metrics.profit.growth),
        metrics.profit.margin
    );
    println!("  Users:     {:.0} (growth {}%)", metrics.users.active, fmt_opt(metrics.users.growth));
    println!(
        "  Marketing: CAC {:.2}, LTV {:.2}, ROAS {:.2}",
        metrics.marketing.cac, metrics.marketing.ltv, metrics.marketing.roas
    );
    Ok(())
}
