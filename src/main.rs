use analytics::{AnalyticsEngine, AnalyticsReport, Metric};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use configuration::{CliOverrides, Config};
use core_types::{format_brl, format_display_date, format_display_range};
use ledger_loader::{LedgerLoader, StaticCsvSource};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The main entry point for the Salesboard application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load SALESBOARD__* variables from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Report(args) => handle_report(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sales dashboard: daily, monthly and yearly comparisons from a published sheet.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP.
    Serve(ServeArgs),
    /// Fetch the sheet once and print the dashboard to the terminal.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(flatten)]
    overrides: CliOverrides,
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// The reference date (format: YYYY-MM-DD). Defaults to today in the configured timezone.
    #[arg(long = "ref", value_parser = parse_reference_arg)]
    reference: Option<NaiveDate>,

    /// Read a local CSV export instead of downloading the sheet.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the analytics report as JSON instead of a table.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    overrides: CliOverrides,
}

fn parse_reference_arg(raw: &str) -> Result<NaiveDate, String> {
    core_types::parse_reference_date(raw).map_err(|e| e.to_string())
}

fn load_config(path: &Path, overrides: CliOverrides) -> anyhow::Result<Config> {
    configuration::load_config_with(path, overrides)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config, args.overrides)?;
    let _guard = configuration::init_tracing(&config.logging)?;
    web_server::run_server(config).await
}

async fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let mut overrides = args.overrides;
    if let Some(path) = &args.csv {
        // A local export stands in for the published sheet.
        overrides
            .source_url
            .get_or_insert_with(|| format!("file://{}", path.display()));
    }
    let config = load_config(&args.config, overrides)?;
    let _guard = configuration::init_tracing(&config.logging)?;

    let loader = match &args.csv {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            LedgerLoader::new(
                Arc::new(StaticCsvSource::new(path.display().to_string(), contents)),
                config.source.clone(),
            )
        }
        None => LedgerLoader::from_config(&config.source),
    };

    let reference_date = args.reference.unwrap_or_else(|| config.analytics.today());
    let ledger = loader.load().await?;
    let report = AnalyticsEngine::new(&config.analytics).analyze(&ledger, reference_date)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&config.dashboard.title, &report);
    }
    Ok(())
}

fn print_report(title: &str, report: &AnalyticsReport) {
    println!("{} ({})", title, format_display_date(report.reference_date));

    let mut metrics = Table::new();
    metrics.load_preset(UTF8_FULL).set_header(vec![
        "Comparison",
        "Current",
        "Period",
        "Base",
        "Base period",
        "Change",
    ]);
    for (name, metric) in [
        ("Today vs yesterday", &report.day_over_day),
        ("Today vs last year", &report.same_day_last_year),
        ("Today vs last year, next day", &report.day_after_last_year),
        ("Month to date vs previous month", &report.month_over_month),
        ("Month to date vs last year", &report.year_over_year),
    ] {
        metrics.add_row(metric_row(name, metric));
    }
    println!("{metrics}");

    let mut days = Table::new();
    days.load_preset(UTF8_FULL).set_header(vec!["#", "Top day", "Total"]);
    for (i, entry) in report.top_days.iter().enumerate() {
        days.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format_display_date(entry.key)),
            Cell::new(&entry.formatted),
        ]);
    }
    println!("{days}");

    let mut customers = Table::new();
    customers
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Top customer", "Total"]);
    for (i, entry) in report.top_customers.iter().enumerate() {
        customers.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.key),
            Cell::new(&entry.formatted),
        ]);
    }
    println!("{customers}");
}

fn metric_row(name: &str, metric: &Metric) -> Vec<Cell> {
    vec![
        Cell::new(name),
        Cell::new(format_brl(metric.current)),
        Cell::new(format_display_range(
            metric.current_window.start,
            metric.current_window.end,
        )),
        Cell::new(format_brl(metric.comparison)),
        Cell::new(format_display_range(
            metric.comparison_window.start,
            metric.comparison_window.end,
        )),
        Cell::new(format_change(metric.percent_change)),
    ]
}

fn format_change(change: Option<Decimal>) -> String {
    match change {
        Some(pct) => format!("{:+.1}%", pct.round_dp(1)).replace('.', ","),
        None => "n/a".to_string(),
    }
}
