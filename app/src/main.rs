// In app/src/main.rs

use analytics::PerformanceReport;
use anyhow::{Context, Result};
use app_config::Settings;
use backtester::BacktestEngine;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use strategies::MACrossoverSettings;
use tracing_subscriber::prelude::*;

mod analyzer;
mod data;
mod optimizer;

use crate::analyzer::RankedReport;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Dual moving-average crossover backtester.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a single backtest over a seeded random-walk price series.
    Backtest(BacktestArgs),

    /// Runs a full parameter optimization job over a grid of window pairs.
    Optimize {
        /// Path to the optimizer grid definition.
        #[arg(long, default_value = "config/optimizer.toml")]
        config: PathBuf,
    },
}

/// Command-line overrides for the configured backtest.
#[derive(Args, Debug, Default)]
struct BacktestArgs {
    /// Fast moving average window (bars).
    #[arg(long)]
    fast: Option<usize>,

    /// Slow moving average window (bars).
    #[arg(long)]
    slow: Option<usize>,

    /// Number of price bars to generate.
    #[arg(long)]
    points: Option<usize>,

    /// Seed of the price generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load application settings")?;
    init_tracing(&settings.app.log_level)?;

    tracing::info!("Starting backtest application");

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Backtest(args) => handle_backtest(&settings, args)?,
        Commands::Optimize { config } => handle_optimize(&settings, config)?,
    }

    tracing::info!("Application has finished successfully.");

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let level: tracing::Level = log_level
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid log level '{}'", log_level))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
    Ok(())
}

#[derive(Debug, Serialize)]
struct BacktestSummary {
    parameters: MACrossoverSettings,
    processing_secs: f64,
    report: PerformanceReport,
}

/// Handles the logic for the `backtest` subcommand.
fn handle_backtest(settings: &Settings, args: BacktestArgs) -> Result<()> {
    // --- 1. Resolve parameters (command line wins over config) ---
    let mut data_settings = settings.data.clone();
    if let Some(points) = args.points {
        data_settings.points = points;
    }
    if let Some(seed) = args.seed {
        data_settings.seed = seed;
    }

    let mut parameters = settings.ma_crossover();
    if let Some(fast) = args.fast {
        parameters.fast_period = fast;
    }
    if let Some(slow) = args.slow {
        parameters.slow_period = slow;
    }

    // --- 2. Data Preparation ---
    tracing::info!(points = data_settings.points, seed = data_settings.seed, "Generating price data...");
    let prices = data::generate_random_walk(&data_settings)?;

    let mut engine = BacktestEngine::new(settings.backtest.initial_capital)?;
    let start_load = Instant::now();
    engine.load_data(prices);
    tracing::info!(duration = ?start_load.elapsed(), "Data loaded.");

    // --- 3. Execute Strategy ---
    let start_run = Instant::now();
    let outcome = engine
        .run_detailed(parameters)
        .with_context(|| format!("Backtest failed for {:?}", parameters))?;
    let processing_secs = start_run.elapsed().as_secs_f64();

    // --- 4. Result Analysis ---
    let report = outcome.report();
    if args.json {
        let summary = BacktestSummary { parameters, processing_secs, report };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&parameters, processing_secs, &report);
    }

    Ok(())
}

/// Handles the logic for the `optimize` subcommand.
fn handle_optimize(settings: &Settings, config_path: PathBuf) -> Result<()> {
    let start_time = Instant::now();
    tracing::info!("Starting optimization job...");

    let optimizer_config = app_config::load_optimizer_config(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let param_sets = optimizer::generate_parameter_sets(&optimizer_config.ma_crossover_params);
    if param_sets.is_empty() {
        anyhow::bail!("No valid parameter sets were generated.");
    }

    tracing::info!(
        job = %optimizer_config.job.name,
        "Starting optimization with {} parameter sets",
        param_sets.len()
    );

    let prices = data::generate_random_walk(&settings.data)?;
    let results = optimizer::run_optimization(
        settings.app.optimizer_cores,
        settings.backtest.initial_capital,
        &prices,
        &param_sets,
    )?;

    let ranked_results = analyzer::analyze_and_rank_results(results, optimizer_config.job.min_trades);
    print_optimization_report(&ranked_results, optimizer_config.job.top);

    tracing::info!(duration = ?start_time.elapsed(), "Optimization job and analysis finished.");
    Ok(())
}

/// Helper function to print the performance report in a readable format.
fn print_report(parameters: &MACrossoverSettings, processing_secs: f64, report: &PerformanceReport) {
    println!("\n--- Backtest Performance Report ---");
    println!("-----------------------------------");
    println!("Windows (fast/slow):   {}/{}", parameters.fast_period, parameters.slow_period);
    println!("Processing Time:       {:.4}s", processing_secs);
    println!("Simulated Bars:        {}", report.bars);
    println!("-----------------------------------");
    // Tier 1
    println!("Final Equity:          ${:.2}", report.final_equity);
    println!("Net P&L:               ${:.2} ({:.2}%)", report.net_pnl_absolute, report.net_pnl_percentage);
    println!("Max Drawdown:          ${:.2} ({:.2}%)", report.max_drawdown_absolute, report.max_drawdown_percentage);
    println!("Sharpe Ratio (bar):    {:.4}", report.sharpe_ratio);
    println!("Profit Factor:         {:.2}", report.profit_factor);
    println!("Win Rate:              {:.2}%", report.win_rate);
    println!("Total Trades:          {}", report.total_trades);
    println!("-----------------------------------");
    // Tier 2
    println!("Sortino Ratio (bar):   {:.4}", report.sortino_ratio);
    println!("Calmar Ratio:          {:.3}", report.calmar_ratio);
    println!("Avg. Trade Duration:   {:.1} bars", report.avg_trade_duration_bars);
    println!("Expectancy:            ${:.2}", report.expectancy);
    println!("Max Drawdown Duration: {} bars", report.drawdown_duration_bars);
    println!("-----------------------------------");
}

/// Helper function to print the final optimization summary.
fn print_optimization_report(results: &[RankedReport], top: usize) {
    println!("\n--- Optimization Job Complete ---");
    println!("---------------------------------");
    println!("Top {} Parameter Sets by Score:", top);
    println!("---------------------------------");

    for (i, ranked_report) in results.iter().take(top).enumerate() {
        let parameters = &ranked_report.result.parameters;
        let report = &ranked_report.result.report;
        println!("\n[Rank {} | Score: {:.2}]", i + 1, ranked_report.score);
        println!("  - Windows: fast {} / slow {}", parameters.fast_period, parameters.slow_period);
        println!(
            "  - P&L: ${:.2} ({:.2}%) | Max Drawdown: {:.2}% | Calmar: {:.2} | Trades: {}",
            report.net_pnl_absolute,
            report.net_pnl_percentage,
            report.max_drawdown_percentage,
            report.calmar_ratio,
            report.total_trades
        );
    }
    println!("\n---------------------------------");

    if let Some(best) = results.first() {
        println!("Recommendation: The parameter set with the highest score is:");
        println!("  {}", serde_json::to_string_pretty(&best.result.parameters).unwrap_or_default());
    } else {
        println!("Recommendation: No parameter sets passed the minimum threshold.");
    }
}
