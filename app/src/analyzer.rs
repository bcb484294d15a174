// In app/src/analyzer.rs

use crate::optimizer::OptimizationResult;
use analytics::PerformanceReport;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RankedReport {
    pub score: f64,
    #[serde(flatten)]
    pub result: OptimizationResult,
}

/// Scores and ranks the results of an optimization job, best first.
pub fn analyze_and_rank_results(results: Vec<OptimizationResult>, min_trades: u32) -> Vec<RankedReport> {
    let total_reports = results.len();

    let mut ranked_reports: Vec<RankedReport> = results
        .into_iter()
        // 1. Filter out runs with too few trades
        .filter(|result| result.report.total_trades >= min_trades)
        // 2. Calculate the score
        .map(|result| RankedReport {
            score: calculate_score(&result.report),
            result,
        })
        .collect();

    tracing::info!(
        total_reports,
        passing_reports = ranked_reports.len(),
        "Finished scoring reports."
    );

    // 3. Sort by score in descending order (higher is better)
    ranked_reports.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    ranked_reports
}

/// The multi-objective scoring function.
/// Higher scores are better.
fn calculate_score(report: &PerformanceReport) -> f64 {
    // Define weights for each metric
    const PROFIT_FACTOR_WEIGHT: f64 = 40.0;
    const RETURN_WEIGHT: f64 = 30.0;
    const MAX_DRAWDOWN_WEIGHT: f64 = -35.0; // Negative weight penalizes drawdown
    const CALMAR_RATIO_WEIGHT: f64 = 15.0;

    // Cap values so a single outlier (or an infinite profit factor) cannot dominate
    let capped_profit_factor = report.profit_factor.min(5.0);
    let capped_calmar = report.calmar_ratio.clamp(-5.0, 5.0);
    let normalized_return = report.net_pnl_percentage / 100.0;
    let normalized_drawdown = report.max_drawdown_percentage / 100.0; // Convert to 0-1 scale

    (capped_profit_factor * PROFIT_FACTOR_WEIGHT)
        + (normalized_return * RETURN_WEIGHT)
        + (normalized_drawdown * MAX_DRAWDOWN_WEIGHT)
        + (capped_calmar * CALMAR_RATIO_WEIGHT)
}
