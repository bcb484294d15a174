use crate::types::{PerformanceReport, Trade};

/// The engine responsible for calculating performance metrics from a run.
#[derive(Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates a full performance report from the closed trades and the
    /// per-bar equity curve of a run.
    pub fn calculate(
        &self,
        initial_capital: f64,
        trades: &[Trade],
        equity_curve: &[f64],
    ) -> PerformanceReport {
        let mut report = PerformanceReport::new();
        report.initial_capital = initial_capital;
        report.bars = equity_curve.len();

        // --- Tier 1 Calculations ---

        // 1. Final equity and net P&L. An empty curve means nothing was simulated.
        report.final_equity = equity_curve.last().copied().unwrap_or(initial_capital);
        report.net_pnl_absolute = report.final_equity - initial_capital;
        if initial_capital > 0.0 {
            report.net_pnl_percentage = report.net_pnl_absolute / initial_capital * 100.0;
        }

        // 2. Trade statistics
        report.total_trades = trades.len() as u32;
        if !trades.is_empty() {
            let winning_trades = trades.iter().filter(|t| t.pnl > 0.0).count();
            report.win_rate = winning_trades as f64 / trades.len() as f64 * 100.0;

            let gross_profit: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
            let gross_loss: f64 = trades.iter().filter(|t| t.pnl < 0.0).map(|t| t.pnl).sum::<f64>().abs();
            report.profit_factor = if gross_loss > 0.0 {
                gross_profit / gross_loss
            } else if gross_profit > 0.0 {
                f64::INFINITY // Pure profit
            } else {
                0.0 // Only break-even trades
            };

            report.expectancy = trades.iter().map(|t| t.pnl).sum::<f64>() / trades.len() as f64;
            report.avg_trade_duration_bars =
                trades.iter().map(|t| t.duration_bars() as f64).sum::<f64>() / trades.len() as f64;
        }

        // 3. Max drawdown (absolute, percentage and duration in bars)
        let drawdown = max_drawdown(initial_capital, equity_curve);
        report.max_drawdown_absolute = drawdown.absolute;
        report.max_drawdown_percentage = drawdown.percentage;
        report.drawdown_duration_bars = drawdown.duration_bars;

        // 4. Sharpe and Sortino ratios (per bar, not annualized)
        let returns = bar_returns(equity_curve);
        if !returns.is_empty() {
            let mean_return = returns.iter().sum::<f64>() / returns.len() as f64;
            let variance = returns.iter().map(|r| (r - mean_return).powi(2)).sum::<f64>() / returns.len() as f64;
            let std_dev = variance.sqrt();
            report.sharpe_ratio = if std_dev > 0.0 { mean_return / std_dev } else { 0.0 };

            // Downside deviation: root mean square of the negative returns only.
            let negative_returns: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
            report.sortino_ratio = if negative_returns.is_empty() {
                if mean_return > 0.0 { f64::INFINITY } else { 0.0 }
            } else {
                let downside = (negative_returns.iter().map(|r| r.powi(2)).sum::<f64>()
                    / negative_returns.len() as f64)
                    .sqrt();
                mean_return / downside
            };
        }

        // --- Tier 2 Calculations ---

        // 5. Calmar ratio (total return over max drawdown; the run has no calendar)
        if report.max_drawdown_percentage > 0.0 {
            report.calmar_ratio = report.net_pnl_percentage / report.max_drawdown_percentage;
        }

        report
    }
}

#[derive(Debug, Default, PartialEq)]
struct Drawdown {
    absolute: f64,
    percentage: f64,
    duration_bars: usize,
}

/// Largest peak-to-trough decline, measured from the initial capital onward.
///
/// The duration is the longest run of consecutive bars spent below the
/// running peak, including a drawdown still open at the end of the curve.
fn max_drawdown(initial_capital: f64, equity_curve: &[f64]) -> Drawdown {
    let mut result = Drawdown::default();
    let mut peak = initial_capital;
    let mut underwater = 0usize;

    for &value in equity_curve {
        if value >= peak {
            peak = value;
            underwater = 0;
            continue;
        }

        underwater += 1;
        result.duration_bars = result.duration_bars.max(underwater);

        let decline = peak - value;
        if decline > result.absolute {
            result.absolute = decline;
            result.percentage = if peak > 0.0 { decline / peak * 100.0 } else { 0.0 };
        }
    }
    result
}

/// Simple bar-over-bar returns. Bars following a zero equity are skipped.
fn bar_returns(equity_curve: &[f64]) -> Vec<f64> {
    equity_curve
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect()
}
