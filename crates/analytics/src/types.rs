// In crates/analytics/src/types.rs

use serde::{Deserialize, Serialize};

/// A completed round trip: bought with all cash, later sold in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_bar: usize,
    pub exit_bar: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    /// Cash committed on entry.
    pub cost: f64,
    /// Exit proceeds minus entry cost.
    pub pnl: f64,
}

impl Trade {
    pub fn duration_bars(&self) -> usize {
        self.exit_bar.saturating_sub(self.entry_bar)
    }
}

/// A report of a strategy's performance over one simulated run.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PerformanceReport {
    pub initial_capital: f64,
    /// Last point of the equity curve, or the initial capital if it is empty.
    pub final_equity: f64,
    /// Number of equity points the report was computed from.
    pub bars: usize,

    // Tier 1 Metrics
    pub net_pnl_absolute: f64,
    pub net_pnl_percentage: f64,
    pub max_drawdown_absolute: f64,
    pub max_drawdown_percentage: f64,
    pub sharpe_ratio: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub total_trades: u32,

    // Tier 2 Metrics
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    pub avg_trade_duration_bars: f64,
    pub expectancy: f64,
    pub drawdown_duration_bars: usize,
}

impl PerformanceReport {
    /// Creates a new, empty report with zero values.
    pub fn new() -> Self {
        Self::default()
    }
}
