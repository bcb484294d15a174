// In crates/backtester/src/logger.rs

use analytics::Trade;
use core_types::Side;
use serde::Serialize;

/// A single all-in or all-out conversion executed by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fill {
    pub bar: usize,
    pub side: Side,
    pub price: f64,
    pub quantity: f64,
    /// Cash spent (buy) or received (sell).
    pub value: f64,
}

/// Records fills, completed trades and the equity curve during a run.
#[derive(Debug, Default)]
pub struct TradeLogger {
    pub fills: Vec<Fill>,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<f64>,
    open_entry: Option<Fill>,
}

impl TradeLogger {
    /// Creates a new, empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logger whose equity buffer can hold `bars` points without reallocating.
    pub fn with_capacity(bars: usize) -> Self {
        Self {
            equity_curve: Vec::with_capacity(bars),
            ..Self::default()
        }
    }

    /// Records a point in the equity curve.
    pub fn record_equity(&mut self, value: f64) {
        self.equity_curve.push(value);
    }

    /// Records a fill. A sell closes the open entry into a `Trade`.
    pub fn record_fill(&mut self, fill: Fill) {
        match fill.side {
            Side::Buy => self.open_entry = Some(fill),
            Side::Sell => {
                if let Some(entry) = self.open_entry.take() {
                    self.trades.push(Trade {
                        entry_bar: entry.bar,
                        exit_bar: fill.bar,
                        entry_price: entry.price,
                        exit_price: fill.price,
                        quantity: entry.quantity,
                        cost: entry.value,
                        pnl: fill.value - entry.value,
                    });
                }
            }
        }
        self.fills.push(fill);
    }

    /// The entry of a position still open, if any.
    pub fn open_entry(&self) -> Option<&Fill> {
        self.open_entry.as_ref()
    }
}
