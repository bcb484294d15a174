// In crates/backtester/src/simulator.rs

use crate::logger::{Fill, TradeLogger};
use analytics::{AnalyticsEngine, PerformanceReport, Trade};
use core_types::{Error, PositionState, Result, Side, Signal};
use strategies::{MACrossover, MACrossoverSettings, Strategy};

/// Everything a single simulated run produces.
#[derive(Debug, Clone)]
pub struct BacktestOutcome {
    pub initial_capital: f64,
    /// One mark-to-market value per simulated bar.
    pub equity_curve: Vec<f64>,
    pub fills: Vec<Fill>,
    /// Completed buy/sell round trips.
    pub trades: Vec<Trade>,
    /// Position at the end of the run. It is not liquidated.
    pub final_position: PositionState,
}

impl BacktestOutcome {
    pub fn report(&self) -> PerformanceReport {
        AnalyticsEngine::new().calculate(self.initial_capital, &self.trades, &self.equity_curve)
    }
}

/// Replays a price series bar by bar, switching between all-cash and
/// all-asset on the strategy's signals.
#[derive(Debug, Clone, Copy)]
pub struct CrossoverSimulator {
    initial_capital: f64,
}

impl CrossoverSimulator {
    pub fn new(initial_capital: f64) -> Result<Self> {
        if !initial_capital.is_finite() || initial_capital < 0.0 {
            return Err(Error::InvalidCapital(initial_capital));
        }
        Ok(Self { initial_capital })
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    /// Runs the dual moving-average crossover over `prices`.
    pub fn run(&self, prices: &[f64], settings: MACrossoverSettings) -> Result<BacktestOutcome> {
        let strategy = MACrossover::new(settings, prices)?;
        self.run_strategy(prices, &strategy)
    }

    /// Runs any strategy over `prices`, starting from `AllCash(initial_capital)`.
    ///
    /// Simulation begins at `strategy.first_bar()`; a series that does not
    /// reach it yields an empty equity curve. Each bar is decided and marked
    /// to market before the next one is looked at.
    pub fn run_strategy<S>(&self, prices: &[f64], strategy: &S) -> Result<BacktestOutcome>
    where
        S: Strategy + ?Sized,
    {
        let start = strategy.first_bar();
        let bars = prices.len().saturating_sub(start);
        tracing::debug!(strategy = strategy.name(), start, bars, "Starting simulation.");

        let mut position = PositionState::AllCash(self.initial_capital);
        let mut logger = TradeLogger::with_capacity(bars);

        for (bar, &price) in prices.iter().enumerate().skip(start) {
            position = match (strategy.assess(bar), position) {
                (Signal::Buy, PositionState::AllCash(cash)) if cash > 0.0 => {
                    if !price.is_finite() || price <= 0.0 {
                        tracing::error!(bar, price, "Cannot buy at a non-positive price.");
                        return Err(Error::InvalidPrice { index: bar, price });
                    }
                    let quantity = cash / price;
                    logger.record_fill(Fill { bar, side: Side::Buy, price, quantity, value: cash });
                    tracing::debug!(bar, price, quantity, "Bought with all cash.");
                    PositionState::AllAsset(quantity)
                }
                (Signal::Sell, PositionState::AllAsset(quantity)) if quantity > 0.0 => {
                    let cash = quantity * price;
                    logger.record_fill(Fill { bar, side: Side::Sell, price, quantity, value: cash });
                    tracing::debug!(bar, price, cash, "Sold entire position.");
                    PositionState::AllCash(cash)
                }
                (_, unchanged) => unchanged,
            };

            logger.record_equity(position.market_value(price));
        }

        tracing::debug!(
            fills = logger.fills.len(),
            final_equity = logger.equity_curve.last().copied().unwrap_or(self.initial_capital),
            "Simulation finished."
        );

        Ok(BacktestOutcome {
            initial_capital: self.initial_capital,
            equity_curve: logger.equity_curve,
            fills: logger.fills,
            trades: logger.trades,
            final_position: position,
        })
    }
}
