pub mod logger;
pub mod simulator;

pub use core_types::{Error, PositionState, PriceSeries, Result, Side};
pub use logger::{Fill, TradeLogger};
pub use simulator::{BacktestOutcome, CrossoverSimulator};
pub use strategies::MACrossoverSettings;

use tracing::info;

/// The main engine for running historical backtests over a loaded price series.
///
/// The engine owns the price buffer and the starting capital. Every run starts
/// from `AllCash(initial_capital)`; nothing carries over between runs.
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    simulator: CrossoverSimulator,
    prices: PriceSeries,
}

impl BacktestEngine {
    /// Creates an engine with no price data and the given starting capital.
    pub fn new(initial_capital: f64) -> Result<Self> {
        Ok(Self {
            simulator: CrossoverSimulator::new(initial_capital)?,
            prices: PriceSeries::default(),
        })
    }

    /// Replaces the engine's price series. Previously loaded data is dropped.
    pub fn load_data(&mut self, prices: impl Into<PriceSeries>) {
        self.prices = prices.into();
        info!(bars = self.prices.len(), "Loaded price data into engine.");
    }

    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    pub fn initial_capital(&self) -> f64 {
        self.simulator.initial_capital()
    }

    /// The position every run starts from.
    pub fn initial_position(&self) -> PositionState {
        PositionState::AllCash(self.simulator.initial_capital())
    }

    /// Runs the fast/slow SMA crossover and returns the equity curve.
    pub fn run_strategy(&self, fast_window: usize, slow_window: usize) -> Result<Vec<f64>> {
        self.run_detailed(MACrossoverSettings::new(fast_window, slow_window))
            .map(|outcome| outcome.equity_curve)
    }

    /// Runs the crossover and returns the full outcome (fills, trades, final position).
    pub fn run_detailed(&self, settings: MACrossoverSettings) -> Result<BacktestOutcome> {
        info!(
            fast = settings.fast_period,
            slow = settings.slow_period,
            bars = self.prices.len(),
            "Running SMA crossover backtest."
        );

        let outcome = self.simulator.run(&self.prices, settings)?;

        info!(
            trades = outcome.trades.len(),
            fills = outcome.fills.len(),
            final_position = ?outcome.final_position,
            "Backtest finished."
        );
        Ok(outcome)
    }
}
