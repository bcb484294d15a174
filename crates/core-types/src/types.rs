// In crates/core-types/src/types.rs

use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// An ordered, bar-indexed series of prices.
///
/// The series is immutable once built. Components that need it (the moving
/// average calculator, the simulator) borrow it as a plain `&[f64]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries(Vec<f64>);

impl PriceSeries {
    pub fn new(prices: Vec<f64>) -> Self {
        Self(prices)
    }

    /// The last price in the series, if any.
    pub fn last_price(&self) -> Option<f64> {
        self.0.last().copied()
    }
}

impl From<Vec<f64>> for PriceSeries {
    fn from(prices: Vec<f64>) -> Self {
        Self::new(prices)
    }
}

impl FromIterator<f64> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for PriceSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// The direction of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// A trading signal produced by a strategy for a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

/// The all-in/all-out position of the simulated portfolio.
///
/// The portfolio is either entirely in cash or entirely in the instrument,
/// never a mix of both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PositionState {
    /// Holding only cash.
    AllCash(f64),
    /// Holding only a quantity of the instrument.
    AllAsset(f64),
}

impl PositionState {
    pub fn cash(&self) -> f64 {
        match *self {
            PositionState::AllCash(amount) => amount,
            PositionState::AllAsset(_) => 0.0,
        }
    }

    pub fn quantity(&self) -> f64 {
        match *self {
            PositionState::AllCash(_) => 0.0,
            PositionState::AllAsset(quantity) => quantity,
        }
    }

    /// Mark-to-market value of the position at `price`.
    pub fn market_value(&self, price: f64) -> f64 {
        self.cash() + self.quantity() * price
    }

    pub fn is_invested(&self) -> bool {
        matches!(self, PositionState::AllAsset(q) if *q > 0.0)
    }
}

impl Default for PositionState {
    fn default() -> Self {
        PositionState::AllCash(0.0)
    }
}
