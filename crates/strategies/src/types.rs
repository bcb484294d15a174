// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)] // Clone is needed for the optimizer
pub struct MACrossoverSettings {
    /// Window of the short-term ("fast") moving average, in bars.
    pub fast_period: usize,
    /// Window of the long-term ("slow") moving average, in bars.
    pub slow_period: usize,
}

impl MACrossoverSettings {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self { fast_period, slow_period }
    }

    /// The first simulated bar: the first one with a slow average to trade on.
    ///
    /// With `fast_period > slow_period` the fast average is still missing for
    /// the first few bars. Those bars hold.
    pub fn first_bar(&self) -> usize {
        self.slow_period
    }
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self { fast_period: 50, slow_period: 200 }
    }
}
