// In crates/strategies/src/lib.rs

use core_types::Signal;
pub mod ma_crossover;
pub mod sma;
pub mod types;

pub use ma_crossover::MACrossover;
pub use sma::{MovingAverageSeries, SimpleMovingAverage};
pub use types::MACrossoverSettings;

/// The universal interface for a trading strategy.
///
/// A strategy is prepared once against a price series and then asked for a
/// `Signal` bar by bar. It must not look at prices after the bar it is asked
/// about.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// The first bar index for which `assess` produces a meaningful signal.
    fn first_bar(&self) -> usize;

    fn assess(&self, bar: usize) -> Signal;
}
