// In crates/strategies/src/ma_crossover.rs

use crate::sma::{MovingAverageSeries, SimpleMovingAverage};
use crate::types::MACrossoverSettings;
use crate::Strategy;
use core_types::{Result, Signal};

/// Dual simple-moving-average crossover.
///
/// Both averages are computed once, up front, from the full price series. At
/// each bar the strategy compares the fast and slow values that were known
/// at the close of the previous bar:
///
/// * fast above slow: `Signal::Buy`
/// * fast below slow: `Signal::Sell`
/// * equal, or either average not yet defined: `Signal::Hold`
///
/// This is a level comparison, not an edge trigger. The simulator decides
/// whether a signal results in a transition based on the current position.
#[derive(Debug, Clone)]
pub struct MACrossover {
    /// The configuration for this strategy instance.
    settings: MACrossoverSettings,
    fast: MovingAverageSeries,
    slow: MovingAverageSeries,
}

impl MACrossover {
    /// Prepares the strategy for `prices`, computing both averages.
    pub fn new(settings: MACrossoverSettings, prices: &[f64]) -> Result<Self> {
        if settings.fast_period >= settings.slow_period {
            tracing::warn!(
                fast = settings.fast_period,
                slow = settings.slow_period,
                "Fast window is not shorter than slow window; signals will be inverted or flat."
            );
        }

        let fast = SimpleMovingAverage::new(settings.fast_period)?.compute(prices);
        let slow = SimpleMovingAverage::new(settings.slow_period)?.compute(prices);

        Ok(Self { settings, fast, slow })
    }
}

/// Maps a fast/slow pair onto a signal.
pub fn crossover_signal(fast_value: f64, slow_value: f64) -> Signal {
    if fast_value > slow_value {
        Signal::Buy
    } else if fast_value < slow_value {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

impl Strategy for MACrossover {
    fn name(&self) -> &'static str {
        "MACrossover"
    }

    fn first_bar(&self) -> usize {
        self.settings.first_bar()
    }

    fn assess(&self, bar: usize) -> Signal {
        match (self.fast.signal_value(bar), self.slow.signal_value(bar)) {
            (Some(fast), Some(slow)) => crossover_signal(fast, slow),
            _ => Signal::Hold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Error;

    #[test]
    fn level_comparison_drives_signal() {
        assert_eq!(crossover_signal(2.0, 1.0), Signal::Buy);
        assert_eq!(crossover_signal(1.0, 2.0), Signal::Sell);
        assert_eq!(crossover_signal(1.5, 1.5), Signal::Hold);
    }

    #[test]
    fn rising_prices_signal_buy_from_first_bar() {
        let prices: Vec<f64> = (1..=12).map(f64::from).collect();
        let strategy = MACrossover::new(MACrossoverSettings::new(2, 4), &prices).unwrap();

        assert_eq!(strategy.first_bar(), 4);
        for bar in strategy.first_bar()..prices.len() {
            assert_eq!(strategy.assess(bar), Signal::Buy, "bar {bar}");
        }
    }

    #[test]
    fn falling_prices_signal_sell() {
        let prices: Vec<f64> = (1..=12).rev().map(f64::from).collect();
        let strategy = MACrossover::new(MACrossoverSettings::new(2, 4), &prices).unwrap();
        assert_eq!(strategy.assess(4), Signal::Sell);
    }

    #[test]
    fn assess_holds_before_averages_exist() {
        let prices = vec![10.0; 8];
        let strategy = MACrossover::new(MACrossoverSettings::new(2, 4), &prices).unwrap();
        assert_eq!(strategy.assess(0), Signal::Hold);
        assert_eq!(strategy.assess(3), Signal::Hold);
        assert_eq!(strategy.assess(100), Signal::Hold);
    }

    #[test]
    fn uses_averages_closed_on_previous_bar() {
        // A spike on bar 4 must not influence the decision taken at bar 4.
        let prices = vec![10.0, 10.0, 10.0, 10.0, 50.0, 10.0];
        let strategy = MACrossover::new(MACrossoverSettings::new(2, 4), &prices).unwrap();
        assert_eq!(strategy.assess(4), Signal::Hold);
        assert_eq!(strategy.assess(5), Signal::Buy);
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = MACrossover::new(MACrossoverSettings::new(0, 4), &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, Error::InvalidWindow);
    }

    #[test]
    fn inverted_windows_start_at_slow_and_hold_until_fast_exists() {
        let prices: Vec<f64> = (1..=10).map(f64::from).collect();
        let strategy = MACrossover::new(MACrossoverSettings::new(5, 3), &prices).unwrap();

        assert_eq!(strategy.first_bar(), 3);
        assert_eq!(strategy.assess(3), Signal::Hold);
        assert_eq!(strategy.assess(4), Signal::Hold);
        // Bar 5: fast mean(1..=5) = 3 against slow mean(3, 4, 5) = 4.
        assert_eq!(strategy.assess(5), Signal::Sell);
    }
}
