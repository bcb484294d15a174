// In crates/strategies/src/sma.rs

use core_types::{Error, Result};

/// Simple moving average over a fixed window of bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleMovingAverage {
    window: usize,
}

impl SimpleMovingAverage {
    /// Creates a calculator for the given window. A zero window is rejected.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(Error::InvalidWindow);
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Computes the moving average series of `prices`.
    ///
    /// Element `k` is the mean of `prices[k..k + window]`, so the first element
    /// lines up with bar `window - 1`. Returns an empty series when there are
    /// fewer prices than the window.
    ///
    /// After the first window the running sum is rolled forward by adding the
    /// entering price and dropping the leaving one (`sum += new - old`), never
    /// re-summed. Callers rely on this exact summation order.
    pub fn compute(&self, prices: &[f64]) -> MovingAverageSeries {
        let window = self.window;
        if prices.len() < window {
            return MovingAverageSeries { window, values: Vec::new() };
        }

        let divisor = window as f64;
        let mut values = Vec::with_capacity(prices.len() - window + 1);

        let mut sum: f64 = prices[..window].iter().sum();
        values.push(sum / divisor);

        for i in window..prices.len() {
            sum += prices[i] - prices[i - window];
            values.push(sum / divisor);
        }

        MovingAverageSeries { window, values }
    }
}

/// The output of [`SimpleMovingAverage::compute`], tagged with its window.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverageSeries {
    window: usize,
    values: Vec<f64>,
}

impl MovingAverageSeries {
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The average used when trading at price bar `bar`.
    ///
    /// Index `bar - window` is the average whose window ends at `bar - 1`, the
    /// last bar fully closed before the trade price. `None` before that
    /// average exists.
    pub fn signal_value(&self, bar: usize) -> Option<f64> {
        bar.checked_sub(self.window)
            .and_then(|idx| self.values.get(idx))
            .copied()
    }
}

/// Convenience wrapper: validates the window and computes in one call.
pub fn compute_sma(prices: &[f64], window: usize) -> Result<Vec<f64>> {
    Ok(SimpleMovingAverage::new(window)?.compute(prices).into_values())
}
