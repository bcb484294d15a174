// In crates/app-config/src/types.rs

use serde::Deserialize;
use strategies::types::MACrossoverSettings;

use crate::{Error, Result};

// Define the container for all strategy settings
#[derive(Deserialize, Debug, Default, Clone)]
pub struct StrategySettings {
    pub ma_crossover: Option<MACrossoverSettings>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub backtest: BacktestSettings,
    /// Parameters of the synthetic price series.
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub strategies: StrategySettings,
}

impl Settings {
    /// Checks the values serde cannot: ranges and non-zero counts.
    pub fn validate(&self) -> Result<()> {
        if !self.backtest.initial_capital.is_finite() || self.backtest.initial_capital < 0.0 {
            return Err(Error::Invalid {
                key: "backtest.initial_capital",
                reason: format!("must be a non-negative amount, got {}", self.backtest.initial_capital),
            });
        }
        if self.app.optimizer_cores == 0 {
            return Err(Error::Invalid {
                key: "app.optimizer_cores",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.data.start_price > 0.0) {
            return Err(Error::Invalid {
                key: "data.start_price",
                reason: format!("must be positive, got {}", self.data.start_price),
            });
        }
        if !(self.data.volatility >= 0.0) {
            return Err(Error::Invalid {
                key: "data.volatility",
                reason: format!("must be non-negative, got {}", self.data.volatility),
            });
        }
        if let Some(ma) = &self.strategies.ma_crossover {
            if ma.fast_period == 0 || ma.slow_period == 0 {
                return Err(Error::Invalid {
                    key: "strategies.ma_crossover",
                    reason: "moving average periods must be at least 1".into(),
                });
            }
        }
        Ok(())
    }

    /// The configured crossover windows, or the defaults when none are set.
    pub fn ma_crossover(&self) -> MACrossoverSettings {
        self.strategies.ma_crossover.unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// The log level for the application.
    pub log_level: String,
    /// Size of the thread pool used by the optimizer.
    pub optimizer_cores: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            optimizer_cores: 4,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BacktestSettings {
    pub initial_capital: f64,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self { initial_capital: 10_000.0 }
    }
}

/// Random-walk price generation: `price[t] = start_price * prod(1 + r)`,
/// with `r ~ Normal(drift, volatility)`.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DataSettings {
    pub points: usize,
    pub seed: u64,
    pub drift: f64,
    pub volatility: f64,
    pub start_price: f64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            points: 1_000_000,
            seed: 42,
            drift: 0.0001,
            volatility: 0.01,
            start_price: 100.0,
        }
    }
}

// --- Structs for optimizer.toml ---

#[derive(Deserialize, Debug, Clone)]
pub struct OptimizerConfig {
    pub job: JobSettings,
    pub ma_crossover_params: MACrossoverParams,
}

#[derive(Deserialize, Debug, Clone)]
pub struct JobSettings {
    pub name: String,
    /// How many ranked parameter sets to print.
    #[serde(default = "default_top")]
    pub top: usize,
    /// Runs with fewer closed trades are left out of the ranking.
    #[serde(default)]
    pub min_trades: u32,
}

fn default_top() -> usize {
    5
}

#[derive(Deserialize, Debug, Clone)]
pub struct MACrossoverParams {
    pub fast_period: ParamValue,
    pub slow_period: ParamValue,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)] // Allows serde to try parsing as one variant, then the next
pub enum ParamValue {
    Fixed(usize),
    Range { start: usize, end: usize, step: Option<usize> },
}

impl ParamValue {
    /// Expands the value into every integer it covers, `end` inclusive.
    pub fn expand(&self) -> Vec<usize> {
        match *self {
            ParamValue::Fixed(v) => vec![v],
            ParamValue::Range { start, end, step } => {
                (start..=end).step_by(step.unwrap_or(1).max(1)).collect()
            }
        }
    }
}
