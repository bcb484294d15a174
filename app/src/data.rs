// In app/src/data.rs

use anyhow::{Result, anyhow};
use app_config::types::DataSettings;
use core_types::PriceSeries;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

/// Generates a seeded geometric random walk.
///
/// Per-bar returns are drawn from `Normal(drift, volatility)` and compounded
/// onto `start_price`, so bar 0 is already one step away from the start.
pub fn generate_random_walk(settings: &DataSettings) -> Result<PriceSeries> {
    let returns = Normal::new(settings.drift, settings.volatility)
        .map_err(|e| anyhow!("Invalid return distribution: {}", e))?;
    let mut rng = StdRng::seed_from_u64(settings.seed);

    let mut price = settings.start_price;
    let prices = (0..settings.points)
        .map(|_| {
            price *= 1.0 + rng.sample(returns);
            price
        })
        .collect();

    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(points: usize, seed: u64) -> DataSettings {
        DataSettings {
            points,
            seed,
            ..DataSettings::default()
        }
    }

    #[test]
    fn same_seed_same_series() {
        let a = generate_random_walk(&settings(1_000, 42)).unwrap();
        let b = generate_random_walk(&settings(1_000, 42)).unwrap();
        let c = generate_random_walk(&settings(1_000, 7)).unwrap();
        assert_eq!(a.len(), 1_000);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn zero_volatility_compounds_drift() {
        let walk = DataSettings {
            points: 3,
            drift: 0.1,
            volatility: 0.0,
            start_price: 100.0,
            ..DataSettings::default()
        };
        let prices = generate_random_walk(&walk).unwrap();
        let expected = [110.0, 121.0, 133.1];
        for (p, e) in prices.iter().zip(expected) {
            assert!((p - e).abs() < 1e-9, "expected {e}, got {p}");
        }
    }

    #[test]
    fn default_walk_stays_positive() {
        let prices = generate_random_walk(&settings(10_000, 42)).unwrap();
        assert!(prices.iter().all(|p| *p > 0.0));
    }

    #[test]
    fn negative_volatility_is_rejected() {
        let walk = DataSettings {
            volatility: -1.0,
            ..DataSettings::default()
        };
        assert!(generate_random_walk(&walk).is_err());
    }
}
