// In app/src/optimizer.rs

use analytics::PerformanceReport;
use anyhow::{Context, Result};
use app_config::types::MACrossoverParams;
use backtester::CrossoverSimulator;
use itertools::Itertools;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::Serialize;
use strategies::MACrossoverSettings;

/// One evaluated parameter set.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub parameters: MACrossoverSettings,
    pub report: PerformanceReport,
}

/// Expands the configured ranges into every `(fast, slow)` pair with
/// `0 < fast < slow`.
pub fn generate_parameter_sets(params: &MACrossoverParams) -> Vec<MACrossoverSettings> {
    params
        .fast_period
        .expand()
        .into_iter()
        .cartesian_product(params.slow_period.expand())
        .filter(|&(fast, slow)| fast > 0 && fast < slow)
        .map(|(fast, slow)| MACrossoverSettings::new(fast, slow))
        .collect()
}

/// The main parallel engine for running an optimization job.
///
/// Every parameter set is simulated independently against the same borrowed
/// price series. Runs that fail are logged and left out of the result.
pub fn run_optimization(
    cores: u32,
    initial_capital: f64,
    prices: &[f64],
    param_sets: &[MACrossoverSettings],
) -> Result<Vec<OptimizationResult>> {
    tracing::info!(cores, sets = param_sets.len(), "Configuring Rayon thread pool.");
    let pool = ThreadPoolBuilder::new()
        .num_threads(cores as usize)
        .build()
        .context("Failed to build Rayon thread pool")?;

    let simulator = CrossoverSimulator::new(initial_capital)?;

    let results = pool.install(|| {
        param_sets
            .par_iter()
            .filter_map(|&parameters| match simulator.run(prices, parameters) {
                Ok(outcome) => Some(OptimizationResult {
                    parameters,
                    report: outcome.report(),
                }),
                Err(e) => {
                    tracing::error!(error = %e, ?parameters, "A single backtest run failed.");
                    None
                }
            })
            .collect()
    });

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_config::ParamValue;

    #[test]
    fn keeps_only_fast_shorter_than_slow() {
        let params = MACrossoverParams {
            fast_period: ParamValue::Range { start: 10, end: 30, step: Some(10) },
            slow_period: ParamValue::Range { start: 20, end: 40, step: Some(20) },
        };
        let sets = generate_parameter_sets(&params);
        let pairs: Vec<(usize, usize)> = sets.iter().map(|s| (s.fast_period, s.slow_period)).collect();
        assert_eq!(pairs, vec![(10, 20), (10, 40), (20, 40), (30, 40)]);
    }

    #[test]
    fn zero_fast_window_is_skipped() {
        let params = MACrossoverParams {
            fast_period: ParamValue::Range { start: 0, end: 1, step: None },
            slow_period: ParamValue::Fixed(5),
        };
        assert_eq!(generate_parameter_sets(&params), vec![MACrossoverSettings::new(1, 5)]);
    }

    #[test]
    fn every_set_gets_a_report() {
        let prices: Vec<f64> = (0..400)
            .map(|i| 100.0 + 15.0 * ((i as f64) * 0.05).sin())
            .collect();
        let sets = vec![
            MACrossoverSettings::new(5, 20),
            MACrossoverSettings::new(10, 40),
            MACrossoverSettings::new(20, 80),
        ];
        let mut results = run_optimization(2, 1_000.0, &prices, &sets).unwrap();
        results.sort_by_key(|r| r.parameters.fast_period);

        assert_eq!(results.len(), 3);
        for (result, settings) in results.iter().zip(&sets) {
            assert_eq!(result.parameters, *settings);
            assert_eq!(result.report.bars, prices.len() - settings.slow_period);
        }
    }

    #[test]
    fn failed_runs_are_dropped() {
        // A buy at a zero price aborts only that run.
        let mut prices: Vec<f64> = (1..=30).map(f64::from).collect();
        prices[4] = 0.0;
        let sets = vec![MACrossoverSettings::new(2, 4), MACrossoverSettings::new(3, 10)];
        let results = run_optimization(1, 1_000.0, &prices, &sets).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].parameters, MACrossoverSettings::new(3, 10));
    }
}
