// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, Map};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{OptimizerConfig, ParamValue, Settings};

/// Loads the application settings from the `config/` directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Same as [`load_settings`], reading from an explicit directory and environment name.
pub fn load_settings_from(dir: &Path, environment: &str) -> Result<Settings> {
    load_layered(dir, environment, None)
}

/// Environment variable source: `APP_BACKTEST__INITIAL_CAPITAL=2500` sets
/// `backtest.initial_capital`. `vars` replaces the process environment when given.
fn env_source(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

fn load_layered(dir: &Path, environment: &str, env_vars: Option<Map<String, String>>) -> Result<Settings> {
    let base = dir.join("base");
    let overlay = dir.join(environment);

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name(&base.to_string_lossy()))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&overlay.to_string_lossy()).required(false))
        // 3. Load settings from environment variables (e.g., `APP_BACKTEST__INITIAL_CAPITAL=...`).
        .add_source(env_source(env_vars))
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}

/// Loads the parameter grid for the optimizer from a TOML file.
pub fn load_optimizer_config(path: &Path) -> Result<OptimizerConfig> {
    let content = std::fs::read_to_string(path)?;

    let config: OptimizerConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn base_file_with_environment_overlay() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.toml"),
            r#"
[app]
log_level = "debug"
optimizer_cores = 2

[backtest]
initial_capital = 5000.0

[strategies.ma_crossover]
fast_period = 10
slow_period = 30
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            "[backtest]\ninitial_capital = 7500.0\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), "staging").unwrap();
        assert_eq!(settings.app.log_level, "debug");
        assert_eq!(settings.app.optimizer_cores, 2);
        assert_eq!(settings.backtest.initial_capital, 7500.0);
        assert_eq!(settings.ma_crossover().fast_period, 10);
        assert_eq!(settings.ma_crossover().slow_period, 30);
        // Unset sections fall back to defaults.
        assert_eq!(settings.data.seed, 42);
        assert_eq!(settings.data.points, 1_000_000);
    }

    #[test]
    fn environment_variables_override_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.toml"),
            "[backtest]\ninitial_capital = 1000.0\n\n[app]\nlog_level = \"info\"\n",
        )
        .unwrap();

        let vars = Map::from_iter([
            ("APP_BACKTEST__INITIAL_CAPITAL".to_string(), "2500".to_string()),
            ("APP_APP__LOG_LEVEL".to_string(), "warn".to_string()),
            ("APP_ENVIRONMENT".to_string(), "development".to_string()),
            ("OTHER_BACKTEST__INITIAL_CAPITAL".to_string(), "1".to_string()),
        ]);
        let settings = load_layered(dir.path(), "development", Some(vars)).unwrap();
        assert_eq!(settings.backtest.initial_capital, 2500.0);
        assert_eq!(settings.app.log_level, "warn");
    }

    #[test]
    fn missing_overlay_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), "[backtest]\ninitial_capital = 1.0\n").unwrap();

        let settings = load_settings_from(dir.path(), "production").unwrap();
        assert_eq!(settings.backtest.initial_capital, 1.0);
        assert_eq!(settings.ma_crossover(), strategies::MACrossoverSettings::new(50, 200));
    }

    #[test]
    fn missing_base_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_settings_from(dir.path(), "development"),
            Err(Error::LoadError(_))
        ));
    }

    #[test]
    fn negative_capital_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), "[backtest]\ninitial_capital = -5.0\n").unwrap();
        assert!(matches!(
            load_settings_from(dir.path(), "development"),
            Err(Error::Invalid { key: "backtest.initial_capital", .. })
        ));
    }

    #[test]
    fn optimizer_config_round_trips_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optimizer.toml");
        fs::write(
            &path,
            r#"
[job]
name = "sma-grid"

[ma_crossover_params]
fast_period = { start = 5, end = 15, step = 5 }
slow_period = 40
"#,
        )
        .unwrap();

        let config = load_optimizer_config(&path).unwrap();
        assert_eq!(config.job.name, "sma-grid");
        assert_eq!(config.job.top, 5);
        assert_eq!(config.ma_crossover_params.fast_period.expand(), vec![5, 10, 15]);
        assert_eq!(config.ma_crossover_params.slow_period, ParamValue::Fixed(40));
    }

    #[test]
    fn missing_optimizer_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_optimizer_config(&dir.path().join("nope.toml")),
            Err(Error::IoError(_))
        ));
    }
}
