//! Grid command implementation
//!
//! Prices every (maturity, strike, option type) point of a scenario file.

use std::path::PathBuf;

use clap::Args;
use pricer_models::models::{ModelKind, OptionType};
use serde::Serialize;
use tracing::{info, warn};

use super::{facade_for, print_rows};
use crate::config::{CliConfig, OutputFormat};
use crate::output::{format_value, Tabular};
use crate::scenario::Scenario;
use crate::Result;

/// Arguments of `pricer grid`
#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Scenario file (TOML)
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Output format (defaults to the configured format)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// One grid point. `price` is absent when the point failed to price.
#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    /// Model used
    pub model: ModelKind,
    /// Call or put
    pub option_type: OptionType,
    /// Maturity in years
    pub maturity: f64,
    /// Strike
    pub strike: f64,
    /// Option value
    pub price: Option<f64>,
    /// Failure reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Tabular for GridRow {
    const HEADERS: &'static [&'static str] = &["model", "type", "maturity", "strike", "price"];

    fn cells(&self, precision: usize) -> Vec<String> {
        vec![
            self.model.to_string(),
            self.option_type.to_string(),
            format_value(Some(self.maturity), 4),
            format_value(Some(self.strike), 4),
            format_value(self.price, precision),
        ]
    }
}

/// Prices the full scenario grid in parallel.
pub fn evaluate(scenario: &Scenario, config: &CliConfig) -> Result<Vec<GridRow>> {
    let requests = scenario.requests()?;
    let facade = facade_for(config, scenario.model);
    let results = facade.price_grid(&requests);

    let rows: Vec<GridRow> = requests
        .iter()
        .zip(results)
        .map(|(request, result)| {
            let (price, error) = match result {
                Ok(price) => (Some(price), None),
                Err(e) => {
                    warn!(
                        maturity = request.params.maturity(),
                        strike = request.params.strike(),
                        "grid point failed: {}",
                        e
                    );
                    (None, Some(e.to_string()))
                }
            };
            GridRow {
                model: request.kind,
                option_type: request.option_type,
                maturity: request.params.maturity(),
                strike: request.params.strike(),
                price,
                error,
            }
        })
        .collect();

    Ok(rows)
}

/// Run the grid command
pub fn run(args: &GridArgs, config: &CliConfig) -> Result<()> {
    info!("Loading scenario {}", args.scenario.display());
    let scenario = Scenario::from_file(&args.scenario)?;
    let rows = evaluate(&scenario, config)?;

    let failures = rows.iter().filter(|row| row.error.is_some()).count();
    info!(
        points = rows.len(),
        failures,
        "Priced {} grid",
        scenario.model
    );
    print_rows(&rows, args.format, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MERTON: &str = r#"
        model = "merton"
        maturities = [0.244, 1.0]
        strikes = [90.0, 100.0, 110.0]
        option_types = ["put"]

        [parameters]
        spot = 100.0
        rate = 0.01
        volatility = 0.2

        [parameters.jumps]
        lambda = 0.4
        mu = -0.6
        delta = 0.2
    "#;

    #[test]
    fn test_grid_rows_follow_scenario_order() {
        let scenario = Scenario::from_toml_str(MERTON).unwrap();
        let rows = evaluate(&scenario, &CliConfig::default()).unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row.option_type == OptionType::Put));
        assert_eq!(rows[1].maturity, 0.244);
        assert_eq!(rows[1].strike, 100.0);
        assert_relative_eq!(rows[1].price.unwrap(), 5.887, epsilon = 1e-2);
    }

    #[test]
    fn test_put_values_increase_with_strike() {
        let scenario = Scenario::from_toml_str(MERTON).unwrap();
        let rows = evaluate(&scenario, &CliConfig::default()).unwrap();
        for window in rows[..3].windows(2) {
            assert!(window[0].price.unwrap() < window[1].price.unwrap());
        }
    }

    #[test]
    fn test_missing_scenario_file() {
        let args = GridArgs {
            scenario: std::env::temp_dir().join("pricer-missing-scenario.toml"),
            format: None,
        };
        assert!(matches!(
            run(&args, &CliConfig::default()),
            Err(crate::CliError::FileNotFound(_))
        ));
    }
}
