//! Compare command implementation
//!
//! Reads Monte Carlo estimates produced elsewhere and sets them against the
//! Fourier prices of the same scenario. Every row is priced through the
//! transform, including GBM rows that `price` would value in closed form.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use pricer_models::models::OptionType;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{facade_for, print_rows};
use crate::config::{CliConfig, OutputFormat};
use crate::output::{format_value, Tabular};
use crate::scenario::Scenario;
use crate::{CliError, Result};

/// Arguments of `pricer compare`
#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    /// Scenario file (TOML) supplying the model and market
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Monte Carlo values (CSV: maturity,strike,option_type,value)
    #[arg(long)]
    pub mc: PathBuf,

    /// Output format (defaults to the configured format)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// One Monte Carlo estimate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MonteCarloValue {
    /// Maturity in years
    pub maturity: f64,
    /// Strike
    pub strike: f64,
    /// Call or put
    pub option_type: OptionType,
    /// Estimated option value
    pub value: f64,
}

/// Reads Monte Carlo estimates from CSV.
pub fn read_monte_carlo<R: Read>(reader: R) -> Result<Vec<MonteCarloValue>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let values = reader
        .deserialize()
        .collect::<std::result::Result<Vec<MonteCarloValue>, csv::Error>>()?;
    Ok(values)
}

/// Fourier price against a Monte Carlo estimate.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    /// Maturity in years
    pub maturity: f64,
    /// Strike
    pub strike: f64,
    /// Call or put
    pub option_type: OptionType,
    /// Fourier reference price
    pub fourier: f64,
    /// Monte Carlo estimate
    pub monte_carlo: f64,
    /// `monte_carlo - fourier`
    pub dif: f64,
    /// `dif / fourier`, absent when the reference price is zero
    pub rel_dif: Option<f64>,
}

impl ComparisonRow {
    fn new(estimate: &MonteCarloValue, fourier: f64) -> Self {
        let dif = estimate.value - fourier;
        let rel_dif = (fourier != 0.0).then(|| dif / fourier);
        Self {
            maturity: estimate.maturity,
            strike: estimate.strike,
            option_type: estimate.option_type,
            fourier,
            monte_carlo: estimate.value,
            dif,
            rel_dif,
        }
    }
}

impl Tabular for ComparisonRow {
    const HEADERS: &'static [&'static str] = &[
        "maturity",
        "strike",
        "type",
        "fourier",
        "monte_carlo",
        "dif",
        "rel_dif",
    ];

    fn cells(&self, precision: usize) -> Vec<String> {
        vec![
            format_value(Some(self.maturity), 4),
            format_value(Some(self.strike), 4),
            self.option_type.to_string(),
            format_value(Some(self.fourier), precision),
            format_value(Some(self.monte_carlo), precision),
            format_value(Some(self.dif), precision),
            format_value(self.rel_dif, precision),
        ]
    }
}

/// Mean absolute difference over all rows; `None` when there are none.
pub fn mean_abs_dif(rows: &[ComparisonRow]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(|row| row.dif.abs()).sum::<f64>() / rows.len() as f64)
}

/// Prices each estimate's contract under the scenario model by Fourier
/// inversion, in parallel and in input order.
pub fn evaluate(
    scenario: &Scenario,
    estimates: &[MonteCarloValue],
    config: &CliConfig,
) -> Result<Vec<ComparisonRow>> {
    let facade = facade_for(config, scenario.model);
    estimates
        .par_iter()
        .map(|estimate| -> Result<ComparisonRow> {
            let params = scenario.params_at(estimate.maturity, estimate.strike)?;
            let fourier = facade.fourier_price(&params, scenario.model, estimate.option_type)?;
            Ok(ComparisonRow::new(estimate, fourier))
        })
        .collect()
}

/// Run the compare command
pub fn run(args: &CompareArgs, config: &CliConfig) -> Result<()> {
    let scenario = Scenario::from_file(&args.scenario)?;
    if !args.mc.exists() {
        return Err(CliError::FileNotFound(args.mc.display().to_string()));
    }
    let estimates = read_monte_carlo(std::fs::File::open(&args.mc)?)?;
    info!(
        "Comparing {} Monte Carlo values against {} Fourier prices",
        estimates.len(),
        scenario.model
    );

    let rows = evaluate(&scenario, &estimates, config)?;
    let format = args.format.unwrap_or(config.output.format);
    print_rows(&rows, Some(format), config)?;

    if let Some(mean) = mean_abs_dif(&rows) {
        info!(mean_abs_dif = mean, "comparison complete");
        if format == OutputFormat::Table {
            println!("mean |dif|: {}", format_value(Some(mean), config.output.precision));
        }
    }
    Ok(())
}
