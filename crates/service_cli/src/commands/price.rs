//! Price command implementation
//!
//! Prices one European option from command-line parameters.

use clap::Args;
use pricer_models::models::{
    JumpParams, ModelKind, OptionType, PricingParameters, StochasticVolParams,
};
use serde::Serialize;
use tracing::info;

use super::{facade_for, print_rows};
use crate::config::{CliConfig, OutputFormat};
use crate::output::{format_value, Tabular};
use crate::{CliError, Result};

/// Arguments of `pricer price`
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Model (gbm, merton, heston, bates, ...)
    #[arg(short, long, default_value = "gbm")]
    pub model: ModelKind,

    /// Option type (call or put)
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Spot price
    #[arg(long)]
    pub spot: f64,

    /// Strike
    #[arg(long)]
    pub strike: f64,

    /// Maturity in years
    #[arg(long)]
    pub maturity: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, allow_negative_numbers = true)]
    pub rate: f64,

    /// Diffusion volatility
    #[arg(long, default_value_t = 0.0)]
    pub volatility: f64,

    /// Jump intensity
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Mean log jump size
    #[arg(long, allow_negative_numbers = true)]
    pub mu: Option<f64>,

    /// Log jump size standard deviation
    #[arg(long)]
    pub delta: Option<f64>,

    /// Variance mean-reversion speed
    #[arg(long)]
    pub kappa: Option<f64>,

    /// Long-run variance
    #[arg(long)]
    pub theta: Option<f64>,

    /// Volatility of variance
    #[arg(long)]
    pub vol_of_vol: Option<f64>,

    /// Spot/variance correlation
    #[arg(long, allow_negative_numbers = true)]
    pub rho: Option<f64>,

    /// Initial variance
    #[arg(long)]
    pub v0: Option<f64>,

    /// Price through Fourier inversion even when a closed form exists
    #[arg(long)]
    pub fourier: bool,

    /// Output format (defaults to the configured format)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

impl PriceArgs {
    /// Builds validated pricing parameters.
    pub fn params(&self) -> Result<PricingParameters> {
        let mut params = PricingParameters::new(
            self.spot,
            self.strike,
            self.maturity,
            self.rate,
            self.volatility,
        )?;
        if let Some(jumps) = self.jumps()? {
            params = params.with_jumps(jumps);
        }
        if let Some(stochastic_vol) = self.stochastic_vol()? {
            params = params.with_stochastic_vol(stochastic_vol);
        }
        params.validate_for(self.model)?;
        Ok(params)
    }

    fn jumps(&self) -> Result<Option<JumpParams>> {
        match (self.lambda, self.mu, self.delta) {
            (None, None, None) => Ok(None),
            (Some(lambda), Some(mu), Some(delta)) => Ok(Some(JumpParams::new(lambda, mu, delta)?)),
            _ => Err(CliError::InvalidArgument(
                "jump parameters need all of --lambda, --mu and --delta".to_string(),
            )),
        }
    }

    fn stochastic_vol(&self) -> Result<Option<StochasticVolParams>> {
        match (self.kappa, self.theta, self.vol_of_vol, self.rho, self.v0) {
            (None, None, None, None, None) => Ok(None),
            (Some(kappa), Some(theta), Some(vol_of_vol), Some(rho), Some(v0)) => Ok(Some(
                StochasticVolParams::new(kappa, theta, vol_of_vol, rho, v0)?,
            )),
            _ => Err(CliError::InvalidArgument(
                "stochastic volatility needs all of --kappa, --theta, --vol-of-vol, --rho and --v0"
                    .to_string(),
            )),
        }
    }
}

/// One priced option.
#[derive(Debug, Clone, Serialize)]
pub struct PriceRow {
    /// Model used
    pub model: ModelKind,
    /// Call or put
    pub option_type: OptionType,
    /// Maturity in years
    pub maturity: f64,
    /// Strike
    pub strike: f64,
    /// Option value
    pub price: f64,
}

impl Tabular for PriceRow {
    const HEADERS: &'static [&'static str] = &["model", "type", "maturity", "strike", "price"];

    fn cells(&self, precision: usize) -> Vec<String> {
        vec![
            self.model.to_string(),
            self.option_type.to_string(),
            format_value(Some(self.maturity), 4),
            format_value(Some(self.strike), 4),
            format_value(Some(self.price), precision),
        ]
    }
}

/// Prices the option described by `args`.
pub fn evaluate(args: &PriceArgs, config: &CliConfig) -> Result<PriceRow> {
    let params = args.params()?;
    let facade = facade_for(config, args.model);
    let price = if args.fourier {
        facade.fourier_price(&params, args.model, args.option_type)?
    } else {
        facade.price(&params, args.model, args.option_type)?
    };

    Ok(PriceRow {
        model: args.model,
        option_type: args.option_type,
        maturity: params.maturity(),
        strike: params.strike(),
        price,
    })
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &CliConfig) -> Result<()> {
    info!("Pricing {} {} option", args.model, args.option_type);
    let row = evaluate(args, config)?;
    print_rows(&[row], args.format, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PriceArgs,
    }

    fn parse(argv: &[&str]) -> PriceArgs {
        let mut full = vec!["pricer"];
        full.extend_from_slice(argv);
        Harness::parse_from(full).args
    }

    #[test]
    fn test_black_scholes_call() {
        let args = parse(&[
            "--spot", "100", "--strike", "100", "--maturity", "1", "--rate", "0.01",
            "--volatility", "0.2",
        ]);
        let row = evaluate(&args, &CliConfig::default()).unwrap();
        assert_eq!(row.model, ModelKind::Gbm);
        assert_relative_eq!(row.price, 8.433318690109608, epsilon = 1e-10);
    }

    #[test]
    fn test_fourier_flag_agrees_with_closed_form() {
        let closed = parse(&[
            "-t", "put", "--spot", "100", "--strike", "110", "--maturity", "0.5", "--rate",
            "0.02", "--volatility", "0.3",
        ]);
        let mut fourier = closed.clone();
        fourier.fourier = true;

        let config = CliConfig::default();
        assert_relative_eq!(
            evaluate(&closed, &config).unwrap().price,
            evaluate(&fourier, &config).unwrap().price,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_heston_reference_value() {
        let args = parse(&[
            "--model", "heston", "--spot", "100", "--strike", "100", "--maturity", "1",
            "--rate", "0", "--kappa", "1.5768", "--theta", "0.0398", "--vol-of-vol", "0.5751",
            "--rho", "-0.5711", "--v0", "0.0175",
        ]);
        let row = evaluate(&args, &CliConfig::default()).unwrap();
        assert_relative_eq!(row.price, 5.785155450, epsilon = 1e-6);
    }

    #[test]
    fn test_partial_jump_block_rejected() {
        let args = parse(&[
            "--model", "merton", "--spot", "100", "--strike", "100", "--maturity", "1",
            "--rate", "0.01", "--volatility", "0.2", "--lambda", "0.4",
        ]);
        assert!(matches!(
            evaluate(&args, &CliConfig::default()),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_missing_block_for_model_rejected() {
        let args = parse(&[
            "--model", "bates", "--spot", "100", "--strike", "100", "--maturity", "1",
            "--rate", "0.01", "--lambda", "0.4", "--mu", "-0.6", "--delta", "0.2",
        ]);
        assert!(matches!(
            evaluate(&args, &CliConfig::default()),
            Err(CliError::Pricing(_))
        ));
    }

    #[test]
    fn test_unknown_model_fails_to_parse() {
        let argv = [
            "pricer", "--model", "cgmy", "--spot", "100", "--strike", "100", "--maturity", "1",
            "--rate", "0.01",
        ];
        assert!(Harness::try_parse_from(argv).is_err());
    }
}
