//! Scenario files: one model, one market, a grid of maturities and strikes.
//!
//! ```toml
//! model = "bates"
//! maturities = [0.25, 0.5, 1.0]
//! strikes = [90.0, 100.0, 110.0]
//! option_types = ["put"]
//!
//! [parameters]
//! spot = 100.0
//! rate = 0.01
//!
//! [parameters.jumps]
//! lambda = 0.4
//! mu = -0.6
//! delta = 0.2
//!
//! [parameters.stochastic_vol]
//! kappa = 1.5768
//! theta = 0.0398
//! vol_of_vol = 0.5751
//! rho = -0.5711
//! v0 = 0.0175
//! ```

use std::path::Path;

use pricer_models::models::{
    JumpParams, ModelKind, OptionType, PricingParameters, StochasticVolParams,
};
use pricer_models::pricing::PricingRequest;
use serde::Deserialize;

use crate::{CliError, Result};

/// Market inputs shared by every point of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MarketParameters {
    /// Spot price
    pub spot: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Diffusion volatility (unused by the stochastic-volatility models)
    #[serde(default)]
    pub volatility: f64,
    /// Jump block for jump models
    #[serde(default)]
    pub jumps: Option<JumpParams>,
    /// Variance block for stochastic-volatility models
    #[serde(default)]
    pub stochastic_vol: Option<StochasticVolParams>,
}

impl MarketParameters {
    /// Valuation inputs at one grid point.
    pub fn at(&self, maturity: f64, strike: f64) -> Result<PricingParameters> {
        let mut builder = PricingParameters::builder()
            .spot(self.spot)
            .strike(strike)
            .maturity(maturity)
            .rate(self.rate)
            .volatility(self.volatility);
        if let Some(jumps) = self.jumps {
            builder = builder.jumps(jumps);
        }
        if let Some(stochastic_vol) = self.stochastic_vol {
            builder = builder.stochastic_vol(stochastic_vol);
        }
        Ok(builder.build()?)
    }
}

/// A pricing scenario read from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Model to price under
    pub model: ModelKind,
    /// Market inputs
    pub parameters: MarketParameters,
    /// Maturities in years
    pub maturities: Vec<f64>,
    /// Strikes
    pub strikes: Vec<f64>,
    /// Option sides to price
    #[serde(default = "default_option_types")]
    pub option_types: Vec<OptionType>,
}

fn default_option_types() -> Vec<OptionType> {
    OptionType::BOTH.to_vec()
}

impl Scenario {
    /// Reads a scenario file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a scenario.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks the grid is non-empty and the market carries the blocks the
    /// model needs.
    pub fn validate(&self) -> Result<()> {
        if self.maturities.is_empty() {
            return Err(CliError::InvalidArgument(
                "scenario maturities must not be empty".to_string(),
            ));
        }
        if self.strikes.is_empty() {
            return Err(CliError::InvalidArgument(
                "scenario strikes must not be empty".to_string(),
            ));
        }
        if self.option_types.is_empty() {
            return Err(CliError::InvalidArgument(
                "scenario option_types must not be empty".to_string(),
            ));
        }
        self.parameters
            .at(self.maturities[0], self.strikes[0])?
            .validate_for(self.model)?;
        Ok(())
    }

    /// Parameters for one grid point.
    pub fn params_at(&self, maturity: f64, strike: f64) -> Result<PricingParameters> {
        self.parameters.at(maturity, strike)
    }

    /// Requests for every (maturity, strike, option type), maturity-major.
    pub fn requests(&self) -> Result<Vec<PricingRequest>> {
        let mut requests =
            Vec::with_capacity(self.maturities.len() * self.strikes.len() * self.option_types.len());
        for &maturity in &self.maturities {
            for &strike in &self.strikes {
                let params = self.params_at(maturity, strike)?;
                for &option_type in &self.option_types {
                    requests.push(PricingRequest::new(params, self.model, option_type));
                }
            }
        }
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATES: &str = r#"
        model = "bates"
        maturities = [0.5, 1.0]
        strikes = [90.0, 100.0, 110.0]

        [parameters]
        spot = 100.0
        rate = 0.01

        [parameters.jumps]
        lambda = 0.4
        mu = -0.6
        delta = 0.2

        [parameters.stochastic_vol]
        kappa = 1.5768
        theta = 0.0398
        vol_of_vol = 0.5751
        rho = -0.5711
        v0 = 0.0175
    "#;

    #[test]
    fn test_parse_bates_scenario() {
        let scenario = Scenario::from_toml_str(BATES).unwrap();
        assert_eq!(scenario.model, ModelKind::StochVolJumpDiffusion);
        assert_eq!(scenario.option_types, vec![OptionType::Call, OptionType::Put]);
        assert_eq!(scenario.parameters.volatility, 0.0);
        assert_eq!(scenario.parameters.jumps.unwrap().lambda, 0.4);
    }

    #[test]
    fn test_requests_cover_grid_in_order() {
        let scenario = Scenario::from_toml_str(BATES).unwrap();
        let requests = scenario.requests().unwrap();
        assert_eq!(requests.len(), 2 * 3 * 2);

        let first = &requests[0];
        assert_eq!(first.params.maturity(), 0.5);
        assert_eq!(first.params.strike(), 90.0);
        assert_eq!(first.option_type, OptionType::Call);

        let last = requests.last().unwrap();
        assert_eq!(last.params.maturity(), 1.0);
        assert_eq!(last.params.strike(), 110.0);
        assert_eq!(last.option_type, OptionType::Put);
    }

    #[test]
    fn test_missing_model_block_rejected() {
        let content = r#"
            model = "heston"
            maturities = [1.0]
            strikes = [100.0]

            [parameters]
            spot = 100.0
            rate = 0.0
        "#;
        assert!(matches!(
            Scenario::from_toml_str(content),
            Err(CliError::Pricing(_))
        ));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let content = r#"
            model = "gbm"
            maturities = []
            strikes = [100.0]

            [parameters]
            spot = 100.0
            rate = 0.0
            volatility = 0.2
        "#;
        assert!(matches!(
            Scenario::from_toml_str(content),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_model_rejected() {
        let content = r#"
            model = "variance-gamma"
            maturities = [1.0]
            strikes = [100.0]

            [parameters]
            spot = 100.0
            rate = 0.0
        "#;
        assert!(matches!(
            Scenario::from_toml_str(content),
            Err(CliError::Scenario(_))
        ));
    }

    #[test]
    fn test_negative_strike_rejected() {
        let content = r#"
            model = "gbm"
            maturities = [1.0]
            strikes = [100.0, -5.0]

            [parameters]
            spot = 100.0
            rate = 0.0
            volatility = 0.2
        "#;
        let scenario: Scenario = toml::from_str(content).unwrap();
        assert!(scenario.validate().is_ok());
        assert!(scenario.requests().is_err());
    }

    #[test]
    fn test_bundled_scenarios_parse() {
        let bundled = [
            (include_str!("../../../scenarios/merton.toml"), ModelKind::JumpDiffusion),
            (include_str!("../../../scenarios/heston.toml"), ModelKind::StochasticVolatility),
            (include_str!("../../../scenarios/bates.toml"), ModelKind::StochVolJumpDiffusion),
        ];
        for (content, kind) in bundled {
            let scenario = Scenario::from_toml_str(content).unwrap();
            assert_eq!(scenario.model, kind);
            assert!(!scenario.requests().unwrap().is_empty());
        }
    }
}
