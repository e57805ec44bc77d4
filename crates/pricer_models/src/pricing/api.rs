//! Flat call surface, one function per model.
//!
//! Each function validates its inputs, builds [`PricingParameters`] and
//! prices through a default [`PricingFacade`].
//!
//! # Examples
//! ```
//! use pricer_models::models::OptionType;
//! use pricer_models::pricing::api::{price_gbm, price_jump_diffusion};
//!
//! let gbm_put = price_gbm(100.0, 100.0, 0.244, 0.01, 0.2, OptionType::Put).unwrap();
//! let jd_put = price_jump_diffusion(100.0, 100.0, 0.244, 0.01, 0.2, 0.4, -0.6, 0.2, OptionType::Put).unwrap();
//! assert!(jd_put > gbm_put);
//! ```

use pricer_core::types::PricingError;

use super::facade::PricingFacade;
use crate::models::{JumpParams, ModelKind, OptionType, PricingParameters, StochasticVolParams};

/// Black-Scholes-Merton price.
pub fn price_gbm(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> Result<f64, PricingError> {
    let params = PricingParameters::new(spot, strike, maturity, rate, volatility)?;
    PricingFacade::new().price(&params, ModelKind::Gbm, option_type)
}

/// Merton jump-diffusion price.
#[allow(clippy::too_many_arguments)]
pub fn price_jump_diffusion(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    volatility: f64,
    lambda: f64,
    mu: f64,
    delta: f64,
    option_type: OptionType,
) -> Result<f64, PricingError> {
    let params = PricingParameters::new(spot, strike, maturity, rate, volatility)?
        .with_jumps(JumpParams::new(lambda, mu, delta)?);
    PricingFacade::new().price(&params, ModelKind::JumpDiffusion, option_type)
}

/// Heston stochastic-volatility price.
#[allow(clippy::too_many_arguments)]
pub fn price_stochastic_volatility(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    kappa: f64,
    theta: f64,
    vol_of_vol: f64,
    rho: f64,
    v0: f64,
    option_type: OptionType,
) -> Result<f64, PricingError> {
    let params = PricingParameters::new(spot, strike, maturity, rate, 0.0)?
        .with_stochastic_vol(StochasticVolParams::new(kappa, theta, vol_of_vol, rho, v0)?);
    PricingFacade::new().price(&params, ModelKind::StochasticVolatility, option_type)
}

/// Bates stochastic-volatility jump-diffusion price.
#[allow(clippy::too_many_arguments)]
pub fn price_stoch_vol_jump_diffusion(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    kappa: f64,
    theta: f64,
    vol_of_vol: f64,
    rho: f64,
    v0: f64,
    lambda: f64,
    mu: f64,
    delta: f64,
    option_type: OptionType,
) -> Result<f64, PricingError> {
    let params = PricingParameters::new(spot, strike, maturity, rate, 0.0)?
        .with_stochastic_vol(StochasticVolParams::new(kappa, theta, vol_of_vol, rho, v0)?)
        .with_jumps(JumpParams::new(lambda, mu, delta)?);
    PricingFacade::new().price(&params, ModelKind::StochVolJumpDiffusion, option_type)
}
