//! Closed-form pricer for the GBM model.

use pricer_core::types::PricingError;
use tracing::debug;

use super::black_scholes::BlackScholes;
use crate::models::{OptionType, PricingParameters};

/// Black-Scholes-Merton pricer operating on [`PricingParameters`].
///
/// Model-specific blocks carried by the parameters are ignored.
///
/// # Examples
/// ```
/// use pricer_models::analytical::ClosedFormPricer;
/// use pricer_models::models::PricingParameters;
///
/// let params = PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2).unwrap();
/// let pricer = ClosedFormPricer;
///
/// let call = pricer.call_value(&params).unwrap();
/// let put = pricer.put_value(&params).unwrap();
/// assert!((call - 8.4333).abs() < 1e-4);
/// assert!((put - 7.4383).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosedFormPricer;

impl ClosedFormPricer {
    /// Prices a European call.
    ///
    /// # Errors
    /// `InvalidParameter` for out-of-domain inputs.
    pub fn call_value(&self, params: &PricingParameters) -> Result<f64, PricingError> {
        self.price(params, OptionType::Call)
    }

    /// Prices a European put.
    ///
    /// # Errors
    /// `InvalidParameter` for out-of-domain inputs.
    pub fn put_value(&self, params: &PricingParameters) -> Result<f64, PricingError> {
        self.price(params, OptionType::Put)
    }

    /// Prices a European option of the given side.
    pub fn price(
        &self,
        params: &PricingParameters,
        option_type: OptionType,
    ) -> Result<f64, PricingError> {
        params.validate()?;

        let model = BlackScholes::new(params.spot(), params.rate(), params.volatility())?;
        let value = match option_type {
            OptionType::Call => model.price_call(params.strike(), params.maturity()),
            OptionType::Put => model.price_put(params.strike(), params.maturity()),
        };

        debug!(
            option_type = %option_type,
            spot = params.spot(),
            strike = params.strike(),
            maturity = params.maturity(),
            value,
            "closed-form price"
        );

        Ok(value.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JumpParams;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_values() {
        let params = PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2).unwrap();
        let pricer = ClosedFormPricer;
        assert_relative_eq!(pricer.call_value(&params).unwrap(), 8.433318690109608, epsilon = 1e-10);
        assert_relative_eq!(pricer.put_value(&params).unwrap(), 7.438302065026413, epsilon = 1e-10);
    }

    #[test]
    fn test_put_call_parity() {
        let pricer = ClosedFormPricer;
        for strike in [60.0, 80.0, 100.0, 120.0, 150.0] {
            let params = PricingParameters::new(100.0, strike, 0.75, 0.03, 0.35).unwrap();
            let call = pricer.call_value(&params).unwrap();
            let put = pricer.put_value(&params).unwrap();
            let forward_value = params.spot() - strike * params.discount_factor();
            assert!((call - put - forward_value).abs() < 1e-8);
        }
    }

    #[test]
    fn test_zero_maturity_is_intrinsic() {
        let params = PricingParameters::new(100.0, 80.0, 0.0, 0.05, 0.2).unwrap();
        let pricer = ClosedFormPricer;
        assert_eq!(pricer.call_value(&params).unwrap(), 20.0);
        assert_eq!(pricer.put_value(&params).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_volatility_is_deterministic_forward() {
        let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.0).unwrap();
        let pricer = ClosedFormPricer;
        assert_relative_eq!(
            pricer.call_value(&params).unwrap(),
            100.0 - 100.0 * (-0.05_f64).exp(),
            epsilon = 1e-12
        );
        assert_eq!(pricer.put_value(&params).unwrap(), 0.0);
    }

    #[test]
    fn test_ignores_model_blocks() {
        let plain = PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2).unwrap();
        let with_jumps = plain.with_jumps(JumpParams::new(0.4, -0.6, 0.2).unwrap());
        let pricer = ClosedFormPricer;
        assert_eq!(
            pricer.call_value(&plain).unwrap(),
            pricer.call_value(&with_jumps).unwrap()
        );
    }
}
