//! Uniform pricing entry point over all model kinds.

use pricer_core::types::PricingError;
use rayon::prelude::*;
use tracing::debug;

use crate::analytical::ClosedFormPricer;
use crate::fourier::{CharacteristicFunctionRegistry, FourierConfig, FourierInverter};
use crate::models::{ModelKind, OptionType, PricingParameters};

/// One valuation request for [`PricingFacade::price_grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRequest {
    /// Valuation inputs
    pub params: PricingParameters,
    /// Model to price under
    pub kind: ModelKind,
    /// Call or put
    pub option_type: OptionType,
}

impl PricingRequest {
    /// Creates a request.
    pub fn new(params: PricingParameters, kind: ModelKind, option_type: OptionType) -> Self {
        Self {
            params,
            kind,
            option_type,
        }
    }
}

/// Selects the closed-form or Fourier path per model.
///
/// GBM is priced in closed form; every other kind goes through the
/// registry and [`FourierInverter`]. Without an explicit configuration the
/// Fourier path uses [`FourierConfig::for_model`].
///
/// The facade is immutable after construction and can be shared between
/// threads.
///
/// # Examples
/// ```
/// use pricer_models::models::{JumpParams, ModelKind, OptionType, PricingParameters};
/// use pricer_models::pricing::PricingFacade;
///
/// let facade = PricingFacade::new();
/// let params = PricingParameters::new(100.0, 100.0, 0.244, 0.01, 0.2)
///     .unwrap()
///     .with_jumps(JumpParams::new(0.4, -0.6, 0.2).unwrap());
///
/// let with_jumps = facade.price(&params, ModelKind::JumpDiffusion, OptionType::Put).unwrap();
/// let without = facade.price(&params, ModelKind::Gbm, OptionType::Put).unwrap();
/// assert!(with_jumps > without);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PricingFacade {
    registry: CharacteristicFunctionRegistry,
    config: Option<FourierConfig>,
}

impl PricingFacade {
    /// Creates a facade with all built-in models and model-tuned settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a facade over a custom registry.
    pub fn with_registry(registry: CharacteristicFunctionRegistry) -> Self {
        Self {
            registry,
            config: None,
        }
    }

    /// Returns a facade that uses `config` for every Fourier valuation.
    #[must_use]
    pub fn with_config(mut self, config: FourierConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns the characteristic-function registry.
    pub fn registry(&self) -> &CharacteristicFunctionRegistry {
        &self.registry
    }

    /// Fourier settings applied to `kind`.
    pub fn config_for(&self, kind: ModelKind) -> FourierConfig {
        self.config
            .unwrap_or_else(|| FourierConfig::for_model(kind))
    }

    /// Prices a European option.
    ///
    /// # Errors
    /// - `InvalidParameter` for out-of-domain inputs or a missing model block
    /// - `UnsupportedModel` if `kind` is not registered
    /// - `IntegrationDivergence` if the transform integrand is non-finite
    pub fn price(
        &self,
        params: &PricingParameters,
        kind: ModelKind,
        option_type: OptionType,
    ) -> Result<f64, PricingError> {
        params.validate_for(kind)?;
        debug!(model = %kind, %option_type, "pricing request");

        if kind.has_closed_form() {
            ClosedFormPricer.price(params, option_type)
        } else {
            self.fourier_price(params, kind, option_type)
        }
    }

    /// Prices a European call.
    pub fn call_value(
        &self,
        params: &PricingParameters,
        kind: ModelKind,
    ) -> Result<f64, PricingError> {
        self.price(params, kind, OptionType::Call)
    }

    /// Prices a European put.
    pub fn put_value(
        &self,
        params: &PricingParameters,
        kind: ModelKind,
    ) -> Result<f64, PricingError> {
        self.price(params, kind, OptionType::Put)
    }

    /// Prices through the Fourier path regardless of `kind`, GBM included.
    pub fn fourier_price(
        &self,
        params: &PricingParameters,
        kind: ModelKind,
        option_type: OptionType,
    ) -> Result<f64, PricingError> {
        let cf = self.registry.get(kind)?;
        FourierInverter::new(self.config_for(kind)).price(params, &cf, option_type)
    }

    /// Prices every request in parallel.
    ///
    /// Results are returned in input order; one failing request does not
    /// affect the others.
    pub fn price_grid(&self, requests: &[PricingRequest]) -> Vec<Result<f64, PricingError>> {
        debug!(requests = requests.len(), "pricing grid");
        requests
            .par_iter()
            .map(|request| self.price(&request.params, request.kind, request.option_type))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourier::CharacteristicFunction;
    use crate::models::{JumpParams, StochasticVolParams};
    use approx::assert_relative_eq;

    fn assert_send_sync<T: Send + Sync>() {}

    fn params() -> PricingParameters {
        PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2)
            .unwrap()
            .with_jumps(JumpParams::new(0.4, -0.6, 0.2).unwrap())
            .with_stochastic_vol(StochasticVolParams::new(2.0, 0.04, 0.3, -0.7, 0.04).unwrap())
    }

    #[test]
    fn test_facade_is_send_sync() {
        assert_send_sync::<PricingFacade>();
    }

    #[test]
    fn test_gbm_uses_closed_form() {
        let facade = PricingFacade::new();
        let p = params();
        assert_eq!(
            facade.call_value(&p, ModelKind::Gbm).unwrap(),
            ClosedFormPricer.call_value(&p).unwrap()
        );
    }

    #[test]
    fn test_fourier_path_matches_closed_form_for_gbm() {
        let facade = PricingFacade::new();
        let p = params();
        assert_relative_eq!(
            facade.fourier_price(&p, ModelKind::Gbm, OptionType::Put).unwrap(),
            facade.put_value(&p, ModelKind::Gbm).unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_all_models_price_non_negative() {
        let facade = PricingFacade::new();
        let p = params();
        for kind in ModelKind::ALL {
            for option_type in OptionType::BOTH {
                let value = facade.price(&p, kind, option_type).unwrap();
                assert!(value.is_finite() && value >= 0.0, "{} {}: {}", kind, option_type, value);
            }
        }
    }

    #[test]
    fn test_validation_before_dispatch() {
        let facade = PricingFacade::new();
        let plain = PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2).unwrap();
        let err = facade
            .price(&plain, ModelKind::StochasticVolatility, OptionType::Call)
            .unwrap_err();
        assert!(err.is_invalid_parameter());

        let negative_maturity = plain.with_maturity(-1.0);
        assert!(facade
            .price(&negative_maturity, ModelKind::Gbm, OptionType::Call)
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn test_unregistered_model_is_unsupported() {
        let mut registry = CharacteristicFunctionRegistry::empty();
        registry.register(CharacteristicFunction::builtin(ModelKind::JumpDiffusion));
        let facade = PricingFacade::with_registry(registry);
        let p = params();

        assert!(facade.price(&p, ModelKind::JumpDiffusion, OptionType::Call).is_ok());
        assert!(facade.price(&p, ModelKind::Gbm, OptionType::Call).is_ok());
        assert_eq!(
            facade.price(&p, ModelKind::StochasticVolatility, OptionType::Call),
            Err(PricingError::UnsupportedModel("stochastic-volatility".to_string()))
        );
    }

    #[test]
    fn test_config_override() {
        let config = FourierConfig::default().with_nodes(2048);
        let facade = PricingFacade::new().with_config(config);
        assert_eq!(facade.config_for(ModelKind::StochasticVolatility), config);
        assert_eq!(
            PricingFacade::new().config_for(ModelKind::StochasticVolatility).alpha,
            0.75
        );
    }

    #[test]
    fn test_price_grid_preserves_order() {
        let facade = PricingFacade::new();
        let base = params();
        let requests: Vec<_> = [80.0, 90.0, 100.0, 110.0, 120.0]
            .iter()
            .flat_map(|&strike| {
                ModelKind::ALL.into_iter().map(move |kind| {
                    PricingRequest::new(base.with_strike(strike), kind, OptionType::Call)
                })
            })
            .collect();

        let results = facade.price_grid(&requests);
        assert_eq!(results.len(), requests.len());
        for (request, result) in requests.iter().zip(&results) {
            let sequential = facade
                .price(&request.params, request.kind, request.option_type)
                .unwrap();
            assert_eq!(*result.as_ref().unwrap(), sequential);
        }
    }

    #[test]
    fn test_price_grid_isolates_failures() {
        let facade = PricingFacade::new();
        let good = PricingRequest::new(params(), ModelKind::Gbm, OptionType::Call);
        let bad = PricingRequest::new(params().with_strike(-1.0), ModelKind::Gbm, OptionType::Call);
        let results = facade.price_grid(&[good, bad, good]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
