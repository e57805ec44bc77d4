//! Carr-Madan damped Fourier inversion.
//!
//! The call price is damped by `e^(αk)` in the log-strike `k = ln K`, which
//! makes it square integrable; its Fourier transform is then known in closed
//! form in terms of the characteristic function φ of `ln S_T`:
//!
//! ```text
//! C(k) = e^(-αk)/π ∫₀^∞ Re[e^(-iuk) ψ(u)] du
//! ψ(u) = e^(-rT) φ(u - i(α+1)) / ((α + iu)(α + 1 + iu))
//! ```
//!
//! The integral is truncated at `U` and evaluated with a fixed-node rule.
//! With a damping factor below -1 the same expression yields the put price,
//! which [`FourierInverter::put_value_direct`] uses to cross-check parity.
//!
//! When the total variance is small, φ barely decays before `U`. For every
//! model but GBM itself, the transform of a Black-Scholes model with the
//! same expected diffusive variance is by default subtracted from ψ and its
//! closed-form price added back, so only the difference is integrated.
//! A truncation whose estimated tail `e^(-αk)/π·|ψ(U)|·U` still exceeds
//! `1e-4·max(S, K)` is reported as [`PricingError::IntegrationDivergence`].
//!
//! Under stochastic volatility `φ(-i(α+1)) = E[S_T^(α+1)]` becomes infinite
//! after a finite time. Past it, α is moved halfway into the range where the
//! moment is still finite and the node count grows with the pole distance.

use std::f64::consts::PI;

use pricer_core::math::{Complex64, MAX_NODES};
use pricer_core::types::PricingError;
use tracing::debug;

use super::char_fn::CharacteristicFunction;
use super::config::FourierConfig;
use crate::analytical::ClosedFormPricer;
use crate::models::{ModelKind, OptionType, PricingParameters};

/// Largest accepted tail estimate, relative to `max(S, K)`.
const TAIL_TOLERANCE: f64 = 1e-4;

/// Smallest accepted distance from the real axis to a pole of the transform.
const MIN_POLE_DISTANCE: f64 = 1e-3;

const BISECTION_STEPS: usize = 60;

/// Prices European options from a characteristic function.
///
/// # Examples
/// ```
/// use pricer_models::fourier::{CharacteristicFunction, FourierConfig, FourierInverter};
/// use pricer_models::models::{ModelKind, PricingParameters};
///
/// let inverter = FourierInverter::new(FourierConfig::default());
/// let params = PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2).unwrap();
/// let cf = CharacteristicFunction::builtin(ModelKind::Gbm);
///
/// let call = inverter.call_value(&params, &cf).unwrap();
/// assert!((call - 8.433318690109608).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FourierInverter {
    config: FourierConfig,
}

impl FourierInverter {
    /// Creates an inverter with the given integration settings.
    pub fn new(config: FourierConfig) -> Self {
        Self { config }
    }

    /// Returns the integration settings.
    #[inline]
    pub fn config(&self) -> &FourierConfig {
        &self.config
    }

    /// Prices a European call.
    ///
    /// # Errors
    /// - `InvalidParameter` for invalid settings or parameters, including a
    ///   missing model block
    /// - `IntegrationDivergence` if the integrand is non-finite anywhere on
    ///   `[0, U]`, its tail beyond `U` is not negligible, or the moment
    ///   `E[S_T^(α+1)]` is infinite for every usable α
    pub fn call_value(
        &self,
        params: &PricingParameters,
        cf: &CharacteristicFunction,
    ) -> Result<f64, PricingError> {
        self.check(params, cf)?;
        if params.maturity() == 0.0 {
            return Ok(OptionType::Call.intrinsic(params.spot(), params.strike()));
        }
        let call = self.damped_value(params, cf, self.config.alpha)?;
        Ok(clamp_non_negative(call, OptionType::Call))
    }

    /// Prices a European put through put-call parity,
    /// `P = C - S + K·e^(-rT)`.
    ///
    /// # Errors
    /// Same as [`call_value`](Self::call_value).
    pub fn put_value(
        &self,
        params: &PricingParameters,
        cf: &CharacteristicFunction,
    ) -> Result<f64, PricingError> {
        self.check(params, cf)?;
        if params.maturity() == 0.0 {
            return Ok(OptionType::Put.intrinsic(params.spot(), params.strike()));
        }
        let call = self.damped_value(params, cf, self.config.alpha)?;
        let put = call - params.spot() + params.strike() * params.discount_factor();
        Ok(clamp_non_negative(put, OptionType::Put))
    }

    /// Prices a European put by integrating the put transform directly,
    /// with damping factor `-(α + 1)`.
    ///
    /// Independent of put-call parity, so comparing it against
    /// [`put_value`](Self::put_value) checks the inversion end to end.
    ///
    /// # Errors
    /// Same as [`call_value`](Self::call_value).
    pub fn put_value_direct(
        &self,
        params: &PricingParameters,
        cf: &CharacteristicFunction,
    ) -> Result<f64, PricingError> {
        self.check(params, cf)?;
        if params.maturity() == 0.0 {
            return Ok(OptionType::Put.intrinsic(params.spot(), params.strike()));
        }
        let put = self.damped_value(params, cf, -(self.config.alpha + 1.0))?;
        Ok(clamp_non_negative(put, OptionType::Put))
    }

    /// Prices a European option of the given side.
    pub fn price(
        &self,
        params: &PricingParameters,
        cf: &CharacteristicFunction,
        option_type: OptionType,
    ) -> Result<f64, PricingError> {
        match option_type {
            OptionType::Call => self.call_value(params, cf),
            OptionType::Put => self.put_value(params, cf),
        }
    }

    fn check(
        &self,
        params: &PricingParameters,
        cf: &CharacteristicFunction,
    ) -> Result<(), PricingError> {
        self.config.validate()?;
        params.validate_for(cf.kind())
    }

    /// `e^(-αk)/π ∫₀^U Re[e^(-iuk) ψ(u)] du` for an arbitrary damping factor.
    fn damped_value(
        &self,
        params: &PricingParameters,
        cf: &CharacteristicFunction,
        alpha: f64,
    ) -> Result<f64, PricingError> {
        let Damping { alpha, nodes } = self.damping(params, cf.kind(), alpha)?;
        let log_strike = params.strike().ln();
        let discount = params.discount_factor();
        let shift = alpha + 1.0;
        let truncation = self.config.truncation;

        let reference = (self.config.control_variate && cf.kind() != ModelKind::Gbm)
            .then(|| params.with_volatility(reference_volatility(params, cf.kind())));
        let gbm = CharacteristicFunction::builtin(ModelKind::Gbm);

        let transform = |u: f64| -> Result<Complex64, PricingError> {
            let z = Complex64::new(u, -shift);
            let mut phi = cf.evaluate(z, params)?;
            if let Some(reference) = &reference {
                phi -= gbm.evaluate(z, reference)?;
            }
            // (α + iu)(α + 1 + iu)
            let denominator = Complex64::new(alpha * shift - u * u, (2.0 * alpha + 1.0) * u);
            let phase = Complex64::new(0.0, -u * log_strike).exp();
            Ok(phase * phi / denominator * discount)
        };

        let integral = self
            .config
            .rule
            .integrate(|u| transform(u).map(|z| z.re), 0.0, truncation, nodes)?;
        let scale = (-alpha * log_strike).exp() / PI;

        let base = match &reference {
            Some(reference) => {
                let side = if alpha > 0.0 {
                    OptionType::Call
                } else {
                    OptionType::Put
                };
                ClosedFormPricer.price(reference, side)?
            }
            None => 0.0,
        };
        let value = base + scale * integral;

        if !value.is_finite() {
            return Err(PricingError::IntegrationDivergence {
                frequency: truncation,
            });
        }

        let tail = scale * transform(truncation)?.norm() * truncation;
        if tail > TAIL_TOLERANCE * params.spot().max(params.strike()) {
            debug!(
                model = %cf.kind(),
                alpha,
                tail,
                truncation,
                "integrand not decayed at truncation"
            );
            return Err(PricingError::IntegrationDivergence {
                frequency: truncation,
            });
        }

        debug!(
            model = %cf.kind(),
            alpha,
            strike = params.strike(),
            maturity = params.maturity(),
            evaluations = self.config.rule.evaluations(nodes),
            control_variate = reference.is_some(),
            tail,
            value,
            "fourier inversion"
        );

        Ok(value)
    }

    /// Damping and node count for `alpha`, moved inside the moment strip
    /// when `E[S_T^(α+1)]` is infinite at the option's maturity.
    ///
    /// A failure is reported at frequency 0, where ψ is the moment itself.
    fn damping(
        &self,
        params: &PricingParameters,
        kind: ModelKind,
        alpha: f64,
    ) -> Result<Damping, PricingError> {
        let configured = Damping {
            alpha,
            nodes: self.config.nodes,
        };
        let sv = match params.stochastic_vol() {
            Some(sv) if kind.requires_stochastic_vol() => sv,
            _ => return Ok(configured),
        };
        let maturity = params.maturity();
        if sv.moment_explosion_time(alpha + 1.0) > maturity {
            return Ok(configured);
        }

        // Moments of order 1 (calls) and 0 (puts) are always finite
        let bounded = if alpha > 0.0 { 1.0 } else { 0.0 };
        let (mut inside, mut outside) = (bounded, alpha + 1.0);
        for _ in 0..BISECTION_STEPS {
            let mid = 0.5 * (inside + outside);
            if sv.moment_explosion_time(mid) > maturity {
                inside = mid;
            } else {
                outside = mid;
            }
        }

        let adjusted = 0.5 * (bounded + inside) - 1.0;
        let distance = pole_distance(adjusted);
        if distance < MIN_POLE_DISTANCE {
            return Err(PricingError::IntegrationDivergence { frequency: 0.0 });
        }
        let spacing = pole_distance(alpha) / distance;
        let nodes = ((self.config.nodes as f64 * spacing).ceil() as usize).min(MAX_NODES);

        debug!(
            model = %kind,
            alpha,
            adjusted,
            nodes,
            maturity,
            "damping moved inside the moment strip"
        );
        Ok(Damping {
            alpha: adjusted,
            nodes,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Damping {
    alpha: f64,
    nodes: usize,
}

/// Distance from the real axis to the nearest pole of `1/((α + iu)(α + 1 + iu))`.
#[inline]
fn pole_distance(alpha: f64) -> f64 {
    alpha.abs().min((alpha + 1.0).abs())
}

/// Black-Scholes volatility with the model's expected diffusive variance.
fn reference_volatility(params: &PricingParameters, kind: ModelKind) -> f64 {
    match params.stochastic_vol() {
        Some(sv) if kind.requires_stochastic_vol() => {
            let maturity = params.maturity();
            (sv.integrated_variance(maturity) / maturity).max(0.0).sqrt()
        }
        _ => params.volatility(),
    }
}

fn clamp_non_negative(value: f64, option_type: OptionType) -> f64 {
    if value < 0.0 {
        debug!(%option_type, value, "clamped negative transform price to zero");
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::ClosedFormPricer;
    use crate::models::{JumpParams, ModelKind, StochasticVolParams};
    use approx::assert_relative_eq;
    use pricer_core::math::QuadratureRule;

    fn gbm_params() -> PricingParameters {
        PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2).unwrap()
    }

    fn inverter() -> FourierInverter {
        FourierInverter::new(FourierConfig::default())
    }

    fn explosive_params(maturity: f64) -> PricingParameters {
        let sv = StochasticVolParams::new(0.5, 0.04, 1.0, 0.5, 0.04).unwrap();
        gbm_params().with_stochastic_vol(sv).with_maturity(maturity)
    }

    #[test]
    fn test_gbm_matches_closed_form() {
        let cf = CharacteristicFunction::builtin(ModelKind::Gbm);
        for strike in [80.0, 100.0, 120.0] {
            let params = gbm_params().with_strike(strike);
            let closed_call = ClosedFormPricer.call_value(&params).unwrap();
            let closed_put = ClosedFormPricer.put_value(&params).unwrap();
            assert_relative_eq!(
                inverter().call_value(&params, &cf).unwrap(),
                closed_call,
                epsilon = 1e-6
            );
            assert_relative_eq!(
                inverter().put_value(&params, &cf).unwrap(),
                closed_put,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_gauss_legendre_agrees_with_simpson() {
        let cf = CharacteristicFunction::builtin(ModelKind::Gbm);
        let params = gbm_params();
        let gl = FourierInverter::new(FourierConfig::default().with_rule(QuadratureRule::GaussLegendre));
        assert_relative_eq!(
            gl.call_value(&params, &cf).unwrap(),
            inverter().call_value(&params, &cf).unwrap(),
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_control_variate_keeps_heston_value() {
        let sv = StochasticVolParams::new(1.5768, 0.0398, 0.5751, -0.5711, 0.0175).unwrap();
        let params = PricingParameters::new(100.0, 100.0, 1.0, 0.0, 0.0)
            .unwrap()
            .with_stochastic_vol(sv);
        let kind = ModelKind::StochasticVolatility;
        let cf = CharacteristicFunction::builtin(kind);
        let config = FourierConfig::for_model(kind);

        let with = FourierInverter::new(config).call_value(&params, &cf).unwrap();
        let without = FourierInverter::new(config.with_control_variate(false))
            .call_value(&params, &cf)
            .unwrap();
        assert_relative_eq!(with, 5.785155, epsilon = 1e-6);
        assert_relative_eq!(with, without, epsilon = 1e-7);
    }

    #[test]
    fn test_vanishing_diffusion_prices_forward_intrinsic() {
        let cf = CharacteristicFunction::builtin(ModelKind::JumpDiffusion);
        let params = PricingParameters::new(100.0, 100.0, 1.0, 0.005, 0.0)
            .unwrap()
            .with_jumps(JumpParams::new(0.0, -0.6, 0.2).unwrap());
        let forward_intrinsic = 100.0 - 100.0 * (-0.005_f64).exp();

        assert_relative_eq!(
            inverter().call_value(&params, &cf).unwrap(),
            forward_intrinsic,
            epsilon = 1e-9
        );
        assert!(inverter().put_value_direct(&params, &cf).unwrap() < 1e-9);
    }

    #[test]
    fn test_short_maturity_jumps_stay_near_gbm() {
        let jumps = JumpParams::new(0.4, -0.6, 0.2).unwrap();
        let params = gbm_params().with_jumps(jumps).with_maturity(1e-6);
        let cf = CharacteristicFunction::builtin(ModelKind::JumpDiffusion);
        let gbm = ClosedFormPricer.call_value(&params).unwrap();

        let call = inverter().call_value(&params, &cf).unwrap();
        assert!((call - gbm).abs() < 1e-4, "call {} gbm {}", call, gbm);
    }

    #[test]
    fn test_undecayed_tail_is_reported() {
        // Tiny variance with large vol-of-vol: φ decays only like e^(-cu)
        let sv = StochasticVolParams::new(1.5, 1e-4, 0.3, -0.5, 1e-4).unwrap();
        let params = PricingParameters::new(100.0, 100.0, 1.0, 0.005, 0.0)
            .unwrap()
            .with_stochastic_vol(sv);
        let kind = ModelKind::StochasticVolatility;
        let cf = CharacteristicFunction::builtin(kind);
        let config = FourierConfig::for_model(kind);

        match FourierInverter::new(config).call_value(&params, &cf) {
            Err(PricingError::IntegrationDivergence { frequency }) => {
                assert_eq!(frequency, config.truncation)
            }
            other => panic!("Expected IntegrationDivergence, got {:?}", other),
        }

        let wide = FourierInverter::new(config.with_truncation(5000.0).with_nodes(100_000));
        assert_relative_eq!(wide.call_value(&params, &cf).unwrap(), 0.571134, epsilon = 1e-3);
    }

    #[test]
    fn test_exploding_moment_moves_damping() {
        let params = explosive_params(10.0);
        let sv = params.stochastic_vol().unwrap();
        assert!(sv.moment_explosion_time(1.75) < 10.0);
        assert!(sv.moment_explosion_time(-0.75) < 10.0);

        let kind = ModelKind::StochasticVolatility;
        let cf = CharacteristicFunction::builtin(kind);
        let inv = FourierInverter::new(FourierConfig::for_model(kind));

        let parity = inv.put_value(&params, &cf).unwrap();
        let direct = inv.put_value_direct(&params, &cf).unwrap();
        assert!((parity - direct).abs() < 1e-6, "parity {} direct {}", parity, direct);
        assert_relative_eq!(direct, 12.786327, epsilon = 1e-5);

        // Every configured damping past the strip lands on the same one
        let steep = FourierInverter::new(FourierConfig::for_model(kind).with_alpha(1.5));
        assert_relative_eq!(
            steep.call_value(&params, &cf).unwrap(),
            inv.call_value(&params, &cf).unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_exploding_moment_without_usable_damping_diverges() {
        let params = explosive_params(1000.0);
        let cf = CharacteristicFunction::builtin(ModelKind::StochasticVolatility);
        match inverter().call_value(&params, &cf) {
            Err(PricingError::IntegrationDivergence { frequency }) => assert_eq!(frequency, 0.0),
            other => panic!("Expected IntegrationDivergence, got {:?}", other),
        }
    }

    #[test]
    fn test_damping_kept_inside_strip() {
        let params = explosive_params(2.0);
        let inv = inverter();
        let call = inv.damping(&params, ModelKind::StochasticVolatility, 0.75).unwrap();
        assert_eq!(call.alpha, 0.75);
        assert_eq!(call.nodes, inv.config().nodes);

        // Jump-diffusion moments never explode
        let jd = inv.damping(&explosive_params(1000.0), ModelKind::JumpDiffusion, 1.5).unwrap();
        assert_eq!(jd.alpha, 1.5);

        let moved = inv.damping(&explosive_params(10.0), ModelKind::StochasticVolatility, -1.75).unwrap();
        assert!(moved.alpha > -1.75 && moved.alpha < -1.0);
        assert!(moved.nodes > inv.config().nodes);
    }

    #[test]
    fn test_direct_put_matches_parity_put() {
        let jumps = JumpParams::new(0.4, -0.6, 0.2).unwrap();
        let params = gbm_params().with_jumps(jumps).with_maturity(0.244);
        let cf = CharacteristicFunction::builtin(ModelKind::JumpDiffusion);
        let parity = inverter().put_value(&params, &cf).unwrap();
        let direct = inverter().put_value_direct(&params, &cf).unwrap();
        assert!((parity - direct).abs() < 1e-6, "parity {} direct {}", parity, direct);
    }

    #[test]
    fn test_zero_maturity_returns_intrinsic() {
        let sv = StochasticVolParams::new(1.5, 0.04, 0.3, -0.7, 0.04).unwrap();
        let params = gbm_params()
            .with_stochastic_vol(sv)
            .with_maturity(0.0)
            .with_strike(90.0);
        let cf = CharacteristicFunction::builtin(ModelKind::StochasticVolatility);
        assert_eq!(inverter().call_value(&params, &cf).unwrap(), 10.0);
        assert_eq!(inverter().put_value(&params, &cf).unwrap(), 0.0);
        assert_eq!(inverter().put_value_direct(&params, &cf).unwrap(), 0.0);
    }

    #[test]
    fn test_missing_block_rejected_before_integration() {
        let cf = CharacteristicFunction::builtin(ModelKind::StochasticVolatility);
        let err = inverter().call_value(&gbm_params(), &cf).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cf = CharacteristicFunction::builtin(ModelKind::Gbm);
        let bad = FourierInverter::new(FourierConfig::default().with_alpha(-1.0));
        assert!(bad.call_value(&gbm_params(), &cf).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_non_finite_characteristic_function_diverges() {
        fn exploding(u: Complex64, _: &PricingParameters) -> Result<Complex64, PricingError> {
            if u.re > 10.0 {
                Ok(Complex64::new(f64::NAN, 0.0))
            } else {
                Ok(Complex64::new(1.0, 0.0))
            }
        }
        let cf = CharacteristicFunction::new(ModelKind::Gbm, exploding);
        match inverter().call_value(&gbm_params(), &cf) {
            Err(PricingError::IntegrationDivergence { frequency }) => assert!(frequency > 10.0),
            other => panic!("Expected IntegrationDivergence, got {:?}", other),
        }
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(clamp_non_negative(-1e-12, OptionType::Call), 0.0);
        assert_eq!(clamp_non_negative(0.0, OptionType::Put), 0.0);
        assert_eq!(clamp_non_negative(3.5, OptionType::Put), 3.5);
    }
}
