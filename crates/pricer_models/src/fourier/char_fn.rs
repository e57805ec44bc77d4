//! Characteristic functions of the log terminal price `ln S_T`.
//!
//! Each function has the signature [`CharFnEval`] and accepts a complex
//! frequency, so it can be evaluated on the shifted contour `u - i(α + 1)`
//! used by damped Fourier inversion. All four are risk-neutral:
//! `φ(-i) = S·e^(rT)`.
//!
//! | Model                   | Function                 |
//! |-------------------------|--------------------------|
//! | GBM                     | [`gbm`]                  |
//! | Merton jump-diffusion   | [`jump_diffusion`]       |
//! | Heston                  | [`heston`]               |
//! | Bates                   | [`bates`]                |

use pricer_core::math::complex::{principal_ln, principal_sqrt, Complex64, I};
use pricer_core::types::PricingError;

use crate::models::{JumpParams, ModelKind, PricingParameters, StochasticVolParams};

/// Below this vol-of-vol the Heston exponent uses its deterministic-variance limit.
const VOL_OF_VOL_EPSILON: f64 = 1e-8;

/// Signature shared by all characteristic functions.
pub type CharFnEval = fn(Complex64, &PricingParameters) -> Result<Complex64, PricingError>;

/// A stateless, copyable characteristic-function handle.
///
/// # Examples
/// ```
/// use pricer_models::fourier::CharacteristicFunction;
/// use pricer_models::models::{ModelKind, PricingParameters};
/// use pricer_core::math::Complex64;
///
/// let cf = CharacteristicFunction::builtin(ModelKind::Gbm);
/// let params = PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2).unwrap();
///
/// // Martingale condition: φ(-i) = S·e^(rT)
/// let forward = cf.evaluate(Complex64::new(0.0, -1.0), &params).unwrap();
/// assert!((forward.re - 100.0 * 0.01_f64.exp()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CharacteristicFunction {
    kind: ModelKind,
    eval: CharFnEval,
}

impl CharacteristicFunction {
    /// Wraps an evaluation function for the given model kind.
    pub const fn new(kind: ModelKind, eval: CharFnEval) -> Self {
        Self { kind, eval }
    }

    /// The built-in characteristic function of `kind`.
    pub fn builtin(kind: ModelKind) -> Self {
        let eval: CharFnEval = match kind {
            ModelKind::Gbm => gbm,
            ModelKind::JumpDiffusion => jump_diffusion,
            ModelKind::StochasticVolatility => heston,
            ModelKind::StochVolJumpDiffusion => bates,
        };
        Self::new(kind, eval)
    }

    /// Model kind this function belongs to.
    #[inline]
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Evaluates `φ(u)`.
    ///
    /// # Errors
    /// `InvalidParameter` when a parameter block required by the model is missing.
    #[inline]
    pub fn evaluate(
        &self,
        u: Complex64,
        params: &PricingParameters,
    ) -> Result<Complex64, PricingError> {
        (self.eval)(u, params)
    }
}

/// GBM: `exp(iu(ln S + (r - σ²/2)T) - σ²u²T/2)`.
pub fn gbm(u: Complex64, params: &PricingParameters) -> Result<Complex64, PricingError> {
    Ok(diffusion_exponent(u, params).exp())
}

/// Merton jump-diffusion: GBM times the compensated compound-Poisson factor.
pub fn jump_diffusion(
    u: Complex64,
    params: &PricingParameters,
) -> Result<Complex64, PricingError> {
    let jumps = params.require_jumps()?;
    Ok((diffusion_exponent(u, params) + jump_exponent(u, jumps, params.maturity())).exp())
}

/// Heston stochastic volatility in the "little trap" formulation.
pub fn heston(u: Complex64, params: &PricingParameters) -> Result<Complex64, PricingError> {
    let sv = params.require_stochastic_vol()?;
    Ok(heston_exponent(u, params, sv).exp())
}

/// Bates: Heston times the Merton jump factor.
pub fn bates(u: Complex64, params: &PricingParameters) -> Result<Complex64, PricingError> {
    let sv = params.require_stochastic_vol()?;
    let jumps = params.require_jumps()?;
    Ok((heston_exponent(u, params, sv) + jump_exponent(u, jumps, params.maturity())).exp())
}

fn diffusion_exponent(u: Complex64, params: &PricingParameters) -> Complex64 {
    let variance = params.volatility() * params.volatility();
    let t = params.maturity();
    let drift = params.spot().ln() + (params.rate() - 0.5 * variance) * t;
    I * u * drift - 0.5 * variance * t * u * u
}

/// `λT(e^(iuμ - δ²u²/2) - 1) - iuλk̄T`, zero at `u = -i`.
fn jump_exponent(u: Complex64, jumps: &JumpParams, maturity: f64) -> Complex64 {
    let lambda_t = jumps.lambda * maturity;
    let jump_cf = (I * u * jumps.mu - 0.5 * jumps.delta * jumps.delta * u * u).exp();
    lambda_t * (jump_cf - 1.0) - I * u * lambda_t * jumps.compensator()
}

fn heston_exponent(u: Complex64, params: &PricingParameters, sv: &StochasticVolParams) -> Complex64 {
    let t = params.maturity();
    let iu = I * u;
    let drift = iu * (params.spot().ln() + params.rate() * t);

    if sv.vol_of_vol < VOL_OF_VOL_EPSILON {
        return drift - 0.5 * sv.integrated_variance(t) * (iu + u * u);
    }

    let sigma2 = sv.vol_of_vol * sv.vol_of_vol;
    let beta = sv.kappa - sv.rho * sv.vol_of_vol * iu;
    let d = principal_sqrt(beta * beta + sigma2 * (u * u + iu));
    let g = (beta - d) / (beta + d);
    let exp_neg_dt = (-d * t).exp();

    let log_term = principal_ln((1.0 - g * exp_neg_dt) / (1.0 - g));
    let c = (sv.kappa * sv.theta / sigma2) * ((beta - d) * t - 2.0 * log_term);
    let d_term = (beta - d) / sigma2 * (1.0 - exp_neg_dt) / (1.0 - g * exp_neg_dt);

    drift + c + d_term * sv.v0
}
