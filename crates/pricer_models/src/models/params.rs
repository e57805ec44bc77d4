//! Pricing parameter value objects.
//!
//! [`PricingParameters`] carries the contract and market inputs shared by all
//! models (spot, strike, maturity, rate, diffusion volatility) plus the
//! optional model-specific blocks:
//!
//! - [`JumpParams`]: Merton compound-Poisson jumps with normal log jump sizes
//! - [`StochasticVolParams`]: Heston square-root variance process
//!
//! Which blocks are required depends on the [`ModelKind`]; see
//! [`PricingParameters::validate_for`].

use std::f64::consts::{FRAC_PI_2, PI};

use pricer_core::types::error::{ensure_finite, ensure_non_negative, ensure_positive};
use pricer_core::types::PricingError;

use super::model_kind::ModelKind;

/// Merton jump parameters.
///
/// Jumps arrive with intensity `lambda`; the log jump size is normally
/// distributed with mean `mu` and standard deviation `delta`.
///
/// # Examples
/// ```
/// use pricer_models::models::JumpParams;
///
/// let jumps = JumpParams::new(0.4, -0.6, 0.2).unwrap();
/// // Expected relative jump size e^(μ+δ²/2) - 1
/// assert!((jumps.compensator() - ((-0.58_f64).exp() - 1.0)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpParams {
    /// Jump intensity (expected jumps per year)
    pub lambda: f64,
    /// Mean of the log jump size
    pub mu: f64,
    /// Standard deviation of the log jump size
    pub delta: f64,
}

impl JumpParams {
    /// Creates jump parameters with validation.
    ///
    /// # Errors
    /// `InvalidParameter` if `lambda < 0`, `delta < 0` or any value is not finite.
    pub fn new(lambda: f64, mu: f64, delta: f64) -> Result<Self, PricingError> {
        let params = Self { lambda, mu, delta };
        params.validate()?;
        Ok(params)
    }

    /// Validates the jump parameters.
    pub fn validate(&self) -> Result<(), PricingError> {
        ensure_non_negative("lambda", self.lambda)?;
        ensure_finite("mu", self.mu)?;
        ensure_non_negative("delta", self.delta)?;
        Ok(())
    }

    /// Mean relative jump size k̄ = e^(μ + δ²/2) - 1.
    #[inline]
    pub fn compensator(&self) -> f64 {
        (self.mu + 0.5 * self.delta * self.delta).exp_m1()
    }
}

/// Heston variance process parameters.
///
/// ```text
/// dv = κ(θ - v) dt + σᵥ √v dW_v,   d⟨W_S, W_v⟩ = ρ dt
/// ```
///
/// # Examples
/// ```
/// use pricer_models::models::StochasticVolParams;
///
/// let sv = StochasticVolParams::new(1.5, 0.04, 0.3, -0.7, 0.04).unwrap();
/// assert!(sv.satisfies_feller());
///
/// assert!(StochasticVolParams::new(1.5, 0.04, 0.3, -1.5, 0.04).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochasticVolParams {
    /// Mean-reversion speed (κ)
    pub kappa: f64,
    /// Long-run variance (θ)
    pub theta: f64,
    /// Volatility of variance (σᵥ)
    pub vol_of_vol: f64,
    /// Correlation between spot and variance shocks (ρ)
    pub rho: f64,
    /// Initial variance (v₀)
    pub v0: f64,
}

impl StochasticVolParams {
    /// Creates stochastic-volatility parameters with validation.
    ///
    /// # Errors
    /// `InvalidParameter` if any of `kappa`, `theta`, `vol_of_vol`, `v0` is
    /// negative, `rho` lies outside `[-1, 1]`, or any value is not finite.
    pub fn new(
        kappa: f64,
        theta: f64,
        vol_of_vol: f64,
        rho: f64,
        v0: f64,
    ) -> Result<Self, PricingError> {
        let params = Self {
            kappa,
            theta,
            vol_of_vol,
            rho,
            v0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates the variance process parameters.
    pub fn validate(&self) -> Result<(), PricingError> {
        ensure_non_negative("kappa", self.kappa)?;
        ensure_non_negative("theta", self.theta)?;
        ensure_non_negative("vol_of_vol", self.vol_of_vol)?;
        ensure_non_negative("v0", self.v0)?;
        ensure_finite("rho", self.rho)?;
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(PricingError::invalid_parameter(
                "rho",
                format!("must be in [-1, 1], got {}", self.rho),
            ));
        }
        Ok(())
    }

    /// Feller condition 2κθ ≥ σᵥ², under which the variance stays positive.
    #[inline]
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta >= self.vol_of_vol * self.vol_of_vol
    }

    /// Expected integrated variance `E[∫₀ᵀ v_t dt]`.
    pub fn integrated_variance(&self, maturity: f64) -> f64 {
        if self.kappa > 0.0 {
            self.theta * maturity
                + (self.v0 - self.theta) * (-(self.kappa * maturity)).exp_m1() / -self.kappa
        } else {
            self.v0 * maturity
        }
    }

    /// Time at which `E[S_T^ω]` becomes infinite for moment order `ω`.
    ///
    /// Moments with `0 ≤ ω ≤ 1` never explode; outside that range the
    /// Riccati equation of the variance process blows up at a finite time
    /// unless the mean reversion dominates.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::models::StochasticVolParams;
    ///
    /// let sv = StochasticVolParams::new(0.5, 0.04, 1.0, 0.5, 0.04).unwrap();
    /// assert!(sv.moment_explosion_time(1.75) < 10.0);
    /// assert_eq!(sv.moment_explosion_time(0.5), f64::INFINITY);
    /// ```
    pub fn moment_explosion_time(&self, order: f64) -> f64 {
        if (0.0..=1.0).contains(&order) || self.vol_of_vol == 0.0 {
            return f64::INFINITY;
        }
        let sigma2 = self.vol_of_vol * self.vol_of_vol;
        let b = self.rho * self.vol_of_vol * order - self.kappa;
        let discriminant = b * b - sigma2 * order * (order - 1.0);

        if discriminant >= 0.0 {
            if b <= 0.0 {
                return f64::INFINITY;
            }
            let root = discriminant.sqrt();
            return ((b + root) / (b - root)).ln() / root;
        }

        let gamma = (-discriminant).sqrt();
        let angle = if b == 0.0 {
            FRAC_PI_2
        } else if b > 0.0 {
            (gamma / b).atan()
        } else {
            PI + (gamma / b).atan()
        };
        2.0 * angle / gamma
    }
}

/// Inputs of a single European option valuation.
///
/// Immutable once built. The diffusion `volatility` is used by GBM and
/// jump-diffusion; the stochastic-volatility models take their variance
/// from [`StochasticVolParams`] instead.
///
/// # Examples
/// ```
/// use pricer_models::models::{JumpParams, ModelKind, PricingParameters};
///
/// let params = PricingParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .maturity(0.244)
///     .rate(0.01)
///     .volatility(0.2)
///     .jumps(JumpParams::new(0.4, -0.6, 0.2).unwrap())
///     .build()
///     .unwrap();
///
/// assert!(params.validate_for(ModelKind::JumpDiffusion).is_ok());
/// assert!(params.validate_for(ModelKind::StochasticVolatility).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingParameters {
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    volatility: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    jumps: Option<JumpParams>,
    #[cfg_attr(feature = "serde", serde(default))]
    stochastic_vol: Option<StochasticVolParams>,
}

impl PricingParameters {
    /// Creates parameters without model-specific blocks.
    ///
    /// # Errors
    /// `InvalidParameter` if spot or strike is not positive, maturity or
    /// volatility is negative, or any value is not finite.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::models::PricingParameters;
    ///
    /// assert!(PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2).is_ok());
    /// assert!(PricingParameters::new(100.0, 100.0, -1.0, 0.01, 0.2).is_err());
    /// ```
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        let params = Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            jumps: None,
            stochastic_vol: None,
        };
        params.validate()?;
        Ok(params)
    }

    /// Creates a new parameter builder.
    #[inline]
    pub fn builder() -> PricingParametersBuilder {
        PricingParametersBuilder::default()
    }

    /// Returns a copy carrying the given jump block.
    #[must_use]
    pub fn with_jumps(mut self, jumps: JumpParams) -> Self {
        self.jumps = Some(jumps);
        self
    }

    /// Returns a copy carrying the given stochastic-volatility block.
    #[must_use]
    pub fn with_stochastic_vol(mut self, stochastic_vol: StochasticVolParams) -> Self {
        self.stochastic_vol = Some(stochastic_vol);
        self
    }

    /// Returns a copy with a different strike.
    #[must_use]
    pub fn with_strike(mut self, strike: f64) -> Self {
        self.strike = strike;
        self
    }

    /// Returns a copy with a different maturity.
    #[must_use]
    pub fn with_maturity(mut self, maturity: f64) -> Self {
        self.maturity = maturity;
        self
    }

    /// Returns a copy with a different diffusion volatility.
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the continuously compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the diffusion volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the jump block, if any.
    #[inline]
    pub fn jumps(&self) -> Option<&JumpParams> {
        self.jumps.as_ref()
    }

    /// Returns the stochastic-volatility block, if any.
    #[inline]
    pub fn stochastic_vol(&self) -> Option<&StochasticVolParams> {
        self.stochastic_vol.as_ref()
    }

    /// Returns the jump block or `InvalidParameter` when it is missing.
    pub fn require_jumps(&self) -> Result<&JumpParams, PricingError> {
        self.jumps
            .as_ref()
            .ok_or_else(|| PricingError::invalid_parameter("jumps", "jump parameters are required"))
    }

    /// Returns the stochastic-volatility block or `InvalidParameter` when it is missing.
    pub fn require_stochastic_vol(&self) -> Result<&StochasticVolParams, PricingError> {
        self.stochastic_vol.as_ref().ok_or_else(|| {
            PricingError::invalid_parameter(
                "stochastic_vol",
                "stochastic volatility parameters are required",
            )
        })
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Validates the fields shared by all models and any block present.
    ///
    /// # Errors
    /// `InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), PricingError> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_non_negative("maturity", self.maturity)?;
        ensure_finite("rate", self.rate)?;
        ensure_non_negative("volatility", self.volatility)?;
        if let Some(jumps) = &self.jumps {
            jumps.validate()?;
        }
        if let Some(stochastic_vol) = &self.stochastic_vol {
            stochastic_vol.validate()?;
        }
        Ok(())
    }

    /// Validates the parameters and checks that every block `kind` needs is present.
    ///
    /// Blocks a model does not use are ignored by its pricer but still
    /// validated when present.
    pub fn validate_for(&self, kind: ModelKind) -> Result<(), PricingError> {
        self.validate()?;
        if kind.requires_jumps() {
            self.require_jumps()?;
        }
        if kind.requires_stochastic_vol() {
            self.require_stochastic_vol()?;
        }
        Ok(())
    }
}

/// Builder for [`PricingParameters`].
///
/// Spot, strike, maturity and rate are mandatory; volatility defaults to 0.
#[derive(Clone, Debug, Default)]
pub struct PricingParametersBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    maturity: Option<f64>,
    rate: Option<f64>,
    volatility: Option<f64>,
    jumps: Option<JumpParams>,
    stochastic_vol: Option<StochasticVolParams>,
}

impl PricingParametersBuilder {
    /// Sets the spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike price.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the time to maturity in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the diffusion volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the jump block.
    #[inline]
    pub fn jumps(mut self, jumps: JumpParams) -> Self {
        self.jumps = Some(jumps);
        self
    }

    /// Sets the stochastic-volatility block.
    #[inline]
    pub fn stochastic_vol(mut self, stochastic_vol: StochasticVolParams) -> Self {
        self.stochastic_vol = Some(stochastic_vol);
        self
    }

    /// Builds and validates the parameters.
    ///
    /// # Errors
    /// `InvalidParameter` if a mandatory field is missing or any value is
    /// out of domain.
    pub fn build(self) -> Result<PricingParameters, PricingError> {
        let params = PricingParameters {
            spot: self.spot.ok_or_else(|| missing("spot"))?,
            strike: self.strike.ok_or_else(|| missing("strike"))?,
            maturity: self.maturity.ok_or_else(|| missing("maturity"))?,
            rate: self.rate.ok_or_else(|| missing("rate"))?,
            volatility: self.volatility.unwrap_or(0.0),
            jumps: self.jumps,
            stochastic_vol: self.stochastic_vol,
        };
        params.validate()?;
        Ok(params)
    }
}

fn missing(name: &str) -> PricingError {
    PricingError::invalid_parameter(name, "is required")
}
