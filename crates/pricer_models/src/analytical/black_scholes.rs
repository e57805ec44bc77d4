//! Black-Scholes-Merton pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Zero volatility is accepted: the terminal price is then the
//! deterministic forward `S·e^(rT)` and the option is worth its discounted
//! forward intrinsic value.

use num_traits::Float;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;

/// Below this value of `T` or `σ√T` the degenerate formulas are used.
const DEGENERATE_EPSILON: f64 = 1e-12;

/// Magnitude returned by `d1`/`d2` in the degenerate limit.
const D_LIMIT: f64 = 100.0;

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `Dual64`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.01, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.01_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive and finite)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `volatility` - Volatility (must be non-negative and finite)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, -0.2).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if spot <= zero || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if volatility < zero || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    #[inline]
    fn is_degenerate(&self, expiry: T) -> bool {
        let epsilon = T::from(DEGENERATE_EPSILON).unwrap();
        expiry <= epsilon || self.volatility * expiry.sqrt() <= epsilon
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// When `σ√T` vanishes, returns ±100 according to the sign of the
    /// forward log-moneyness `ln(S/K) + rT` (zero at the forward).
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();
        let log_moneyness = (self.spot / strike).ln();

        if self.is_degenerate(expiry) {
            let forward_moneyness = log_moneyness + self.rate * expiry.max(T::zero());
            let large = T::from(D_LIMIT).unwrap();
            return if forward_moneyness > T::zero() {
                large
            } else if forward_moneyness < T::zero() {
                -large
            } else {
                T::zero()
            };
        }

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return self.d1(strike, expiry);
        }

        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// Returns `max(S - K, 0)` at `T = 0` and `max(S - K·e^(-rT), 0)` when
    /// the volatility is zero.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.01, 0.2).unwrap();
    /// let price = bs.price_call(100.0, 1.0);
    /// assert!((price - 8.4333).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let zero = T::zero();

        if expiry <= zero {
            return (self.spot - strike).max(zero);
        }

        let discounted_strike = strike * (-self.rate * expiry).exp();

        if self.is_degenerate(expiry) {
            return (self.spot - discounted_strike).max(zero);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);

        self.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.01, 0.2).unwrap();
    /// let price = bs.price_put(100.0, 1.0);
    /// assert!((price - 7.4383).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let zero = T::zero();

        if expiry <= zero {
            return (strike - self.spot).max(zero);
        }

        let discounted_strike = strike * (-self.rate * expiry).exp();

        if self.is_degenerate(expiry) {
            return (discounted_strike - self.spot).max(zero);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);

        discounted_strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }
}
