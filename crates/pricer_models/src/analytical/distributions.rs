//! Standard normal distribution functions.
//!
//! This module provides AD-compatible implementations of:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! All functions are generic over `T: Float` to support both `f64` and `Dual64`
//! for automatic differentiation.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631;

/// Beyond this |x| the lower tail underflows double precision.
const TAIL_CUTOFF: f64 = 37.0;

/// Switch point between the rational and continued-fraction regimes (10/√2).
const RATIONAL_LIMIT: f64 = 7.071_067_811_865_47;

/// Numerator coefficients of Hart's rational approximation, highest degree first.
const HART_P: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

/// Denominator coefficients of Hart's rational approximation, highest degree first.
const HART_Q: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

/// Horner evaluation of a polynomial with coefficients given highest degree first.
#[inline]
fn horner<T: Float>(coefficients: &[f64], x: T) -> T {
    coefficients
        .iter()
        .fold(T::zero(), |acc, &c| acc * x + T::from(c).unwrap())
}

/// Lower tail Φ(-|x|) via Hart (1968), as arranged by West (2005).
///
/// Absolute error is below 1e-15 across the real line. The rational form is
/// used for |x| < 10/√2 and a five-term continued fraction beyond it.
#[inline]
fn lower_tail<T: Float>(abs_x: T) -> T {
    if abs_x > T::from(TAIL_CUTOFF).unwrap() {
        return T::zero();
    }

    let half = T::from(0.5).unwrap();
    let gaussian = (-half * abs_x * abs_x).exp();

    if abs_x < T::from(RATIONAL_LIMIT).unwrap() {
        gaussian * horner(&HART_P, abs_x) / horner(&HART_Q, abs_x)
    } else {
        let mut fraction = abs_x + T::from(0.65).unwrap();
        for k in [4.0, 3.0, 2.0, 1.0] {
            fraction = abs_x + T::from(k).unwrap() / fraction;
        }
        gaussian / fraction / T::from(SQRT_2PI).unwrap()
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// The lower tail is evaluated directly and the upper half as `1 - Φ(-x)`,
/// so `norm_cdf(x) + norm_cdf(-x) == 1` up to a single rounding and
/// closed-form put-call parity holds to machine precision.
///
/// # Accuracy
/// Absolute error below 1e-15 for all finite x.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-15);
///
/// let cdf_1 = norm_cdf(1.0_f64);
/// assert!((cdf_1 - 0.8413447460685429).abs() < 1e-14);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let tail = lower_tail(x.abs());
    if x > T::zero() {
        T::one() - tail
    } else {
        tail
    }
}

/// Standard normal probability density function.
///
/// Computes the density φ(x) = (1 / sqrt(2π)) * exp(-x² / 2).
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// let pdf_0 = norm_pdf(0.0_f64);
/// assert!((pdf_0 - 0.3989422804).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();

    frac_1_sqrt_2pi * (-half * x * x).exp()
}
