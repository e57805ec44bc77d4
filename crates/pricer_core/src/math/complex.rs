//! Principal-branch complex functions.
//!
//! Characteristic functions of stochastic-volatility models contain a complex
//! square root and a complex logarithm whose branch must be chosen the same
//! way at every point of the integration contour. The helpers here pin the
//! branch down explicitly instead of inheriting whatever convention the
//! complex library applies to signed zeros:
//!
//! - [`principal_sqrt`]: `Re(√z) ≥ 0`, and `Im(√z) ≥ 0` whenever `Re(√z) = 0`
//! - [`principal_ln`]: `arg(z) ∈ (-π, π]`, with the negative real axis mapped
//!   to `+π` regardless of the sign of a zero imaginary part

use std::f64::consts::PI;

pub use num_complex::Complex64;

/// The imaginary unit.
pub const I: Complex64 = Complex64::new(0.0, 1.0);

/// Principal square root.
///
/// Uses the cancellation-free half-angle form: the larger of the two
/// components is computed from `(|z| ± Re z) / 2`, the smaller one by
/// division, so neither loses precision near the real axis.
///
/// # Examples
/// ```
/// use pricer_core::math::complex::{principal_sqrt, Complex64};
///
/// let r = principal_sqrt(Complex64::new(-1.0, -0.0));
/// // Negative real axis always maps to +i, never -i
/// assert_eq!(r, Complex64::new(0.0, 1.0));
///
/// let z = Complex64::new(3.0, -4.0);
/// let r = principal_sqrt(z);
/// assert!((r * r - z).norm() < 1e-12);
/// assert!(r.re >= 0.0);
/// ```
#[inline]
pub fn principal_sqrt(z: Complex64) -> Complex64 {
    let modulus = z.re.hypot(z.im);
    if modulus == 0.0 {
        return Complex64::new(0.0, 0.0);
    }

    if z.re >= 0.0 {
        let t = (0.5 * (modulus + z.re)).sqrt();
        Complex64::new(t, z.im / (2.0 * t))
    } else {
        let t = (0.5 * (modulus - z.re)).sqrt();
        let im = if z.im < 0.0 { -t } else { t };
        Complex64::new(z.im.abs() / (2.0 * t), im)
    }
}

/// Principal logarithm with `arg ∈ (-π, π]`.
///
/// # Examples
/// ```
/// use pricer_core::math::complex::{principal_ln, Complex64};
/// use std::f64::consts::PI;
///
/// let l = principal_ln(Complex64::new(-1.0, -0.0));
/// assert!(l.re.abs() < 1e-15);
/// assert_eq!(l.im, PI);
/// ```
#[inline]
pub fn principal_ln(z: Complex64) -> Complex64 {
    let modulus = z.re.hypot(z.im);
    let arg = if z.im == 0.0 && z.re < 0.0 {
        PI
    } else {
        z.im.atan2(z.re)
    };
    Complex64::new(modulus.ln(), arg)
}

/// Returns `true` when both components are finite.
#[inline]
pub fn is_finite(z: Complex64) -> bool {
    z.re.is_finite() && z.im.is_finite()
}
