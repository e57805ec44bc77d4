//! Core numeric traits.
//!
//! The analytical layer is written against [`Float`] so closed-form formulas
//! accept both `f64` and dual numbers for sensitivity checks.

/// Generic floating-point trait for numeric computations.
///
/// This trait provides a unified interface for both standard floating-point
/// types (f64, f32) and automatic differentiation types (DualNumber).
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_trait_with_f64() {
        fn generic_sqrt<T: Float>(x: T) -> T {
            x.sqrt()
        }

        assert_eq!(generic_sqrt(4.0_f64), 2.0);
    }

    #[test]
    fn test_float_trait_with_f32() {
        fn generic_exp<T: Float>(x: T) -> T {
            x.exp()
        }

        let result = generic_exp(0.0_f32);
        assert_eq!(result, 1.0_f32);
    }
}
