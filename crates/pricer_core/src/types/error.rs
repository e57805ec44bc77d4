//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from parameter validation, transform evaluation
//!   and model dispatch

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every pricing path in the workspace reports failures through this type.
/// Pricing is a deterministic computation, so an error on given inputs will
/// always recur: callers should not retry.
///
/// # Variants
/// - `InvalidParameter`: Out-of-domain input (negative volatility or variance,
///   negative maturity, non-finite values, missing model parameters)
/// - `IntegrationDivergence`: The transform integrand became non-finite
/// - `UnsupportedModel`: Model kind not registered or unknown
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("volatility", "must be >= 0, got -0.2");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter volatility: must be >= 0, got -0.2"
/// );
///
/// let err = PricingError::UnsupportedModel("variance-gamma".to_string());
/// assert_eq!(format!("{}", err), "Unsupported model: variance-gamma");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid input parameter.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: String,
        /// Description of the violated constraint
        reason: String,
    },

    /// The integrand produced a non-finite value on the integration contour.
    #[error("Integration diverged: non-finite integrand at u = {frequency}")]
    IntegrationDivergence {
        /// Real frequency at which evaluation failed
        frequency: f64,
    },

    /// Model kind is not registered with the pricer.
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),
}

impl PricingError {
    /// Builds an `InvalidParameter` error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for `InvalidParameter`.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, PricingError::InvalidParameter { .. })
    }
}

/// Checks that `value` is finite.
///
/// # Errors
/// `InvalidParameter` naming `name` when `value` is NaN or infinite.
pub fn ensure_finite(name: &str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

/// Checks that `value` is finite and strictly positive.
pub fn ensure_positive(name: &str, value: f64) -> Result<f64, PricingError> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be > 0, got {}", value),
        ))
    }
}

/// Checks that `value` is finite and non-negative.
pub fn ensure_non_negative(name: &str, value: f64) -> Result<f64, PricingError> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be >= 0, got {}", value),
        ))
    }
}
