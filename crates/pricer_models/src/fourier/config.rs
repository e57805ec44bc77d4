//! Integration settings for Fourier inversion.

use pricer_core::math::{QuadratureRule, MAX_NODES};
use pricer_core::types::PricingError;

use crate::models::ModelKind;

/// Default damping factor.
pub const DEFAULT_ALPHA: f64 = 1.5;

/// Damping factor used for the stochastic-volatility models.
pub const STOCHASTIC_VOL_ALPHA: f64 = 0.75;

/// Default upper integration bound.
pub const DEFAULT_TRUNCATION: f64 = 1000.0;

/// Default number of quadrature nodes.
pub const DEFAULT_NODES: usize = 10_000;

/// Damped Fourier inversion settings.
///
/// Passed explicitly to every pricing call; there is no global state.
///
/// # Examples
/// ```
/// use pricer_models::fourier::FourierConfig;
/// use pricer_models::models::ModelKind;
///
/// let config = FourierConfig::default();
/// assert_eq!(config.alpha, 1.5);
/// assert_eq!(config.nodes, 10_000);
/// assert!(config.validate().is_ok());
///
/// let heston = FourierConfig::for_model(ModelKind::StochasticVolatility);
/// assert_eq!(heston.alpha, 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FourierConfig {
    /// Damping factor α (> 0) applied to the call price in log-strike.
    pub alpha: f64,
    /// Upper integration bound U.
    pub truncation: f64,
    /// Number of quadrature nodes on `[0, U]`.
    pub nodes: usize,
    /// Quadrature rule.
    pub rule: QuadratureRule,
    /// Integrate the difference to a Black-Scholes transform of matching
    /// variance and add the closed-form price back. Ignored for GBM.
    pub control_variate: bool,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            truncation: DEFAULT_TRUNCATION,
            nodes: DEFAULT_NODES,
            rule: QuadratureRule::default(),
            control_variate: true,
        }
    }
}

impl FourierConfig {
    /// Default settings with the damping factor tuned for `kind`.
    ///
    /// The stochastic-volatility models use a smaller α because their
    /// moments `E[S_T^(α+1)]` explode sooner as α grows.
    pub fn for_model(kind: ModelKind) -> Self {
        let alpha = if kind.requires_stochastic_vol() {
            STOCHASTIC_VOL_ALPHA
        } else {
            DEFAULT_ALPHA
        };
        Self {
            alpha,
            ..Self::default()
        }
    }

    /// Returns a copy with a different damping factor.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Returns a copy with a different upper integration bound.
    #[must_use]
    pub fn with_truncation(mut self, truncation: f64) -> Self {
        self.truncation = truncation;
        self
    }

    /// Returns a copy with a different node count.
    #[must_use]
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    /// Returns a copy with a different quadrature rule.
    #[must_use]
    pub fn with_rule(mut self, rule: QuadratureRule) -> Self {
        self.rule = rule;
        self
    }

    /// Returns a copy with the Black-Scholes control variate switched on or off.
    #[must_use]
    pub fn with_control_variate(mut self, control_variate: bool) -> Self {
        self.control_variate = control_variate;
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    /// `InvalidParameter` if `alpha` or `truncation` is not finite and
    /// positive, or `nodes` lies outside `[2, MAX_NODES]`.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(PricingError::invalid_parameter(
                "alpha",
                format!("must be finite and > 0, got {}", self.alpha),
            ));
        }
        if !(self.truncation.is_finite() && self.truncation > 0.0) {
            return Err(PricingError::invalid_parameter(
                "truncation",
                format!("must be finite and > 0, got {}", self.truncation),
            ));
        }
        if !(2..=MAX_NODES).contains(&self.nodes) {
            return Err(PricingError::invalid_parameter(
                "nodes",
                format!("must be in [2, {}], got {}", MAX_NODES, self.nodes),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = FourierConfig::default();
        assert_eq!(config.alpha, DEFAULT_ALPHA);
        assert_eq!(config.truncation, 1000.0);
        assert_eq!(config.nodes, 10_000);
        assert_eq!(config.rule, QuadratureRule::Simpson);
        assert!(config.control_variate);
    }

    #[test]
    fn test_for_model_alpha() {
        assert_eq!(FourierConfig::for_model(ModelKind::Gbm).alpha, 1.5);
        assert_eq!(FourierConfig::for_model(ModelKind::JumpDiffusion).alpha, 1.5);
        assert_eq!(
            FourierConfig::for_model(ModelKind::StochasticVolatility).alpha,
            0.75
        );
        assert_eq!(
            FourierConfig::for_model(ModelKind::StochVolJumpDiffusion).alpha,
            0.75
        );
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let base = FourierConfig::default();
        let cases = [
            (base.with_alpha(0.0), "alpha"),
            (base.with_alpha(f64::NAN), "alpha"),
            (base.with_truncation(-1.0), "truncation"),
            (base.with_truncation(f64::INFINITY), "truncation"),
            (base.with_nodes(1), "nodes"),
            (base.with_nodes(MAX_NODES + 1), "nodes"),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("Expected InvalidParameter({}), got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_with_methods() {
        let config = FourierConfig::default()
            .with_alpha(1.0)
            .with_truncation(200.0)
            .with_nodes(4096)
            .with_rule(QuadratureRule::GaussLegendre)
            .with_control_variate(false);
        assert_eq!(config.alpha, 1.0);
        assert_eq!(config.truncation, 200.0);
        assert_eq!(config.nodes, 4096);
        assert_eq!(config.rule, QuadratureRule::GaussLegendre);
        assert!(!config.control_variate);
        assert!(config.validate().is_ok());
    }
}
