//! Model selector for static dispatch.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Underlying dynamics used to value an option.
///
/// Dispatch on this enum is a plain `match`; no trait objects are involved.
///
/// # Examples
/// ```
/// use pricer_models::models::ModelKind;
///
/// let kind: ModelKind = "heston".parse().unwrap();
/// assert_eq!(kind, ModelKind::StochasticVolatility);
/// assert_eq!(kind.to_string(), "stochastic-volatility");
///
/// assert!("variance-gamma".parse::<ModelKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ModelKind {
    /// Geometric Brownian motion (Black-Scholes-Merton).
    Gbm,
    /// Merton jump-diffusion.
    #[cfg_attr(feature = "serde", serde(alias = "jd", alias = "merton"))]
    JumpDiffusion,
    /// Heston stochastic volatility.
    #[cfg_attr(feature = "serde", serde(alias = "sv", alias = "heston"))]
    StochasticVolatility,
    /// Bates stochastic volatility with Merton jumps.
    #[cfg_attr(feature = "serde", serde(alias = "svjd", alias = "bates"))]
    StochVolJumpDiffusion,
}

impl ModelKind {
    /// All model kinds, in registration order.
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Gbm,
        ModelKind::JumpDiffusion,
        ModelKind::StochasticVolatility,
        ModelKind::StochVolJumpDiffusion,
    ];

    /// Canonical name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Gbm => "gbm",
            ModelKind::JumpDiffusion => "jump-diffusion",
            ModelKind::StochasticVolatility => "stochastic-volatility",
            ModelKind::StochVolJumpDiffusion => "stoch-vol-jump-diffusion",
        }
    }

    /// Whether the model needs a jump block.
    #[inline]
    pub fn requires_jumps(&self) -> bool {
        matches!(
            self,
            ModelKind::JumpDiffusion | ModelKind::StochVolJumpDiffusion
        )
    }

    /// Whether the model needs a stochastic-volatility block.
    #[inline]
    pub fn requires_stochastic_vol(&self) -> bool {
        matches!(
            self,
            ModelKind::StochasticVolatility | ModelKind::StochVolJumpDiffusion
        )
    }

    /// Whether the model is priced in closed form rather than by Fourier inversion.
    #[inline]
    pub fn has_closed_form(&self) -> bool {
        matches!(self, ModelKind::Gbm)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gbm" | "black-scholes" => Ok(ModelKind::Gbm),
            "jd" | "jump-diffusion" | "merton" => Ok(ModelKind::JumpDiffusion),
            "sv" | "heston" | "stochastic-volatility" => Ok(ModelKind::StochasticVolatility),
            "svjd" | "bates" | "stoch-vol-jump-diffusion" => Ok(ModelKind::StochVolJumpDiffusion),
            _ => Err(PricingError::UnsupportedModel(s.to_string())),
        }
    }
}
