//! European option side.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_models::models::OptionType;
///
/// assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
/// assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OptionType {
    /// Right to buy at the strike.
    #[cfg_attr(feature = "serde", serde(alias = "c"))]
    Call,
    /// Right to sell at the strike.
    #[cfg_attr(feature = "serde", serde(alias = "p"))]
    Put,
}

impl OptionType {
    /// Both sides, call first.
    pub const BOTH: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Payoff at expiry: `max(S - K, 0)` or `max(K - S, 0)`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(PricingError::invalid_parameter(
                "option_type",
                format!("expected call or put, got '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Call".parse::<OptionType>(), Ok(OptionType::Call));
        assert_eq!(" c ".parse::<OptionType>(), Ok(OptionType::Call));
        assert_eq!("PUT".parse::<OptionType>(), Ok(OptionType::Put));
        assert!("straddle".parse::<OptionType>().unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_intrinsic_at_the_money_is_zero() {
        for side in OptionType::BOTH {
            assert_eq!(side.intrinsic(100.0, 100.0), 0.0);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(OptionType::Call.to_string(), "call");
        assert_eq!(OptionType::Put.to_string(), "put");
        assert!(OptionType::Call.is_call());
        assert!(!OptionType::Put.is_call());
    }
}
