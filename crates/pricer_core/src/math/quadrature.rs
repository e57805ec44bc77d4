//! Fixed-node quadrature over a finite interval.
//!
//! Two composite rules are provided:
//! - [`QuadratureRule::Simpson`]: composite Simpson's 1/3 rule on an even
//!   number of equal sub-intervals
//! - [`QuadratureRule::GaussLegendre`]: composite 5-point Gauss-Legendre on
//!   equal panels
//!
//! The integrand returns `Result` so evaluation failures propagate, and every
//! returned value is checked: a NaN or infinity aborts the integration with
//! [`PricingError::IntegrationDivergence`] at the offending abscissa.

use std::fmt;
use std::str::FromStr;

use crate::types::PricingError;

/// Upper bound on the node count accepted by [`QuadratureRule::integrate`].
pub const MAX_NODES: usize = 2_000_000;

/// Abscissae of the 5-point Gauss-Legendre rule on [-1, 1].
const GL5_NODES: [f64; 5] = [
    -0.906_179_845_938_664,
    -0.538_469_310_105_683_1,
    0.0,
    0.538_469_310_105_683_1,
    0.906_179_845_938_664,
];

/// Weights of the 5-point Gauss-Legendre rule on [-1, 1].
const GL5_WEIGHTS: [f64; 5] = [
    0.236_926_885_056_189_1,
    0.478_628_670_499_366_5,
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
];

/// Quadrature rule selector.
///
/// # Examples
/// ```
/// use pricer_core::math::quadrature::QuadratureRule;
///
/// let rule: QuadratureRule = "gauss-legendre".parse().unwrap();
/// let integral = rule.integrate(|x| Ok(x.cos()), 0.0, std::f64::consts::FRAC_PI_2, 50).unwrap();
/// assert!((integral - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum QuadratureRule {
    /// Composite Simpson's rule.
    #[default]
    Simpson,
    /// Composite 5-point Gauss-Legendre rule.
    GaussLegendre,
}

impl QuadratureRule {
    /// Number of integrand evaluations performed for a requested node count.
    ///
    /// Simpson rounds the sub-interval count up to an even number and
    /// evaluates both end points; Gauss-Legendre rounds up to whole panels.
    pub fn evaluations(&self, nodes: usize) -> usize {
        match self {
            QuadratureRule::Simpson => simpson_intervals(nodes) + 1,
            QuadratureRule::GaussLegendre => gauss_legendre_panels(nodes) * GL5_NODES.len(),
        }
    }

    /// Integrates `f` over `[lower, upper]` using roughly `nodes` points.
    ///
    /// # Errors
    /// - `InvalidParameter` if the interval is empty or non-finite, or if
    ///   `nodes` is outside `[2, MAX_NODES]`
    /// - `IntegrationDivergence` if `f` returns a non-finite value
    /// - any error returned by `f`
    pub fn integrate<F>(
        &self,
        f: F,
        lower: f64,
        upper: f64,
        nodes: usize,
    ) -> Result<f64, PricingError>
    where
        F: FnMut(f64) -> Result<f64, PricingError>,
    {
        if !lower.is_finite() || !upper.is_finite() || upper <= lower {
            return Err(PricingError::invalid_parameter(
                "interval",
                format!("requires finite lower < upper, got [{}, {}]", lower, upper),
            ));
        }
        if !(2..=MAX_NODES).contains(&nodes) {
            return Err(PricingError::invalid_parameter(
                "nodes",
                format!("must be in [2, {}], got {}", MAX_NODES, nodes),
            ));
        }

        match self {
            QuadratureRule::Simpson => simpson(f, lower, upper, nodes),
            QuadratureRule::GaussLegendre => gauss_legendre(f, lower, upper, nodes),
        }
    }
}

impl fmt::Display for QuadratureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadratureRule::Simpson => write!(f, "simpson"),
            QuadratureRule::GaussLegendre => write!(f, "gauss-legendre"),
        }
    }
}

impl FromStr for QuadratureRule {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simpson" => Ok(QuadratureRule::Simpson),
            "gauss-legendre" | "gauss_legendre" | "gl" => Ok(QuadratureRule::GaussLegendre),
            other => Err(PricingError::invalid_parameter(
                "rule",
                format!("unknown quadrature rule '{}'", other),
            )),
        }
    }
}

#[inline]
fn simpson_intervals(nodes: usize) -> usize {
    let n = nodes.max(2);
    n + n % 2
}

#[inline]
fn gauss_legendre_panels(nodes: usize) -> usize {
    nodes.div_ceil(GL5_NODES.len()).max(1)
}

#[inline]
fn checked<F>(f: &mut F, x: f64) -> Result<f64, PricingError>
where
    F: FnMut(f64) -> Result<f64, PricingError>,
{
    let y = f(x)?;
    if y.is_finite() {
        Ok(y)
    } else {
        Err(PricingError::IntegrationDivergence { frequency: x })
    }
}

fn simpson<F>(mut f: F, lower: f64, upper: f64, nodes: usize) -> Result<f64, PricingError>
where
    F: FnMut(f64) -> Result<f64, PricingError>,
{
    let n = simpson_intervals(nodes);
    let h = (upper - lower) / n as f64;

    let mut sum = checked(&mut f, lower)? + checked(&mut f, upper)?;
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * checked(&mut f, lower + i as f64 * h)?;
    }

    Ok(sum * h / 3.0)
}

fn gauss_legendre<F>(mut f: F, lower: f64, upper: f64, nodes: usize) -> Result<f64, PricingError>
where
    F: FnMut(f64) -> Result<f64, PricingError>,
{
    let panels = gauss_legendre_panels(nodes);
    let width = (upper - lower) / panels as f64;
    let half = 0.5 * width;

    let mut sum = 0.0;
    for p in 0..panels {
        let centre = lower + (p as f64 + 0.5) * width;
        for (node, weight) in GL5_NODES.iter().zip(GL5_WEIGHTS.iter()) {
            sum += weight * checked(&mut f, centre + half * node)?;
        }
    }

    Ok(sum * half)
}
