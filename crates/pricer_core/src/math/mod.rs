//! Numerical building blocks for transform pricing.
//!
//! - `complex`: principal-branch square root and logarithm with an explicit
//!   branch contract
//! - `quadrature`: composite Simpson and Gauss-Legendre rules over a finite
//!   interval, rejecting non-finite integrand values

pub mod complex;
pub mod quadrature;

pub use complex::{principal_ln, principal_sqrt, Complex64, I};
pub use quadrature::{QuadratureRule, MAX_NODES};
