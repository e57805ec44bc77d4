//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - `BlackScholes`: Generic Black-Scholes-Merton formulas (`f64` or `Dual64`)
//! - `ClosedFormPricer`: GBM pricer over `PricingParameters`
//! - `norm_cdf` / `norm_pdf`: Standard normal distribution functions
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Supports both `f64` and `Dual64` for AD
//! - **Numerical Stability**: Hart's double-precision normal CDF

pub mod black_scholes;
pub mod closed_form;
pub mod distributions;
pub mod error;

pub use black_scholes::BlackScholes;
pub use closed_form::ClosedFormPricer;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
