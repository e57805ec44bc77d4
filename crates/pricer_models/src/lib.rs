//! # Pricer Models (L2: Business Logic)
//!
//! European option pricing under four models:
//!
//! | Model                           | Method                       |
//! |---------------------------------|------------------------------|
//! | GBM (Black-Scholes-Merton)      | Closed form                  |
//! | Merton jump-diffusion           | Carr-Madan Fourier inversion |
//! | Heston stochastic volatility    | Carr-Madan Fourier inversion |
//! | Bates (Heston + Merton jumps)   | Carr-Madan Fourier inversion |
//!
//! This crate provides:
//! - Pricing inputs and model selection (`models`)
//! - Analytical Black-Scholes formulas (`analytical`)
//! - Characteristic functions and damped Fourier inversion (`fourier`)
//! - A uniform facade and flat call surface (`pricing`)
//!
//! ## Design Principles
//!
//! - **Enum-based model selection** for static dispatch
//! - **Explicit integration settings** passed per call, no global state
//! - **Builder pattern** for parameters with validation at build time
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{ModelKind, OptionType, PricingParameters};
//! use pricer_models::pricing::PricingFacade;
//!
//! let params = PricingParameters::new(100.0, 100.0, 1.0, 0.01, 0.2).unwrap();
//! let call = PricingFacade::new()
//!     .price(&params, ModelKind::Gbm, OptionType::Call)
//!     .unwrap();
//! assert!((call - 8.4333).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod fourier;
pub mod models;
pub mod pricing;
