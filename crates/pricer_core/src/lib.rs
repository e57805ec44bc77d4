//! # pricer_core: Numerical Foundation for Transform Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Error taxonomy shared by every pricing path: `PricingError` (`types::error`)
//! - Principal-branch complex square root and logarithm (`math::complex`)
//! - Fixed-node quadrature rules with divergence detection (`math::quadrature`)
//! - The generic `Float` trait re-export (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - num-complex: Complex arithmetic for characteristic functions
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::complex::{principal_sqrt, Complex64};
//! use pricer_core::math::quadrature::QuadratureRule;
//!
//! // Principal square root always has a non-negative real part
//! let root = principal_sqrt(Complex64::new(-4.0, 0.0));
//! assert!(root.re.abs() < 1e-12);
//! assert!((root.im - 2.0).abs() < 1e-12);
//!
//! // Integrate x^2 over [0, 1]
//! let area = QuadratureRule::Simpson
//!     .integrate(|x| Ok(x * x), 0.0, 1.0, 100)
//!     .unwrap();
//! assert!((area - 1.0 / 3.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `QuadratureRule`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
