//! Model selection and pricing inputs.
//!
//! This module provides:
//! - `ModelKind`: Static dispatch selector (GBM, jump-diffusion, Heston, Bates)
//! - `OptionType`: Call or put
//! - `PricingParameters`: Immutable valuation inputs with optional
//!   `JumpParams` and `StochasticVolParams` blocks
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{ModelKind, PricingParameters, StochasticVolParams};
//!
//! let params = PricingParameters::new(100.0, 100.0, 1.0, 0.0, 0.0)
//!     .unwrap()
//!     .with_stochastic_vol(StochasticVolParams::new(1.5768, 0.0398, 0.5751, -0.5711, 0.0175).unwrap());
//!
//! assert!(params.validate_for(ModelKind::StochasticVolatility).is_ok());
//! ```

pub mod model_kind;
pub mod option_type;
pub mod params;

pub use model_kind::ModelKind;
pub use option_type::OptionType;
pub use params::{JumpParams, PricingParameters, PricingParametersBuilder, StochasticVolParams};
