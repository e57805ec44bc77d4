//! Characteristic-function pricing by damped Fourier inversion.
//!
//! This module provides:
//! - `CharacteristicFunction`: Copyable handle to the CF of `ln S_T`
//! - `CharacteristicFunctionRegistry`: `ModelKind` to CF lookup
//! - `FourierConfig`: Damping factor, truncation, node count and rule
//! - `FourierInverter`: Carr-Madan inversion with parity and direct puts
//!
//! ## Example
//!
//! ```
//! use pricer_models::fourier::{CharacteristicFunctionRegistry, FourierConfig, FourierInverter};
//! use pricer_models::models::{ModelKind, PricingParameters, StochasticVolParams};
//!
//! let registry = CharacteristicFunctionRegistry::default();
//! let cf = registry.get(ModelKind::StochasticVolatility).unwrap();
//!
//! let params = PricingParameters::new(100.0, 100.0, 1.0, 0.0, 0.0)
//!     .unwrap()
//!     .with_stochastic_vol(StochasticVolParams::new(1.5768, 0.0398, 0.5751, -0.5711, 0.0175).unwrap());
//!
//! let inverter = FourierInverter::new(FourierConfig::for_model(ModelKind::StochasticVolatility));
//! let call = inverter.call_value(&params, &cf).unwrap();
//! assert!((call - 5.785155).abs() < 1e-5);
//! ```

pub mod char_fn;
pub mod config;
pub mod inverter;
pub mod registry;

pub use char_fn::{CharFnEval, CharacteristicFunction};
pub use config::FourierConfig;
pub use inverter::FourierInverter;
pub use registry::CharacteristicFunctionRegistry;
