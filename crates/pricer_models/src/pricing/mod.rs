//! Model dispatch and public call surface.
//!
//! This module provides:
//! - `PricingFacade`: Closed-form or Fourier valuation per `ModelKind`,
//!   with parallel grid pricing
//! - `api`: Flat per-model pricing functions

pub mod api;
pub mod facade;

pub use facade::{PricingFacade, PricingRequest};
