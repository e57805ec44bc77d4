//! Characteristic-function registry keyed by model kind.

use std::collections::HashMap;

use pricer_core::types::PricingError;

use super::char_fn::CharacteristicFunction;
use crate::models::ModelKind;

/// Maps each [`ModelKind`] to its characteristic function.
///
/// The default registry holds the built-in functions for all four models.
/// Partial registries are built from [`empty`](Self::empty) and
/// [`register`](Self::register).
///
/// # Examples
/// ```
/// use pricer_models::fourier::{CharacteristicFunction, CharacteristicFunctionRegistry};
/// use pricer_models::models::ModelKind;
///
/// let registry = CharacteristicFunctionRegistry::default();
/// assert!(registry.get(ModelKind::StochasticVolatility).is_ok());
///
/// let mut partial = CharacteristicFunctionRegistry::empty();
/// partial.register(CharacteristicFunction::builtin(ModelKind::Gbm));
/// assert!(partial.get(ModelKind::JumpDiffusion).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CharacteristicFunctionRegistry {
    functions: HashMap<ModelKind, CharacteristicFunction>,
}

impl Default for CharacteristicFunctionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for kind in ModelKind::ALL {
            registry.register(CharacteristicFunction::builtin(kind));
        }
        registry
    }
}

impl CharacteristicFunctionRegistry {
    /// Creates a registry with no functions.
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Registers `cf` under its model kind, returning the function it replaces.
    pub fn register(&mut self, cf: CharacteristicFunction) -> Option<CharacteristicFunction> {
        self.functions.insert(cf.kind(), cf)
    }

    /// Looks up the characteristic function of `kind`.
    ///
    /// # Errors
    /// `UnsupportedModel` if nothing is registered for `kind`.
    pub fn get(&self, kind: ModelKind) -> Result<CharacteristicFunction, PricingError> {
        self.functions
            .get(&kind)
            .copied()
            .ok_or_else(|| PricingError::UnsupportedModel(kind.to_string()))
    }

    /// Registered model kinds, in `ModelKind::ALL` order.
    pub fn kinds(&self) -> Vec<ModelKind> {
        ModelKind::ALL
            .into_iter()
            .filter(|kind| self.functions.contains_key(kind))
            .collect()
    }
}
