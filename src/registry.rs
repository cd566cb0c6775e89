//! Processor registry for named processor storage.
//!
//! This module provides the [`ProcessorRegistry`] type that stores built
//! processors under names so they can be shared and run by name, singly or
//! over a batch of independent inputs.

use parking_lot::RwLock;
use rayon::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::issue::Outcome;
use crate::processor::AnyProcessor;

/// Type alias for the processor storage map.
type ProcessorMap = Arc<RwLock<HashMap<String, Arc<dyn AnyProcessor>>>>;

/// A thread-safe registry for storing and running named processors.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can process concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use vetted::{is_number, is_string, NumberOptions, ProcessorRegistry, StringOptions};
/// use serde_json::json;
///
/// let registry = ProcessorRegistry::new();
/// let age = is_number(NumberOptions {
///     min: Some(0.0),
///     ..Default::default()
/// })
/// .unwrap();
/// registry.register("Age", age).unwrap();
/// registry.register("Name", is_string(StringOptions::default()).unwrap()).unwrap();
///
/// let outcome = registry.process("Age", &json!(42)).unwrap();
/// assert!(outcome.is_success());
/// ```
pub struct ProcessorRegistry {
    processors: ProcessorMap,
}

impl ProcessorRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            processors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a processor with the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vetted::{is_boolean, ProcessorRegistry};
    ///
    /// let registry = ProcessorRegistry::new();
    /// registry.register("Flag", is_boolean().unwrap()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("Flag", is_boolean().unwrap()).is_err());
    /// ```
    pub fn register<P>(&self, name: impl Into<String>, processor: P) -> Result<(), RegistryError>
    where
        P: AnyProcessor + 'static,
    {
        let name = name.into();
        let mut processors = self.processors.write();

        if processors.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(name = %name, "registering processor");

        processors.insert(name, Arc::new(processor));
        Ok(())
    }

    /// Retrieves a processor by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn AnyProcessor>> {
        self.processors.read().get(name).cloned()
    }

    /// Returns true if a processor is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.processors.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.processors.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered processors.
    pub fn len(&self) -> usize {
        self.processors.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.processors.read().is_empty()
    }

    /// Processes a value with a named processor.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ProcessorNotFound` if the name doesn't exist.
    pub fn process(&self, name: &str, value: &Value) -> Result<Outcome<Value>, RegistryError> {
        let processor = self.lookup(name)?;
        Ok(processor.process_value(value))
    }

    /// Processes independent values in parallel with a named processor.
    ///
    /// Outcomes are returned in input order.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ProcessorNotFound` if the name doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vetted::{as_number, NumberOptions, ProcessorRegistry, WithDefault};
    /// use serde_json::json;
    ///
    /// let registry = ProcessorRegistry::new();
    /// let qty = as_number(WithDefault::none(), NumberOptions::default()).unwrap();
    /// registry.register("Qty", qty).unwrap();
    ///
    /// let outcomes = registry
    ///     .process_batch("Qty", &[json!("1"), json!("x"), json!(3)])
    ///     .unwrap();
    /// assert!(outcomes[0].is_success());
    /// assert!(outcomes[1].is_failure());
    /// assert!(outcomes[2].is_success());
    /// ```
    pub fn process_batch(
        &self,
        name: &str,
        values: &[Value],
    ) -> Result<Vec<Outcome<Value>>, RegistryError> {
        let processor = self.lookup(name)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(name, inputs = values.len(), "processing batch");

        Ok(values
            .par_iter()
            .map(|value| processor.process_value(value))
            .collect())
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn AnyProcessor>, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::ProcessorNotFound(name.to_string()))
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ProcessorRegistry {
    fn clone(&self) -> Self {
        Self {
            processors: Arc::clone(&self.processors),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a processor with a name that already exists.
    #[error("processor '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to process with a name that doesn't exist.
    #[error("processor '{0}' not found")]
    ProcessorNotFound(String),
}
