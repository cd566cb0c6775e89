//! Traits for processor polymorphism.
//!
//! This module provides [`ValueProcessor`], the single entry point into every
//! built processor, and [`AnyProcessor`], its type-erased form used by
//! structural kinds to hold element processors of different output types.

use serde_json::Value;

use crate::issue::Outcome;

/// A reusable, side-effect-free function from an untyped value to an outcome.
///
/// The `Send + Sync` bounds allow one processor to serve concurrent callers
/// and to live in trait objects like `Box<dyn AnyProcessor>`.
///
/// # Example
///
/// ```rust
/// use vetted::{is_number, NumberOptions, ValueProcessor};
/// use serde_json::json;
///
/// let age = is_number(NumberOptions { min: Some(0.0), ..Default::default() }).unwrap();
///
/// assert!(age.process(&json!(42)).is_success());
/// assert!(age.process(&json!(-1)).is_failure());
/// ```
pub trait ValueProcessor: Send + Sync {
    /// The typed value produced on success.
    type Output;

    /// Processes a value.
    fn process(&self, value: &Value) -> Outcome<Self::Output>;

    /// Processes a value and renders the result back into the untyped model.
    ///
    /// An absent optional value renders as `Value::Null`.
    fn process_to_value(&self, value: &Value) -> Outcome<Value>;
}

/// A type-erased processor producing untyped values.
///
/// Every [`ValueProcessor`] is an `AnyProcessor` through the blanket impl.
pub trait AnyProcessor: Send + Sync {
    /// Processes a value and returns the result as a `serde_json::Value`.
    fn process_value(&self, value: &Value) -> Outcome<Value>;
}

impl<P: ValueProcessor> AnyProcessor for P {
    fn process_value(&self, value: &Value) -> Outcome<Value> {
        self.process_to_value(value)
    }
}
