//! The capability interface every concrete type supplies to the builders.
//!
//! A [`Kind`] knows its type name, how to recognise (and narrow) a raw value,
//! how to coerce an already-typed value, and how to validate it. Kinds that can
//! also turn other representations into their type implement [`Convert`], which
//! unlocks the conversion builders.

use serde_json::Value;

use crate::config::ConfigError;
use crate::issue::{Issues, Outcome};
use crate::stage::Next;

/// A concrete value type understood by the check builders.
///
/// # Example
///
/// ```rust
/// use serde_json::Value;
/// use vetted::{create_is_check, Kind, ValueProcessor};
///
/// struct Even;
///
/// impl Kind for Even {
///     type Target = i64;
///     type Options = ();
///
///     fn type_name(&self) -> &str {
///         "even"
///     }
///
///     fn check(&self, value: &Value) -> Option<i64> {
///         value.as_i64().filter(|n| n % 2 == 0)
///     }
///
///     fn to_value(&self, value: i64) -> Value {
///         Value::from(value)
///     }
/// }
///
/// let even = create_is_check(Even, ()).unwrap();
/// assert!(even.process(&Value::from(4)).is_success());
/// assert!(even.process(&Value::from(3)).is_failure());
/// ```
pub trait Kind: Send + Sync + 'static {
    /// The typed value a processor of this kind produces.
    type Target: Clone + Send + Sync + 'static;

    /// Coercion and validation settings, frozen at construction.
    type Options: Send + Sync + 'static;

    /// Name reported in `expectedType` / `toType` issue context.
    fn type_name(&self) -> &str;

    /// Type guard. Returns the narrowed value when `value` already has this type.
    fn check(&self, value: &Value) -> Option<Self::Target>;

    /// Type guard without narrowing.
    ///
    /// Override when narrowing allocates and only the answer is needed.
    fn matches(&self, value: &Value) -> bool {
        self.check(value).is_some()
    }

    /// Adjusts a correctly typed value before validation, then continues.
    fn coerce(
        &self,
        value: Self::Target,
        _options: &Self::Options,
        next: Next<'_, Self::Target, Self::Target>,
    ) -> Outcome<Self::Target> {
        next(value)
    }

    /// Domain constraints. `None` accepts the value unchanged.
    fn validate(&self, _value: &Self::Target, _options: &Self::Options) -> Option<Issues> {
        None
    }

    /// Rejects option records that could never be satisfied.
    fn verify(&self, _options: &Self::Options) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Renders a typed value back into the untyped model.
    fn to_value(&self, value: Self::Target) -> Value;
}

/// A kind that can convert other representations into its target type.
pub trait Convert: Kind {
    /// Best-effort conversion; `None` means the value cannot be represented.
    fn convert(&self, value: &Value) -> Option<Self::Target>;
}
