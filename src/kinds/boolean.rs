//! Boolean values.

use serde_json::Value;

use crate::check::{
    create_as_check, create_is_check, create_maybe_as_check, create_maybe_check, Check, MaybeCheck,
};
use crate::config::ConfigError;
use crate::kind::{Convert, Kind};
use crate::stage::{MaybeOptions, WithDefault};

/// JSON booleans. No coercion or validation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanKind;

impl Kind for BooleanKind {
    type Target = bool;
    type Options = ();

    fn type_name(&self) -> &str {
        "boolean"
    }

    fn check(&self, value: &Value) -> Option<bool> {
        value.as_bool()
    }

    fn to_value(&self, value: bool) -> Value {
        Value::Bool(value)
    }
}

impl Convert for BooleanKind {
    /// Accepts booleans, `"true"`/`"false"` in any case, and the numbers 1 and 0.
    fn convert(&self, value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => match n.as_f64() {
                Some(f) if f == 1.0 => Some(true),
                Some(f) if f == 0.0 => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Required boolean, no conversion.
pub fn is_boolean() -> Result<Check<BooleanKind>, ConfigError> {
    create_is_check(BooleanKind, ())
}

/// Optional boolean, no conversion.
pub fn maybe_boolean(mode: MaybeOptions) -> Result<MaybeCheck<BooleanKind>, ConfigError> {
    create_maybe_check(BooleanKind, mode, ())
}

/// Required boolean, converting flag-like strings and numbers.
pub fn as_boolean(default: WithDefault<bool>) -> Result<Check<BooleanKind>, ConfigError> {
    create_as_check(BooleanKind, default, ())
}

/// Optional boolean, converting flag-like strings and numbers.
pub fn maybe_as_boolean(
    mode: MaybeOptions,
    default: WithDefault<bool>,
) -> Result<MaybeCheck<BooleanKind>, ConfigError> {
    create_maybe_as_check(BooleanKind, mode, default, ())
}
