//! Numeric values.
//!
//! This module provides [`NumberKind`] with clamping (`coerce_min`,
//! `coerce_max`) and range validation (`min`, `max`).

use serde_json::{Number, Value};

use crate::check::{
    create_as_check, create_is_check, create_maybe_as_check, create_maybe_check, Check, MaybeCheck,
};
use crate::config::{self, ConfigError};
use crate::issue::{Issue, Issues, Outcome, Reason};
use crate::kind::{Convert, Kind};
use crate::stage::{MaybeOptions, Next, WithDefault};

/// Coercion and validation settings for numbers.
///
/// Coercion clamps first; validation then sees the clamped value.
///
/// # Example
///
/// ```rust
/// use vetted::{is_number, NumberOptions};
/// use serde_json::json;
///
/// let score = is_number(NumberOptions {
///     coerce_max: Some(500.0),
///     min: Some(25.0),
///     ..Default::default()
/// })
/// .unwrap();
///
/// assert_eq!(score.process(&json!(543)).into_result().unwrap(), 500.0);
/// assert!(score.process(&json!(2)).is_failure());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberOptions {
    /// Values below this are raised to it.
    pub coerce_min: Option<f64>,
    /// Values above this are lowered to it.
    pub coerce_max: Option<f64>,
    /// Values below this are rejected with `min`.
    pub min: Option<f64>,
    /// Values above this are rejected with `max`.
    pub max: Option<f64>,
}

/// JSON numbers, read as `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberKind;

impl Kind for NumberKind {
    type Target = f64;
    type Options = NumberOptions;

    fn type_name(&self) -> &str {
        "number"
    }

    fn check(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    fn coerce(
        &self,
        value: f64,
        options: &NumberOptions,
        next: Next<'_, f64, f64>,
    ) -> Outcome<f64> {
        let mut n = value;
        if let Some(lower) = options.coerce_min {
            n = n.max(lower);
        }
        if let Some(upper) = options.coerce_max {
            n = n.min(upper);
        }
        next(n)
    }

    fn validate(&self, value: &f64, options: &NumberOptions) -> Option<Issues> {
        let mut issues = Vec::new();

        if let Some(min) = options.min {
            if *value < min {
                issues.push(
                    Issue::from(&number_value(*value), Reason::Min, None)
                        .with_context("min", number_value(min)),
                );
            }
        }
        if let Some(max) = options.max {
            if *value > max {
                issues.push(
                    Issue::from(&number_value(*value), Reason::Max, None)
                        .with_context("max", number_value(max)),
                );
            }
        }

        Issues::try_from_vec(issues)
    }

    fn verify(&self, options: &NumberOptions) -> Result<(), ConfigError> {
        let kind = self.type_name();
        config::finite(kind, "coerce_min", options.coerce_min)?;
        config::finite(kind, "coerce_max", options.coerce_max)?;
        config::finite(kind, "min", options.min)?;
        config::finite(kind, "max", options.max)?;
        config::ordered(
            kind,
            ("coerce_min", options.coerce_min),
            ("coerce_max", options.coerce_max),
        )?;
        config::ordered(kind, ("min", options.min), ("max", options.max))
    }

    fn to_value(&self, value: f64) -> Value {
        number_value(value)
    }
}

impl Convert for NumberKind {
    /// Numbers pass through; strings are trimmed and parsed.
    fn convert(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

/// Renders a number, using the integer representation when it is exact.
fn number_value(n: f64) -> Value {
    const EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if n.fract() == 0.0 && n.abs() < EXACT {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Required number, no conversion.
pub fn is_number(options: NumberOptions) -> Result<Check<NumberKind>, ConfigError> {
    create_is_check(NumberKind, options)
}

/// Optional number, no conversion.
pub fn maybe_number(
    mode: MaybeOptions,
    options: NumberOptions,
) -> Result<MaybeCheck<NumberKind>, ConfigError> {
    create_maybe_check(NumberKind, mode, options)
}

/// Required number, converting numeric strings.
pub fn as_number(
    default: WithDefault<f64>,
    options: NumberOptions,
) -> Result<Check<NumberKind>, ConfigError> {
    create_as_check(NumberKind, default, options)
}

/// Optional number, converting numeric strings.
pub fn maybe_as_number(
    mode: MaybeOptions,
    default: WithDefault<f64>,
    options: NumberOptions,
) -> Result<MaybeCheck<NumberKind>, ConfigError> {
    create_maybe_as_check(NumberKind, mode, default, options)
}
