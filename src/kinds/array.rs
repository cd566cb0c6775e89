//! Array values.
//!
//! This module provides [`ArrayKind`], a structural kind that runs an element
//! processor over every item and qualifies each nested issue with the item's
//! index. Length bounds are container constraints.

use serde_json::{json, Value};
use stillwater::prelude::*;

use crate::check::{create_is_check, create_maybe_check, Check, MaybeCheck};
use crate::config::{self, ConfigError};
use crate::issue::{Issue, Issues, Outcome, Reason};
use crate::kind::Kind;
use crate::processor::AnyProcessor;
use crate::stage::{MaybeOptions, Next};

/// Container constraints for arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayOptions {
    /// Fewer elements are rejected with `min-length`.
    pub min_length: Option<usize>,
    /// More elements are rejected with `max-length`.
    pub max_length: Option<usize>,
}

/// JSON arrays, optionally with an element processor.
///
/// # Example
///
/// ```rust
/// use vetted::{is_array, is_number, ArrayOptions, NumberOptions};
/// use serde_json::json;
///
/// let scores = is_array(
///     is_number(NumberOptions { coerce_max: Some(500.0), min: Some(25.0), ..Default::default() })
///         .unwrap(),
///     ArrayOptions { min_length: Some(1), ..Default::default() },
/// )
/// .unwrap();
///
/// let clamped = scores.process(&json!([87, 223, 543, 56])).into_result().unwrap();
/// assert_eq!(clamped, vec![json!(87), json!(223), json!(500), json!(56)]);
///
/// let issues = scores.process(&json!([87, 2, 45])).into_result().unwrap_err();
/// assert_eq!(issues.first().path.to_string(), "[1]");
/// ```
pub struct ArrayKind {
    element: Option<Box<dyn AnyProcessor>>,
}

impl ArrayKind {
    /// Arrays of anything; elements pass through unchanged.
    pub fn any() -> Self {
        Self { element: None }
    }

    /// Arrays whose elements must satisfy `element`.
    pub fn of<P>(element: P) -> Self
    where
        P: AnyProcessor + 'static,
    {
        Self {
            element: Some(Box::new(element)),
        }
    }
}

impl Default for ArrayKind {
    fn default() -> Self {
        Self::any()
    }
}

impl Kind for ArrayKind {
    type Target = Vec<Value>;
    type Options = ArrayOptions;

    fn type_name(&self) -> &str {
        "array"
    }

    fn check(&self, value: &Value) -> Option<Vec<Value>> {
        value.as_array().cloned()
    }

    fn matches(&self, value: &Value) -> bool {
        value.is_array()
    }

    /// Processes every element in index order, collecting all failures.
    ///
    /// When any element fails, container constraints are reported too, ahead
    /// of the element issues.
    fn coerce(
        &self,
        value: Vec<Value>,
        options: &ArrayOptions,
        next: Next<'_, Vec<Value>, Vec<Value>>,
    ) -> Outcome<Vec<Value>> {
        let Some(element) = self.element.as_deref() else {
            return next(value);
        };

        let mut items = Vec::with_capacity(value.len());
        let mut failures: Option<Issues> = None;

        for (index, item) in value.iter().enumerate() {
            match element.process_value(item) {
                Validation::Success(processed) => items.push(processed),
                Validation::Failure(issues) => {
                    let issues = issues.prepend_index(index);
                    failures = Some(match failures {
                        Some(acc) => acc.combine(issues),
                        None => issues,
                    });
                }
            }
        }

        match failures {
            None => next(items),
            Some(element_issues) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    elements = value.len(),
                    issues = element_issues.len(),
                    "array elements rejected"
                );

                match self.validate(&value, options) {
                    Some(container) => Validation::Failure(container.combine(element_issues)),
                    None => Validation::Failure(element_issues),
                }
            }
        }
    }

    fn validate(&self, value: &Vec<Value>, options: &ArrayOptions) -> Option<Issues> {
        let len = value.len();
        let mut issues = Vec::new();

        if let Some(min) = options.min_length {
            if len < min {
                issues.push(
                    Issue::from(&Value::Array(value.clone()), Reason::MinLength, None)
                        .with_context("minLength", json!(min))
                        .with_context("length", json!(len)),
                );
            }
        }
        if let Some(max) = options.max_length {
            if len > max {
                issues.push(
                    Issue::from(&Value::Array(value.clone()), Reason::MaxLength, None)
                        .with_context("maxLength", json!(max))
                        .with_context("length", json!(len)),
                );
            }
        }

        Issues::try_from_vec(issues)
    }

    fn verify(&self, options: &ArrayOptions) -> Result<(), ConfigError> {
        config::ordered(
            self.type_name(),
            ("min_length", options.min_length),
            ("max_length", options.max_length),
        )
    }

    fn to_value(&self, value: Vec<Value>) -> Value {
        Value::Array(value)
    }
}

/// Required array whose elements must satisfy `element`.
pub fn is_array<P>(element: P, options: ArrayOptions) -> Result<Check<ArrayKind>, ConfigError>
where
    P: AnyProcessor + 'static,
{
    create_is_check(ArrayKind::of(element), options)
}

/// Optional array whose elements must satisfy `element`.
pub fn maybe_array<P>(
    element: P,
    mode: MaybeOptions,
    options: ArrayOptions,
) -> Result<MaybeCheck<ArrayKind>, ConfigError>
where
    P: AnyProcessor + 'static,
{
    create_maybe_check(ArrayKind::of(element), mode, options)
}
