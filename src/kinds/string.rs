//! Text values.
//!
//! This module provides [`StringKind`] with optional trimming, length bounds
//! counted in Unicode scalar values, and regex patterns.

use regex::Regex;
use serde_json::{json, Value};

use crate::check::{
    create_as_check, create_is_check, create_maybe_as_check, create_maybe_check, Check, MaybeCheck,
};
use crate::config::{self, ConfigError};
use crate::issue::{Issue, Issues, Outcome, Reason};
use crate::kind::{Convert, Kind};
use crate::stage::{MaybeOptions, Next, WithDefault};

/// Coercion and validation settings for strings.
///
/// # Example
///
/// ```rust
/// use vetted::{is_string, StringOptions};
/// use serde_json::json;
///
/// let code = is_string(
///     StringOptions { trim: true, ..Default::default() }
///         .with_pattern(r"^[A-Z]{3}$")
///         .unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(code.process(&json!(" EUR ")).into_result().unwrap(), "EUR");
/// assert!(code.process(&json!("euro")).is_failure());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    /// Strip leading and trailing whitespace before validation.
    pub trim: bool,
    /// Fewer characters are rejected with `min-length`.
    pub min_length: Option<usize>,
    /// More characters are rejected with `max-length`.
    pub max_length: Option<usize>,
    /// Non-matching text is rejected with `pattern`.
    pub pattern: Option<Regex>,
}

impl StringOptions {
    /// Adds a regex pattern.
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }
}

/// JSON strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringKind;

impl Kind for StringKind {
    type Target = String;
    type Options = StringOptions;

    fn type_name(&self) -> &str {
        "string"
    }

    fn check(&self, value: &Value) -> Option<String> {
        value.as_str().map(str::to_string)
    }

    fn matches(&self, value: &Value) -> bool {
        value.is_string()
    }

    fn coerce(
        &self,
        value: String,
        options: &StringOptions,
        next: Next<'_, String, String>,
    ) -> Outcome<String> {
        if options.trim {
            next(value.trim().to_string())
        } else {
            next(value)
        }
    }

    fn validate(&self, value: &String, options: &StringOptions) -> Option<Issues> {
        let len = value.chars().count();
        let mut issues = Vec::new();

        if let Some(min) = options.min_length {
            if len < min {
                issues.push(
                    Issue::from(&json!(value), Reason::MinLength, None)
                        .with_context("minLength", json!(min))
                        .with_context("length", json!(len)),
                );
            }
        }
        if let Some(max) = options.max_length {
            if len > max {
                issues.push(
                    Issue::from(&json!(value), Reason::MaxLength, None)
                        .with_context("maxLength", json!(max))
                        .with_context("length", json!(len)),
                );
            }
        }
        if let Some(ref regex) = options.pattern {
            if !regex.is_match(value) {
                issues.push(
                    Issue::from(&json!(value), Reason::Pattern, None)
                        .with_context("pattern", json!(regex.as_str())),
                );
            }
        }

        Issues::try_from_vec(issues)
    }

    fn verify(&self, options: &StringOptions) -> Result<(), ConfigError> {
        config::ordered(
            self.type_name(),
            ("min_length", options.min_length),
            ("max_length", options.max_length),
        )
    }

    fn to_value(&self, value: String) -> Value {
        Value::String(value)
    }
}

impl Convert for StringKind {
    /// Strings pass through; numbers and booleans are rendered as text.
    fn convert(&self, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Required string, no conversion.
pub fn is_string(options: StringOptions) -> Result<Check<StringKind>, ConfigError> {
    create_is_check(StringKind, options)
}

/// Optional string, no conversion.
pub fn maybe_string(
    mode: MaybeOptions,
    options: StringOptions,
) -> Result<MaybeCheck<StringKind>, ConfigError> {
    create_maybe_check(StringKind, mode, options)
}

/// Required string, rendering numbers and booleans as text.
pub fn as_string(
    default: WithDefault<String>,
    options: StringOptions,
) -> Result<Check<StringKind>, ConfigError> {
    create_as_check(StringKind, default, options)
}

/// Optional string, rendering numbers and booleans as text.
pub fn maybe_as_string(
    mode: MaybeOptions,
    default: WithDefault<String>,
    options: StringOptions,
) -> Result<MaybeCheck<StringKind>, ConfigError> {
    create_maybe_as_check(StringKind, mode, default, options)
}
