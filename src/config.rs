//! Construction-time configuration checks.
//!
//! Option records are plain structs. They are checked once, when a processor
//! is built, so a misconfigured processor never exists.

use std::fmt::Display;

/// Errors raised while building a processor from its options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A lower bound exceeds its upper bound.
    #[error("{kind}: `{lower}` ({lower_value}) is greater than `{upper}` ({upper_value})")]
    InvertedBounds {
        kind: String,
        lower: &'static str,
        lower_value: String,
        upper: &'static str,
        upper_value: String,
    },

    /// A numeric bound is NaN or infinite.
    #[error("{kind}: `{option}` must be finite")]
    NonFinite { kind: String, option: &'static str },

    /// Two options are set that cannot apply together.
    #[error("{kind}: `{first}` cannot be combined with `{second}`")]
    ConflictingOptions {
        kind: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Fails when both bounds are set and `lower > upper`.
pub(crate) fn ordered<T>(
    kind: &str,
    (lower, lower_value): (&'static str, Option<T>),
    (upper, upper_value): (&'static str, Option<T>),
) -> Result<(), ConfigError>
where
    T: PartialOrd + Display,
{
    match (lower_value, upper_value) {
        (Some(l), Some(u)) if l > u => Err(ConfigError::InvertedBounds {
            kind: kind.to_string(),
            lower,
            lower_value: l.to_string(),
            upper,
            upper_value: u.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Fails when the bound is set and not finite.
pub(crate) fn finite(
    kind: &str,
    option: &'static str,
    value: Option<f64>,
) -> Result<(), ConfigError> {
    match value {
        Some(v) if !v.is_finite() => Err(ConfigError::NonFinite {
            kind: kind.to_string(),
            option,
        }),
        _ => Ok(()),
    }
}
