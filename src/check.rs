//! Check builders.
//!
//! The four builders wire the stages of [`crate::stage`] into processors for
//! the four access modes:
//!
//! | builder | presence | gate | default |
//! |---|---|---|---|
//! | [`create_is_check`] | required | strict type | no |
//! | [`create_maybe_check`] | optional | strict type | no |
//! | [`create_as_check`] | required | conversion | yes |
//! | [`create_maybe_as_check`] | optional | conversion | yes |
//!
//! Building validates the kind's options once; processing never fails for
//! configuration reasons.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ConfigError;
use crate::issue::Outcome;
use crate::kind::{Convert, Kind};
use crate::processor::ValueProcessor;
use crate::stage::{
    As, Coerce, Definitely, Empty, Gate, Is, Maybe, MaybeOptions, Stage, Validate, WithDefault,
};

/// A required processor: produces `K::Target`.
pub struct Check<K: Kind> {
    kind: Arc<K>,
    presence: Definitely<K::Target>,
    gate: Gate<K>,
    coerce: Coerce<K>,
    validate: Validate<K>,
}

impl<K: Kind> Check<K> {
    /// Runs presence, gate, coercion and validation in order.
    pub fn process(&self, value: &Value) -> Outcome<K::Target> {
        let validate = |v: K::Target| self.validate.apply(v);
        let coerce = |v: K::Target| self.coerce.apply(v, &validate);
        let gate = |v: &Value| self.gate.apply(v, &coerce);
        self.presence.apply(value, &gate)
    }

    /// The kind this processor was built from.
    pub fn kind(&self) -> &K {
        &self.kind
    }
}

impl<K: Kind> ValueProcessor for Check<K> {
    type Output = K::Target;

    fn process(&self, value: &Value) -> Outcome<K::Target> {
        Check::process(self, value)
    }

    fn process_to_value(&self, value: &Value) -> Outcome<Value> {
        Check::process(self, value).map(|typed| self.kind.to_value(typed))
    }
}

/// An optional processor: produces `Option<K::Target>`, `None` meaning absent.
pub struct MaybeCheck<K: Kind> {
    kind: Arc<K>,
    presence: Maybe<K>,
    gate: Gate<K>,
    coerce: Coerce<K>,
    validate: Validate<K>,
}

impl<K: Kind> MaybeCheck<K> {
    /// Runs the optional gate, then gate, coercion and validation in order.
    pub fn process(&self, value: &Value) -> Outcome<Option<K::Target>> {
        let validate = |v: K::Target| self.validate.apply(v);
        let coerce = |v: K::Target| self.coerce.apply(v, &validate);
        let gate = |v: &Value| self.gate.apply(v, &coerce);
        self.presence.apply(value, &gate)
    }

    /// Replaces the emptiness predicate (default: null).
    ///
    /// ```rust
    /// use serde_json::{json, Value};
    /// use vetted::{maybe_as_number, MaybeOptions, NumberOptions, WithDefault};
    ///
    /// fn blank(value: &Value) -> bool {
    ///     value.is_null() || value.as_str().is_some_and(|s| s.trim().is_empty())
    /// }
    ///
    /// let quantity =
    ///     maybe_as_number(MaybeOptions::new(), WithDefault::none(), NumberOptions::default())
    ///         .unwrap()
    ///         .with_empty(blank);
    ///
    /// assert_eq!(quantity.process(&json!("  ")).into_result().unwrap(), None);
    /// ```
    pub fn with_empty(mut self, empty: Empty) -> Self {
        self.presence = self.presence.with_empty(empty);
        self
    }

    /// The kind this processor was built from.
    pub fn kind(&self) -> &K {
        &self.kind
    }
}

impl<K: Kind> ValueProcessor for MaybeCheck<K> {
    type Output = Option<K::Target>;

    fn process(&self, value: &Value) -> Outcome<Option<K::Target>> {
        MaybeCheck::process(self, value)
    }

    fn process_to_value(&self, value: &Value) -> Outcome<Value> {
        MaybeCheck::process(self, value).map(|typed| match typed {
            Some(typed) => self.kind.to_value(typed),
            None => Value::Null,
        })
    }
}

/// Shared pieces of every processor.
struct Parts<K: Kind> {
    kind: Arc<K>,
    coerce: Coerce<K>,
    validate: Validate<K>,
}

fn parts<K: Kind>(
    kind: K,
    options: K::Options,
    mode: &'static str,
) -> Result<Parts<K>, ConfigError> {
    kind.verify(&options)?;

    #[cfg(feature = "tracing")]
    tracing::trace!(kind = kind.type_name(), mode, "building processor");
    #[cfg(not(feature = "tracing"))]
    let _ = mode;

    let kind = Arc::new(kind);
    let options = Arc::new(options);
    Ok(Parts {
        coerce: Coerce::new(Arc::clone(&kind), Arc::clone(&options)),
        validate: Validate::new(Arc::clone(&kind), options),
        kind,
    })
}

/// Builds a required processor that accepts only values already of the kind's type.
///
/// # Errors
///
/// Returns the kind's [`ConfigError`] when `options` cannot be satisfied.
///
/// # Example
///
/// ```rust
/// use vetted::{create_is_check, NumberKind, NumberOptions, Reason};
/// use serde_json::json;
///
/// let n = create_is_check(NumberKind, NumberOptions::default()).unwrap();
///
/// assert_eq!(n.process(&json!(12)).into_result().unwrap(), 12.0);
/// let issues = n.process(&json!("12")).into_result().unwrap_err();
/// assert_eq!(issues.first().reason, Reason::IncorrectType);
/// ```
pub fn create_is_check<K: Kind>(kind: K, options: K::Options) -> Result<Check<K>, ConfigError> {
    let Parts {
        kind,
        coerce,
        validate,
    } = parts(kind, options, "is")?;
    Ok(Check {
        presence: Definitely::new(WithDefault::none()),
        gate: Gate::Is(Is::new(Arc::clone(&kind))),
        kind,
        coerce,
        validate,
    })
}

/// Builds an optional processor that accepts only values already of the kind's type.
///
/// # Errors
///
/// Returns the kind's [`ConfigError`] when `options` cannot be satisfied.
pub fn create_maybe_check<K: Kind>(
    kind: K,
    mode: MaybeOptions,
    options: K::Options,
) -> Result<MaybeCheck<K>, ConfigError> {
    let Parts {
        kind,
        coerce,
        validate,
    } = parts(kind, options, "maybe")?;
    Ok(MaybeCheck {
        presence: Maybe::new(Arc::clone(&kind), mode, WithDefault::none()),
        gate: Gate::Is(Is::new(Arc::clone(&kind))),
        kind,
        coerce,
        validate,
    })
}

/// Builds a required processor that converts input into the kind's type.
///
/// `default` is substituted both for absent input and for input that cannot
/// be converted.
///
/// # Errors
///
/// Returns the kind's [`ConfigError`] when `options` cannot be satisfied.
pub fn create_as_check<K: Convert>(
    kind: K,
    default: WithDefault<K::Target>,
    options: K::Options,
) -> Result<Check<K>, ConfigError> {
    let Parts {
        kind,
        coerce,
        validate,
    } = parts(kind, options, "as")?;
    Ok(Check {
        presence: Definitely::new(default.clone()),
        gate: Gate::As(As::new(Arc::clone(&kind), <K as Convert>::convert, default)),
        kind,
        coerce,
        validate,
    })
}

/// Builds an optional processor that converts input into the kind's type.
///
/// # Errors
///
/// Returns the kind's [`ConfigError`] when `options` cannot be satisfied.
pub fn create_maybe_as_check<K: Convert>(
    kind: K,
    mode: MaybeOptions,
    default: WithDefault<K::Target>,
    options: K::Options,
) -> Result<MaybeCheck<K>, ConfigError> {
    let Parts {
        kind,
        coerce,
        validate,
    } = parts(kind, options, "maybe-as")?;
    Ok(MaybeCheck {
        presence: Maybe::new(Arc::clone(&kind), mode, default.clone()),
        gate: Gate::As(As::new(Arc::clone(&kind), <K as Convert>::convert, default)),
        kind,
        coerce,
        validate,
    })
}
