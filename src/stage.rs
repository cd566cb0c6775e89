//! Pipeline stages.
//!
//! A processor is a fixed sequence of named stages:
//!
//! ```text
//! presence (Definitely | Maybe) -> gate (Is | As) -> Coerce -> Validate
//! ```
//!
//! Every stage implements [`Stage`]: it either settles the outcome itself or
//! hands a (possibly transformed) value to the [`Next`] stage. A failing stage
//! short-circuits; the stages after it never run.

use std::sync::Arc;

use serde_json::{json, Value};
use stillwater::Validation;

use crate::issue::{Issue, Outcome, Reason};
use crate::kind::Kind;

/// The continuation a stage delegates to.
pub type Next<'a, I, T> = &'a dyn Fn(I) -> Outcome<T>;

/// Decides whether a value counts as absent for an optional processor.
pub type Empty = fn(&Value) -> bool;

/// The default emptiness predicate.
///
/// JSON has a single absent value, so both null and a missing field (which
/// structural processors present as null) are empty.
pub fn null_or_undefined(value: &Value) -> bool {
    value.is_null()
}

/// A single step of a processor pipeline.
///
/// `I` is what the stage receives, `F` what it forwards, `T` what the rest of
/// the pipeline produces. `Output` may differ from `T`; the optional gate, for
/// instance, turns `T` into `Option<T>`.
pub trait Stage<I, F, T> {
    /// The value type of the outcome this stage returns.
    type Output;

    /// Runs the stage, delegating to `next` unless it settles the outcome.
    fn apply(&self, value: I, next: Next<'_, F, T>) -> Outcome<Self::Output>;
}

/// Options that shape how an optional processor treats questionable input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaybeOptions {
    /// Treat a value that fails the type guard as absent instead of failing.
    pub incorrect_type_to_undefined: bool,
    /// Surface `no-conversion` instead of treating unconvertible input as absent.
    pub strict_parsing: bool,
}

impl MaybeOptions {
    /// Options with both levers on their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `incorrect_type_to_undefined`.
    pub fn incorrect_type_to_undefined(mut self, enabled: bool) -> Self {
        self.incorrect_type_to_undefined = enabled;
        self
    }

    /// Sets `strict_parsing`.
    pub fn strict_parsing(mut self, enabled: bool) -> Self {
        self.strict_parsing = enabled;
        self
    }
}

/// The value substituted when input is absent or unconvertible.
#[derive(Debug, Clone, PartialEq)]
pub struct WithDefault<T> {
    /// The substitute, if any.
    pub default: Option<T>,
}

impl<T> WithDefault<T> {
    /// No default configured.
    pub fn none() -> Self {
        Self { default: None }
    }

    /// Substitutes `value`.
    pub fn value(value: T) -> Self {
        Self {
            default: Some(value),
        }
    }
}

impl<T: Clone> WithDefault<T> {
    /// Produces the substituted outcome, or nothing when no default is set.
    pub fn produce(&self) -> Option<Outcome<T>> {
        self.default.clone().map(Validation::Success)
    }
}

impl<T> Default for WithDefault<T> {
    fn default() -> Self {
        Self::none()
    }
}

/// Presence gate for required processors.
pub struct Definitely<T> {
    fallback: WithDefault<T>,
}

impl<T> Definitely<T> {
    pub fn new(fallback: WithDefault<T>) -> Self {
        Self { fallback }
    }
}

impl<'v, T: Clone> Stage<&'v Value, &'v Value, T> for Definitely<T> {
    type Output = T;

    fn apply(&self, value: &'v Value, next: Next<'_, &'v Value, T>) -> Outcome<T> {
        if value.is_null() {
            return self
                .fallback
                .produce()
                .unwrap_or_else(|| Issue::from(value, Reason::NotDefined, None).into_outcome());
        }
        next(value)
    }
}

/// Presence gate for optional processors.
///
/// The order of checks matters: emptiness, then wrong-type masking, then
/// delegation, then `no-conversion` masking.
pub struct Maybe<K: Kind> {
    kind: Arc<K>,
    empty: Empty,
    options: MaybeOptions,
    fallback: WithDefault<K::Target>,
}

impl<K: Kind> Maybe<K> {
    pub fn new(kind: Arc<K>, options: MaybeOptions, fallback: WithDefault<K::Target>) -> Self {
        Self {
            kind,
            empty: null_or_undefined,
            options,
            fallback,
        }
    }

    /// Replaces the emptiness predicate.
    pub fn with_empty(mut self, empty: Empty) -> Self {
        self.empty = empty;
        self
    }
}

impl<'v, K: Kind> Stage<&'v Value, &'v Value, K::Target> for Maybe<K> {
    type Output = Option<K::Target>;

    fn apply(
        &self,
        value: &'v Value,
        next: Next<'_, &'v Value, K::Target>,
    ) -> Outcome<Option<K::Target>> {
        if (self.empty)(value) {
            return match self.fallback.produce() {
                Some(outcome) => outcome.map(Some),
                None => Validation::Success(None),
            };
        }

        if self.options.incorrect_type_to_undefined && !self.kind.matches(value) {
            return Validation::Success(None);
        }

        // Matches on the reason code alone, whichever stage produced it.
        match next(value) {
            Validation::Failure(issues)
                if issues.is_single(&Reason::NoConversion) && !self.options.strict_parsing =>
            {
                Validation::Success(None)
            }
            outcome => outcome.map(Some),
        }
    }
}

/// Strict type gate: the value must already be of the target type.
pub struct Is<K: Kind> {
    kind: Arc<K>,
}

impl<K: Kind> Is<K> {
    pub fn new(kind: Arc<K>) -> Self {
        Self { kind }
    }
}

impl<'v, K: Kind> Stage<&'v Value, K::Target, K::Target> for Is<K> {
    type Output = K::Target;

    fn apply(&self, value: &'v Value, next: Next<'_, K::Target, K::Target>) -> Outcome<K::Target> {
        match self.kind.check(value) {
            Some(typed) => next(typed),
            None => Issue::from(value, Reason::IncorrectType, None)
                .with_context("expectedType", json!(self.kind.type_name()))
                .into_outcome(),
        }
    }
}

/// Converter signature captured by [`As`].
pub type ConvertFn<K> = fn(&K, &Value) -> Option<<K as Kind>::Target>;

/// Conversion gate: best-effort transformation into the target type.
pub struct As<K: Kind> {
    kind: Arc<K>,
    convert: ConvertFn<K>,
    fallback: WithDefault<K::Target>,
}

impl<K: Kind> As<K> {
    pub fn new(kind: Arc<K>, convert: ConvertFn<K>, fallback: WithDefault<K::Target>) -> Self {
        Self {
            kind,
            convert,
            fallback,
        }
    }
}

impl<'v, K: Kind> Stage<&'v Value, K::Target, K::Target> for As<K> {
    type Output = K::Target;

    fn apply(&self, value: &'v Value, next: Next<'_, K::Target, K::Target>) -> Outcome<K::Target> {
        match (self.convert)(&self.kind, value) {
            Some(converted) => next(converted),
            None => self.fallback.produce().unwrap_or_else(|| {
                Issue::from(value, Reason::NoConversion, None)
                    .with_context("toType", json!(self.kind.type_name()))
                    .into_outcome()
            }),
        }
    }
}

/// The type-or-conversion gate of a processor.
pub enum Gate<K: Kind> {
    Is(Is<K>),
    As(As<K>),
}

impl<'v, K: Kind> Stage<&'v Value, K::Target, K::Target> for Gate<K> {
    type Output = K::Target;

    fn apply(&self, value: &'v Value, next: Next<'_, K::Target, K::Target>) -> Outcome<K::Target> {
        match self {
            Gate::Is(gate) => gate.apply(value, next),
            Gate::As(gate) => gate.apply(value, next),
        }
    }
}

/// Adjusts an already-typed value, e.g. clamping into bounds.
pub struct Coerce<K: Kind> {
    kind: Arc<K>,
    options: Arc<K::Options>,
}

impl<K: Kind> Coerce<K> {
    pub fn new(kind: Arc<K>, options: Arc<K::Options>) -> Self {
        Self { kind, options }
    }
}

impl<K: Kind> Stage<K::Target, K::Target, K::Target> for Coerce<K> {
    type Output = K::Target;

    fn apply(&self, value: K::Target, next: Next<'_, K::Target, K::Target>) -> Outcome<K::Target> {
        self.kind.coerce(value, &self.options, next)
    }
}

/// Domain validation; the innermost stage.
pub struct Validate<K: Kind> {
    kind: Arc<K>,
    options: Arc<K::Options>,
}

impl<K: Kind> Validate<K> {
    pub fn new(kind: Arc<K>, options: Arc<K::Options>) -> Self {
        Self { kind, options }
    }

    /// Accepts the value unchanged or rejects it with the kind's issues.
    pub fn apply(&self, value: K::Target) -> Outcome<K::Target> {
        match self.kind.validate(&value, &self.options) {
            Some(issues) => Validation::Failure(issues),
            None => Validation::Success(value),
        }
    }
}
