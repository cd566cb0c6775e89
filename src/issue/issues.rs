//! Issue types.
//!
//! This module provides [`Issue`] for a single rejected value and [`Issues`]
//! for the non-empty collection a failed outcome carries.

use std::fmt::{self, Display};

use serde_json::{Map, Value};
use stillwater::prelude::*;

use super::Reason;
use crate::path::IssuePath;

/// A single structured validation failure.
///
/// - **path**: where the value sits inside the composite input
/// - **reason**: machine-readable code
/// - **value**: the offending input as received
/// - **context**: reason-specific detail such as `expectedType` or the bound applied
///
/// # Example
///
/// ```rust
/// use vetted::{Issue, Reason};
/// use serde_json::json;
///
/// let issue = Issue::from(&json!(3), Reason::Min, None).with_context("min", json!(25));
///
/// assert!(issue.path.is_root());
/// assert_eq!(issue.reason, "min");
/// assert_eq!(issue.context_value("min"), Some(&json!(25)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Location of the value that failed.
    pub path: IssuePath,
    /// Machine-readable reason code.
    pub reason: Reason,
    /// The offending value.
    pub value: Value,
    /// Structured detail about the failure.
    pub context: Option<Map<String, Value>>,
}

impl Issue {
    /// Creates an issue at the root path.
    ///
    /// Path qualification is left to structural processors.
    pub fn from(value: &Value, reason: Reason, context: Option<Map<String, Value>>) -> Self {
        Self {
            path: IssuePath::root(),
            reason,
            value: value.clone(),
            context,
        }
    }

    /// Adds one context entry and returns self for chaining.
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Looks up a context entry.
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.context.as_ref().and_then(|c| c.get(key))
    }

    /// Wraps this issue into a failed outcome.
    pub fn into_outcome<T>(self) -> Validation<T, Issues> {
        Validation::Failure(Issues::single(self))
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.reason)?;
        } else {
            write!(f, "{}: {}", self.path, self.reason)?;
        }
        if let Some(ref context) = self.context {
            write!(f, " {}", Value::Object(context.clone()))?;
        }
        Ok(())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// A non-empty collection of issues.
///
/// Wrapping `NonEmptyVec` means a failed outcome can never hold zero issues.
///
/// ```rust
/// use vetted::{Issue, Issues, Reason};
/// use serde_json::json;
/// use stillwater::prelude::*;
///
/// let a = Issues::single(Issue::from(&json!(null), Reason::NotDefined, None));
/// let b = Issues::single(Issue::from(&json!(1), Reason::IncorrectType, None));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    /// Creates a collection containing a single issue.
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Creates a collection from a `NonEmptyVec`.
    pub fn from_non_empty(issues: NonEmptyVec<Issue>) -> Self {
        Self(issues)
    }

    /// Creates a collection from a `Vec`, or `None` when it is empty.
    pub fn try_from_vec(issues: Vec<Issue>) -> Option<Self> {
        NonEmptyVec::from_vec(issues).map(Self)
    }

    /// Creates a collection from a `Vec<Issue>`.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Self {
        Self(NonEmptyVec::from_vec(issues).expect("Issues requires at least one issue"))
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the issues.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Returns the first issue.
    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// Returns all issues at the given path.
    pub fn at_path(&self, path: &IssuePath) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    /// Returns all issues with the given reason code.
    pub fn with_reason(&self, reason: &str) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.reason == reason).collect()
    }

    /// True when this is exactly one issue with the given reason.
    pub fn is_single(&self, reason: &Reason) -> bool {
        self.len() == 1 && &self.first().reason == reason
    }

    /// Prepends an array index to every issue's path.
    pub fn prepend_index(self, index: usize) -> Self {
        self.map_paths(|path| path.prepend_index(index))
    }

    /// Prepends an object key to every issue's path.
    pub fn prepend_key(self, key: &str) -> Self {
        self.map_paths(|path| path.prepend_key(key))
    }

    fn map_paths<F>(self, f: F) -> Self
    where
        F: Fn(IssuePath) -> IssuePath,
    {
        Self(self.0.map(|mut issue| {
            issue.path = f(std::mem::take(&mut issue.path));
            issue
        }))
    }

    /// Converts this collection into a `Vec<Issue>`.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<Issue> {
        &self.0
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
