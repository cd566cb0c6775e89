//! The outcome model: issues, reason codes, and the [`Outcome`] alias.
//!
//! Validation failures are data. A processor never panics on bad input; it
//! returns `Validation::Failure` holding one or more [`Issue`]s.

mod issues;
mod reason;

pub use issues::{Issue, Issues};
pub use reason::Reason;

use stillwater::Validation;

/// The result of processing a value: the typed value or the issues found.
pub type Outcome<T> = Validation<T, Issues>;

/// Returns true if the outcome carries issues.
pub fn is_issue<T>(outcome: &Outcome<T>) -> bool {
    outcome.is_failure()
}
