//! Machine-readable reason codes carried by every issue.

use std::fmt::{self, Display};

/// Why a value was rejected.
///
/// The vocabulary is closed for the codes the engine itself emits; kinds that
/// need their own codes use [`Reason::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reason {
    /// A required value was null or missing.
    NotDefined,
    /// The value failed a strict type guard.
    IncorrectType,
    /// The value could not be converted to the target type.
    NoConversion,
    /// Too few characters or elements.
    MinLength,
    /// Too many characters or elements.
    MaxLength,
    /// Below the minimum.
    Min,
    /// Above the maximum.
    Max,
    /// Text did not match the configured pattern.
    Pattern,
    /// A code contributed by a kind outside this crate.
    Custom(String),
}

impl Reason {
    /// Returns the wire code, e.g. `not-defined`.
    pub fn as_str(&self) -> &str {
        match self {
            Reason::NotDefined => "not-defined",
            Reason::IncorrectType => "incorrect-type",
            Reason::NoConversion => "no-conversion",
            Reason::MinLength => "min-length",
            Reason::MaxLength => "max-length",
            Reason::Min => "min",
            Reason::Max => "max",
            Reason::Pattern => "pattern",
            Reason::Custom(code) => code,
        }
    }

    /// Creates a custom reason code.
    pub fn custom(code: impl Into<String>) -> Self {
        Reason::Custom(code.into())
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for Reason {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Reason {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
