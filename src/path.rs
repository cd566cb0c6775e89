//! Structural locations of issues inside composite values.
//!
//! This module provides [`IssuePath`] and [`PathSegment`]. Paths are built
//! outward-in: a leaf processor reports issues at the empty path, and each
//! structural processor prepends the index or key of the element it visited
//! as the issue travels back up.

use std::collections::VecDeque;
use std::fmt::{self, Display};

/// A segment of an issue path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object field (e.g., `user`, `email`)
    Key(String),
    /// An array position (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Key(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Key(name)
    }
}

/// The position of an issue relative to the value handed to the outermost processor.
///
/// # Example
///
/// ```rust
/// use vetted::IssuePath;
///
/// // A leaf issue starts at the root and gains segments on the way out.
/// let path = IssuePath::root()
///     .prepend_key("email")
///     .prepend_index(0)
///     .prepend_key("users");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IssuePath {
    segments: VecDeque<PathSegment>,
}

impl IssuePath {
    /// Creates an empty path representing the top-level value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from segments listed root first.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns this path with an index segment placed in front.
    pub fn prepend_index(mut self, index: usize) -> Self {
        self.segments.push_front(PathSegment::Index(index));
        self
    }

    /// Returns this path with a key segment placed in front.
    pub fn prepend_key(mut self, key: impl Into<String>) -> Self {
        self.segments.push_front(PathSegment::Key(key.into()));
        self
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the innermost segment, or None at the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.back()
    }
}

impl Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
