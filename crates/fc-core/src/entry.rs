//! Dotted entry paths (`"boundaryField.fixedWalls.type"`).
//!
//! Each segment names one level of nesting. `.` is the reserved separator and
//! there is no escape for it, so a keyword containing a literal dot cannot be
//! addressed.

use crate::error::{CoreError, CoreResult};
use core::fmt;

pub const SEPARATOR: char = '.';

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath(String);

impl EntryPath {
    pub fn parse(text: &str) -> CoreResult<Self> {
        let invalid = |reason| CoreError::InvalidEntryPath {
            path: text.to_string(),
            reason,
        };
        if text.is_empty() {
            return Err(invalid("empty path"));
        }
        if text.split(SEPARATOR).any(str::is_empty) {
            return Err(invalid("empty segment"));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// Split on the first separator: `"a.b.c"` -> `("a", Some("b.c"))`.
    pub fn split_first(&self) -> (&str, Option<&str>) {
        split_first(&self.0)
    }

    /// Path of a direct child, `self + "." + segment`.
    pub fn child(&self, segment: &str) -> CoreResult<Self> {
        if segment.is_empty() || segment.contains(SEPARATOR) {
            return Err(CoreError::InvalidEntryPath {
                path: format!("{}{SEPARATOR}{segment}", self.0),
                reason: "child segment must be a single non-empty keyword",
            });
        }
        Ok(Self(format!("{}{SEPARATOR}{segment}", self.0)))
    }

    pub fn depth(&self) -> usize {
        self.segments().count()
    }
}

/// Split a raw dotted string on its first separator.
pub fn split_first(path: &str) -> (&str, Option<&str>) {
    match path.split_once(SEPARATOR) {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

impl fmt::Debug for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryPath({})", self.0)
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for EntryPath {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
