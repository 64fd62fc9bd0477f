//! Field paths for addressing values inside a resume.
//!
//! This module provides [`FieldPath`] and [`PathSegment`]. A path renders with
//! the dotted convention used across the crate: fields are joined with `.` and
//! array positions are written as `[n]`, e.g. `basics.email` or
//! `work[2].startDate`. Error maps, catalogs and forms all key on this string.

use std::fmt::{self, Display};
use std::str::FromStr;

/// A segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field (e.g., `basics`, `startDate`)
    Field(String),
    /// An array position (e.g., `[0]`)
    Index(usize),
}

/// Error returned when a string does not follow the dotted path convention.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldPathError {
    /// A field name between separators was empty (`a..b`, `.a`, `a.`).
    #[error("empty field name in path '{0}'")]
    EmptySegment(String),

    /// An index segment was not terminated or not numeric (`a[x]`, `a[1`).
    #[error("malformed index in path '{0}'")]
    BadIndex(String),
}

/// A path to a value inside a validated object.
///
/// # Example
///
/// ```rust
/// use vitae::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("work")
///     .push_index(2)
///     .push_field("startDate");
///
/// assert_eq!(path.to_string(), "work[2].startDate");
/// assert_eq!("work[2].startDate".parse::<FieldPath>().unwrap(), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the validated object itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns a new path with every segment of `other` appended.
    pub fn join(&self, other: &FieldPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
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

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the first field name, which is the key a form groups by.
    pub fn top_level(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
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

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut path = FieldPath::root();
        if s.is_empty() {
            return Ok(path);
        }

        for part in s.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };
            // An index may only follow a field, or open the path itself.
            if name.is_empty() && !(path.is_root() && !rest.is_empty()) {
                return Err(FieldPathError::EmptySegment(s.to_string()));
            }
            if !name.is_empty() {
                path = path.push_field(name);
            }
            while !rest.is_empty() {
                let close = rest
                    .find(']')
                    .ok_or_else(|| FieldPathError::BadIndex(s.to_string()))?;
                let index = rest
                    .get(1..close)
                    .and_then(|digits| digits.parse::<usize>().ok())
                    .filter(|_| rest.starts_with('['))
                    .ok_or_else(|| FieldPathError::BadIndex(s.to_string()))?;
                path = path.push_index(index);
                rest = &rest[close + 1..];
            }
        }

        Ok(path)
    }
}

impl From<&str> for FieldPath {
    /// Treats the whole string as one field name; use `parse` for dotted paths.
    fn from(name: &str) -> Self {
        FieldPath::from_field(name)
    }
}
