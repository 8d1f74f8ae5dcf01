//! Simple and fully-qualified identifiers.
//!
//! `Name` is a single identifier segment; `FqName` is a dot-separated path
//! that uniquely identifies a declaration within the symbol universe
//! (`ranges.IntRange`, `com.example.Foo`). Both are backed by `Arc<str>` so
//! clones are a reference-count bump and values can be shared read-only
//! across worker threads.

use std::fmt;
use std::sync::Arc;

/// A single identifier segment (`contains`, `IntRange`).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Name(Arc<str>);

impl Name {
    /// Create a name from its text.
    pub fn new(text: &str) -> Self {
        Name(Arc::from(text))
    }

    /// The identifier text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name::new(text)
    }
}

/// Error when parsing a fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FqNameError {
    /// A segment between two dots (or at either end) is empty.
    #[error("empty segment at byte {position} in qualified name `{text}`")]
    EmptySegment { text: String, position: usize },
    /// A segment contains a character that cannot appear in an identifier.
    #[error("invalid character {ch:?} in qualified name `{text}`")]
    InvalidChar { text: String, ch: char },
}

/// Fully-qualified name: a dot-separated path of identifier segments.
///
/// The root name (no segments) is the empty string and is the parent of
/// every single-segment name.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FqName(Arc<str>);

impl FqName {
    /// The root of the name hierarchy.
    pub fn root() -> Self {
        FqName(Arc::from(""))
    }

    /// Parse a qualified name, validating every segment.
    ///
    /// The empty string parses to the root name.
    pub fn parse(text: &str) -> Result<Self, FqNameError> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        let mut position = 0;
        for segment in text.split('.') {
            if segment.is_empty() {
                return Err(FqNameError::EmptySegment {
                    text: text.to_owned(),
                    position,
                });
            }
            if let Some(ch) = segment.chars().find(|&c| !is_identifier_char(c)) {
                return Err(FqNameError::InvalidChar {
                    text: text.to_owned(),
                    ch,
                });
            }
            position += segment.len() + 1;
        }
        Ok(FqName(Arc::from(text)))
    }

    /// Create a qualified name from text known to be well-formed.
    ///
    /// # Panics
    /// Panics if `text` is malformed. Use `parse` for untrusted input.
    pub fn new(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Build a name from already-validated segments.
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Self {
        let joined = segments.into_iter().collect::<Vec<_>>().join(".");
        FqName(Arc::from(joined.as_str()))
    }

    /// Whether this is the root name.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The full dotted text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the segments from outermost to innermost.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// Number of segments (zero for the root).
    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// The enclosing name, or `None` for the root.
    pub fn parent(&self) -> Option<FqName> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rfind('.') {
            Some(dot) => FqName(Arc::from(&self.0[..dot])),
            None => Self::root(),
        })
    }

    /// The innermost segment (empty for the root).
    pub fn short_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(dot) => &self.0[dot + 1..],
            None => &self.0,
        }
    }

    /// Append a segment.
    #[must_use]
    pub fn child(&self, name: &Name) -> FqName {
        if self.is_root() {
            FqName(Arc::from(name.as_str()))
        } else {
            FqName(Arc::from(format!("{}.{}", self.0, name).as_str()))
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

impl fmt::Debug for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FqName({})", self.0)
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

#[cfg(test)]
mod tests;
