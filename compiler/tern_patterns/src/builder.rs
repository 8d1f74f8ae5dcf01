//! Pattern construction helpers.

use crate::DescriptorPredicate;

/// Compile a constant pattern.
///
/// # Panics
/// Panics on malformed text.
pub fn pattern(text: &str) -> DescriptorPredicate {
    DescriptorPredicate::compile(text)
}

/// Compiles patterns relative to a root package.
///
/// `PatternBuilder::rooted("std").pattern("ranges.IntRange.contains")`
/// matches `contains` owned by `std.ranges.IntRange`.
#[derive(Clone, Debug, Default)]
pub struct PatternBuilder {
    root: Option<Box<str>>,
}

impl PatternBuilder {
    /// Builder whose patterns are taken as written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that prefixes every pattern with `root`.
    pub fn rooted(root: &str) -> Self {
        PatternBuilder {
            root: (!root.is_empty()).then(|| root.into()),
        }
    }

    /// Compile `text` under this builder's root.
    ///
    /// # Panics
    /// Panics on malformed text.
    pub fn pattern(&self, text: &str) -> DescriptorPredicate {
        match &self.root {
            Some(root) => DescriptorPredicate::compile(&format!("{root}.{text}")),
            None => DescriptorPredicate::compile(text),
        }
    }
}
