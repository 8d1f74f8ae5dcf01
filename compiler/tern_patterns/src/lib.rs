//! Descriptor patterns.
//!
//! A pattern names a member by its owner path and member name:
//!
//! ```text
//! ranges.IntRange.contains        owner `ranges.IntRange`, member `contains`
//! Int|Long.rangeTo                owner `Int` or `Long`, member `rangeTo`
//! ranges.until/1                  exactly one value parameter
//! String.get(Int)                 exactly one parameter, of type `Int`
//! Any.equals(Any?)                nullable parameter type
//! ```
//!
//! Pattern text is compiled once into a [`DescriptorPredicate`] and then
//! applied any number of times. Compilation of a malformed constant is a
//! programmer error and panics; [`DescriptorPredicate::try_compile`] is the
//! fallible form. Matching is pure: exact segment comparison, no I/O, no
//! resolution side effects.

mod builder;
mod parse;
mod predicate;

pub use builder::{pattern, PatternBuilder};
pub use parse::PatternError;
pub use predicate::{DescriptorPredicate, ParamConstraint};
