//! Tern IR - shared vocabulary for the resolution and lowering core.
//!
//! This crate contains the small value types every other crate speaks:
//! - Spans for source locations
//! - `Name` and `FqName` for simple and fully-qualified identifiers
//! - `ExprId` / `ExprRange` handles into the expression arena
//! - The expression arena itself (the syntax handed over by the parser)
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: No `Box<Expr>`, use `ExprId(u32)` indices
//! - **Immutable Names**: `Name` and `FqName` are cheap to clone and safe to
//!   share across worker threads without synchronization

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod expr_id;
mod name;
mod span;

pub use ast::{BinaryOp, Expr, ExprArena, ExprKind};
pub use expr_id::{ExprId, ExprRange};
pub use name::{FqName, FqNameError, Name};
pub use span::Span;
