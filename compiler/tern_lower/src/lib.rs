//! Lowering of resolved operations to target expressions.
//!
//! This crate turns the resolved syntax (`ExprArena` + `BindingContext`) into
//! a `TargetArena`. Most calls are emitted as-is through generic call
//! lowering; membership tests over well-known ranges are specialized into
//! primitive comparisons.
//!
//! # Pipeline Position
//!
//! ```text
//! Parse → Resolve (BindingContext) → **Lower** → backend
//! ```
//!
//! # Configuration
//!
//! - [`LowerOptions`] turns specialization on or off (`TERN_NO_SPECIALIZE`)
//! - [`SpecializationTable`] lists the specializations in priority order;
//!   `available_in` drops entries whose range class does not resolve

mod lower;
mod options;
mod specialize;
mod target;
mod translate;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use lower::{lower, Lowered, Lowerer};
pub use options::{LowerOptions, NO_SPECIALIZE_ENV};
pub use specialize::{
    BoundReceiver, Specialization, SpecializationTable, SpecializingTranslator, UpperBound,
};
pub use target::{
    DisplayTarget, TargetArena, TargetBinOp, TargetExpr, TargetId, TargetRange, TempId,
};
pub use translate::{
    lower_arguments, lower_receiver, lower_resolved_call, ExpressionTranslator,
    GenericCallLowering, LoweredReceivers, TranslationContext,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for lowering diagnostics.
///
/// Call once at the start of compilation. Does nothing unless `RUST_LOG`
/// is set, e.g. `RUST_LOG=tern_lower=debug` to see every specialization
/// decision.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
