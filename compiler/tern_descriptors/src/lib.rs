//! Semantic records produced by resolution.
//!
//! This crate provides:
//! - The descriptor model (`ClassDescriptor`, `FunctionDescriptor`,
//!   `CallableDescriptor`, `Descriptor`), a closed set of tagged variants
//! - The resolved-call model (`ResolvedCall`, `Receiver`, `ValueArgument`)
//! - `BindingContext`, which maps call-shaped syntax nodes to their resolution
//!
//! # Identity
//!
//! Descriptors are created once by resolution and shared behind `Arc`.
//! `PartialEq` on descriptors is structural; "is this the same declaration"
//! is answered by `same_declaration`, which compares identity.
//!
//! # Thread Safety
//!
//! Every type here is immutable after construction and is `Send + Sync`, so
//! worker threads may share them read-only without synchronization.

mod binding;
mod callable;
mod class;
mod descriptor;
mod receiver;
mod resolved_call;

pub use binding::{BindingContext, CallResolution};
pub use callable::{
    CallableDescriptor, ConstructorDescriptor, FunctionDescriptor, PropertyDescriptor, TypeRef,
    ValueParameter,
};
pub use class::{ClassDescriptor, ClassKind};
pub use descriptor::Descriptor;
pub use receiver::Receiver;
pub use resolved_call::{ResolvedCall, ValueArgument};
