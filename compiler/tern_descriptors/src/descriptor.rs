//! The top-level descriptor sum type.

use std::fmt;
use std::sync::Arc;

use tern_ir::FqName;

use crate::{CallableDescriptor, ClassDescriptor, FunctionDescriptor};

/// Any resolved declaration.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Descriptor {
    Class(Arc<ClassDescriptor>),
    Callable(CallableDescriptor),
}

impl Descriptor {
    /// Qualified name of the declaration itself.
    pub fn fq_name(&self) -> FqName {
        match self {
            Descriptor::Class(class) => class.fq_name.clone(),
            Descriptor::Callable(callable) => callable
                .owner()
                .child(&tern_ir::Name::new(callable.name())),
        }
    }

    pub fn as_callable(&self) -> Option<&CallableDescriptor> {
        match self {
            Descriptor::Callable(callable) => Some(callable),
            Descriptor::Class(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&Arc<FunctionDescriptor>> {
        self.as_callable().and_then(CallableDescriptor::as_function)
    }

    /// Identity comparison across the whole variant set.
    pub fn same_declaration(&self, other: &Descriptor) -> bool {
        match (self, other) {
            (Descriptor::Class(a), Descriptor::Class(b)) => ClassDescriptor::same_declaration(a, b),
            (Descriptor::Callable(a), Descriptor::Callable(b)) => a.same_declaration(b),
            _ => false,
        }
    }
}

impl From<Arc<ClassDescriptor>> for Descriptor {
    fn from(class: Arc<ClassDescriptor>) -> Self {
        Descriptor::Class(class)
    }
}

impl From<CallableDescriptor> for Descriptor {
    fn from(callable: CallableDescriptor) -> Self {
        Descriptor::Callable(callable)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Class(class) => class.fmt(f),
            Descriptor::Callable(callable) => callable.fmt(f),
        }
    }
}
