//! Class-level descriptors.

use std::fmt;
use std::sync::Arc;

use tern_ir::FqName;

/// The kind of a class-like declaration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    /// Singleton `object` declaration.
    Object,
    EnumClass,
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Object => "object",
            ClassKind::EnumClass => "enum class",
        })
    }
}

/// Semantic identity of a class, interface or object.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ClassDescriptor {
    /// Fully-qualified name (`ranges.IntRange`).
    pub fq_name: FqName,
    pub kind: ClassKind,
    /// Direct supertypes, by qualified name.
    pub supertypes: Vec<FqName>,
}

impl ClassDescriptor {
    pub fn new(fq_name: FqName, kind: ClassKind, supertypes: Vec<FqName>) -> Self {
        ClassDescriptor {
            fq_name,
            kind,
            supertypes,
        }
    }

    /// The simple name of the class.
    pub fn name(&self) -> &str {
        self.fq_name.short_name()
    }

    /// Whether `other` is the very same descriptor instance.
    pub fn same_declaration(this: &Arc<Self>, other: &Arc<Self>) -> bool {
        Arc::ptr_eq(this, other)
    }
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.fq_name)
    }
}
