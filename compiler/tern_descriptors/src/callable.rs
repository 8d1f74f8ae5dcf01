//! Callable descriptors: functions, property accessors and constructors.
//!
//! `CallableDescriptor` is the closed sum over everything a call-shaped
//! expression can resolve to. Every `FunctionDescriptor` is reachable as
//! `CallableDescriptor::Function`; code that inspects callables matches the
//! variant set exhaustively instead of probing for concrete types.

use std::fmt;
use std::sync::Arc;

use tern_ir::{FqName, Name};

/// Reference to a type by qualified name.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeRef {
    pub fq_name: FqName,
    pub nullable: bool,
}

impl TypeRef {
    /// Non-nullable reference to the named type.
    pub fn named(fq_name: &str) -> Self {
        TypeRef {
            fq_name: FqName::new(fq_name),
            nullable: false,
        }
    }

    /// The nullable variant of this type.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unit() -> Self {
        Self::named("Unit")
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fq_name)?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// A declared value parameter.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ValueParameter {
    pub name: Name,
    pub ty: TypeRef,
    /// Whether the declaration supplies a default value.
    pub has_default: bool,
}

impl ValueParameter {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        ValueParameter {
            name: Name::new(name),
            ty,
            has_default: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// A function or method declaration.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FunctionDescriptor {
    /// Containing class or package (`ranges.IntRange`, `ranges`).
    pub owner: FqName,
    pub name: Name,
    pub value_parameters: Vec<ValueParameter>,
    pub return_type: TypeRef,
    /// Receiver parameter of an extension function (`Int.until`).
    pub extension_receiver: Option<TypeRef>,
}

impl FunctionDescriptor {
    pub fn new(
        owner: FqName,
        name: &str,
        value_parameters: Vec<ValueParameter>,
        return_type: TypeRef,
    ) -> Self {
        FunctionDescriptor {
            owner,
            name: Name::new(name),
            value_parameters,
            return_type,
            extension_receiver: None,
        }
    }

    /// Turn this into an extension on `receiver`.
    #[must_use]
    pub fn with_extension_receiver(mut self, receiver: TypeRef) -> Self {
        self.extension_receiver = Some(receiver);
        self
    }

    pub fn has_receiver_parameter(&self) -> bool {
        self.extension_receiver.is_some()
    }

    /// Qualified name of the function itself (`ranges.IntRange.contains`).
    pub fn fq_name(&self) -> FqName {
        self.owner.child(&self.name)
    }
}

/// A property whose accessors are callable.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PropertyDescriptor {
    pub owner: FqName,
    pub name: Name,
    pub ty: TypeRef,
    pub is_var: bool,
    /// The implicit `value` parameter of the setter.
    setter_parameter: ValueParameter,
}

impl PropertyDescriptor {
    pub fn new(owner: FqName, name: &str, ty: TypeRef, is_var: bool) -> Self {
        let setter_parameter = ValueParameter::new("value", ty.clone());
        PropertyDescriptor {
            owner,
            name: Name::new(name),
            ty,
            is_var,
            setter_parameter,
        }
    }
}

/// A class constructor.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ConstructorDescriptor {
    pub constructed_class: FqName,
    pub value_parameters: Vec<ValueParameter>,
    pub is_primary: bool,
}

impl ConstructorDescriptor {
    pub fn new(constructed_class: FqName, value_parameters: Vec<ValueParameter>) -> Self {
        ConstructorDescriptor {
            constructed_class,
            value_parameters,
            is_primary: true,
        }
    }
}

/// Anything a call-shaped expression can resolve to.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum CallableDescriptor {
    Function(Arc<FunctionDescriptor>),
    PropertyGetter(Arc<PropertyDescriptor>),
    PropertySetter(Arc<PropertyDescriptor>),
    Constructor(Arc<ConstructorDescriptor>),
}

impl CallableDescriptor {
    /// Containing declaration: class, package, or the constructed class.
    pub fn owner(&self) -> &FqName {
        match self {
            CallableDescriptor::Function(f) => &f.owner,
            CallableDescriptor::PropertyGetter(p) | CallableDescriptor::PropertySetter(p) => {
                &p.owner
            }
            CallableDescriptor::Constructor(c) => &c.constructed_class,
        }
    }

    /// Member name. Constructors are named `<init>`.
    pub fn name(&self) -> &str {
        match self {
            CallableDescriptor::Function(f) => f.name.as_str(),
            CallableDescriptor::PropertyGetter(p) | CallableDescriptor::PropertySetter(p) => {
                p.name.as_str()
            }
            CallableDescriptor::Constructor(_) => "<init>",
        }
    }

    /// Declared value parameters, in declaration order.
    pub fn value_parameters(&self) -> &[ValueParameter] {
        match self {
            CallableDescriptor::Function(f) => &f.value_parameters,
            CallableDescriptor::PropertyGetter(_) => &[],
            CallableDescriptor::PropertySetter(p) => std::slice::from_ref(&p.setter_parameter),
            CallableDescriptor::Constructor(c) => &c.value_parameters,
        }
    }

    pub fn return_type(&self) -> TypeRef {
        match self {
            CallableDescriptor::Function(f) => f.return_type.clone(),
            CallableDescriptor::PropertyGetter(p) => p.ty.clone(),
            CallableDescriptor::PropertySetter(_) => TypeRef::unit(),
            CallableDescriptor::Constructor(c) => TypeRef {
                fq_name: c.constructed_class.clone(),
                nullable: false,
            },
        }
    }

    pub fn has_extension_receiver(&self) -> bool {
        match self {
            CallableDescriptor::Function(f) => f.has_receiver_parameter(),
            CallableDescriptor::PropertyGetter(_)
            | CallableDescriptor::PropertySetter(_)
            | CallableDescriptor::Constructor(_) => false,
        }
    }

    /// Narrow to a function, if this callable is one.
    pub fn as_function(&self) -> Option<&Arc<FunctionDescriptor>> {
        match self {
            CallableDescriptor::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Identity comparison: same variant and same descriptor instance.
    pub fn same_declaration(&self, other: &CallableDescriptor) -> bool {
        match (self, other) {
            (CallableDescriptor::Function(a), CallableDescriptor::Function(b)) => Arc::ptr_eq(a, b),
            (CallableDescriptor::PropertyGetter(a), CallableDescriptor::PropertyGetter(b))
            | (CallableDescriptor::PropertySetter(a), CallableDescriptor::PropertySetter(b)) => {
                Arc::ptr_eq(a, b)
            }
            (CallableDescriptor::Constructor(a), CallableDescriptor::Constructor(b)) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl From<FunctionDescriptor> for CallableDescriptor {
    fn from(function: FunctionDescriptor) -> Self {
        CallableDescriptor::Function(Arc::new(function))
    }
}

impl From<ConstructorDescriptor> for CallableDescriptor {
    fn from(constructor: ConstructorDescriptor) -> Self {
        CallableDescriptor::Constructor(Arc::new(constructor))
    }
}

impl fmt::Display for CallableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.owner().is_root() {
            write!(f, "{}.", self.owner())?;
        }
        write!(f, "{}(", self.name())?;
        for (i, param) in self.value_parameters().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        write!(f, "): {}", self.return_type())
    }
}
