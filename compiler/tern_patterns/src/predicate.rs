//! Compiled descriptor predicates.

use std::fmt;

use tern_descriptors::{CallableDescriptor, Descriptor, FunctionDescriptor, TypeRef, ValueParameter};
use tern_ir::FqName;

use crate::parse::{self, Alternatives};
use crate::PatternError;

/// Constraint on a function's declared value parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParamConstraint {
    /// No constraint.
    Any,
    /// Exactly this many parameters.
    Arity(usize),
    /// Exactly these parameter types, in order.
    Types(Vec<TypeRef>),
}

impl ParamConstraint {
    fn accepts(&self, params: &[ValueParameter]) -> bool {
        match self {
            ParamConstraint::Any => true,
            ParamConstraint::Arity(n) => params.len() == *n,
            ParamConstraint::Types(types) => {
                params.len() == types.len() && params.iter().zip(types).all(|(p, t)| p.ty == *t)
            }
        }
    }
}

/// A compiled pattern over function signatures.
///
/// Built once from pattern text, then applied any number of times. `apply`
/// is referentially transparent, so callers may try several predicates in
/// any order.
#[derive(Clone)]
pub struct DescriptorPredicate {
    text: Box<str>,
    owner: Vec<Alternatives>,
    member: Alternatives,
    params: ParamConstraint,
}

impl DescriptorPredicate {
    /// Compile pattern text.
    pub fn try_compile(text: &str) -> Result<Self, PatternError> {
        let parsed = parse::parse(text)?;
        Ok(DescriptorPredicate {
            text: text.into(),
            owner: parsed.owner,
            member: parsed.member,
            params: parsed.params,
        })
    }

    /// Compile pattern text that is a compile-time constant.
    ///
    /// # Panics
    /// Panics on malformed text. Use `try_compile` for text that is not a
    /// constant.
    pub fn compile(text: &str) -> Self {
        Self::try_compile(text).unwrap_or_else(|e| panic!("malformed descriptor pattern: {e}"))
    }

    /// The source text this predicate was compiled from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn param_constraint(&self) -> &ParamConstraint {
        &self.params
    }

    /// Test any descriptor. Only functions can match.
    pub fn apply(&self, descriptor: &Descriptor) -> bool {
        match descriptor {
            Descriptor::Callable(callable) => self.apply_callable(callable),
            Descriptor::Class(_) => false,
        }
    }

    /// Test a callable. Accessors and constructors never match.
    pub fn apply_callable(&self, callable: &CallableDescriptor) -> bool {
        match callable {
            CallableDescriptor::Function(function) => self.apply_function(function),
            CallableDescriptor::PropertyGetter(_)
            | CallableDescriptor::PropertySetter(_)
            | CallableDescriptor::Constructor(_) => false,
        }
    }

    pub fn apply_function(&self, function: &FunctionDescriptor) -> bool {
        segment_matches(&self.member, function.name.as_str())
            && self.owner_matches(&function.owner)
            && self.params.accepts(&function.value_parameters)
    }

    /// Whether `owner` is exactly the owner path of this pattern.
    pub fn owner_matches(&self, owner: &FqName) -> bool {
        let mut segments = owner.segments();
        for alternatives in &self.owner {
            match segments.next() {
                Some(segment) if segment_matches(alternatives, segment) => {}
                _ => return false,
            }
        }
        segments.next().is_none()
    }
}

fn segment_matches(alternatives: &Alternatives, segment: &str) -> bool {
    alternatives.iter().any(|alt| alt.as_ref() == segment)
}

impl fmt::Debug for DescriptorPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DescriptorPredicate({})", self.text)
    }
}

impl fmt::Display for DescriptorPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
