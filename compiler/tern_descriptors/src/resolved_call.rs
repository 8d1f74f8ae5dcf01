//! The resolved-call record.
//!
//! A `ResolvedCall` is produced once per call site by overload resolution and
//! is immutable afterwards. Arguments are already normalized: named,
//! positional and defaulted arguments have been mapped onto the descriptor's
//! parameter list, so `value_arguments()[i]` belongs to
//! `value_parameters()[i]`.

use tern_ir::ExprId;

use crate::{CallableDescriptor, Receiver, ValueParameter};

/// One entry of the normalized argument list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueArgument {
    /// An argument expression written at the call site.
    Expression(ExprId),
    /// No argument written; the parameter's default value applies.
    Defaulted,
    /// No argument expression could be recovered (parse error recovery).
    Missing,
}

impl ValueArgument {
    pub fn expression(self) -> Option<ExprId> {
        match self {
            ValueArgument::Expression(expr) => Some(expr),
            ValueArgument::Defaulted | ValueArgument::Missing => None,
        }
    }
}

/// The semantic record binding one call-shaped node to its resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedCall {
    call_site: ExprId,
    resulting_descriptor: CallableDescriptor,
    dispatch_receiver: Receiver,
    extension_receiver: Receiver,
    value_arguments: Vec<ValueArgument>,
}

impl ResolvedCall {
    /// Record a resolution.
    ///
    /// # Panics
    /// Panics when the argument list is not parallel to the descriptor's
    /// parameter list, or when a parameter without a default is marked
    /// `Defaulted`. Either means overload resolution broke its contract.
    pub fn new(
        call_site: ExprId,
        resulting_descriptor: CallableDescriptor,
        dispatch_receiver: Receiver,
        extension_receiver: Receiver,
        value_arguments: Vec<ValueArgument>,
    ) -> Self {
        let params = resulting_descriptor.value_parameters();
        if params.len() != value_arguments.len() {
            panic!(
                "internal compiler error: call {call_site:?} binds {} arguments to {} parameters",
                value_arguments.len(),
                params.len()
            );
        }
        for (param, arg) in params.iter().zip(&value_arguments) {
            if *arg == ValueArgument::Defaulted && !param.has_default {
                panic!(
                    "internal compiler error: call {call_site:?} defaults `{}` without a default",
                    param.name
                );
            }
        }
        ResolvedCall {
            call_site,
            resulting_descriptor,
            dispatch_receiver,
            extension_receiver,
            value_arguments,
        }
    }

    /// The syntax node this call resolves.
    pub fn call_site(&self) -> ExprId {
        self.call_site
    }

    /// The selected overload.
    pub fn resulting_descriptor(&self) -> &CallableDescriptor {
        &self.resulting_descriptor
    }

    pub fn dispatch_receiver(&self) -> &Receiver {
        &self.dispatch_receiver
    }

    pub fn extension_receiver(&self) -> &Receiver {
        &self.extension_receiver
    }

    pub fn value_arguments(&self) -> &[ValueArgument] {
        &self.value_arguments
    }

    /// Arguments paired with the parameters they are bound to.
    pub fn arguments_with_parameters(
        &self,
    ) -> impl Iterator<Item = (&ValueParameter, ValueArgument)> {
        self.resulting_descriptor
            .value_parameters()
            .iter()
            .zip(self.value_arguments.iter().copied())
    }
}
