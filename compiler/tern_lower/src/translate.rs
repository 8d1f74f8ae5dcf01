//! Translation capabilities.
//!
//! The specializing translator does not own the expression walk or the
//! generic call emission; it reaches both through these traits so that the
//! driver (or a test fake) decides how sub-expressions and plain calls are
//! lowered.

use tern_descriptors::{Receiver, ResolvedCall, ValueArgument};
use tern_ir::{ExprId, Span};

use crate::{TargetArena, TargetExpr, TargetId};

/// Recursively lowers an arbitrary sub-expression.
pub trait ExpressionTranslator {
    fn translate(&mut self, expr: ExprId) -> TargetId;
}

/// Translated receivers of one call.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct LoweredReceivers {
    pub dispatch: Option<TargetId>,
    pub extension: Option<TargetId>,
}

/// The fallback emission path for a resolved call.
pub trait GenericCallLowering {
    /// Emit a direct call of `call`'s resulting descriptor. `args` is
    /// parallel to the descriptor's value parameters.
    fn lower_call(
        &mut self,
        call: &ResolvedCall,
        receivers: LoweredReceivers,
        args: &[TargetId],
    ) -> TargetId;
}

/// Everything a specialization needs from its surroundings.
pub trait TranslationContext: ExpressionTranslator + GenericCallLowering {
    fn target(&mut self) -> &mut TargetArena;

    /// Source span of `expr`, for internal-error messages.
    fn span(&self, expr: ExprId) -> Span;
}

/// Translate every piece of `call` independently and emit it through the
/// generic path.
///
/// Pieces are translated in evaluation order: dispatch receiver, extension
/// receiver, then value arguments.
///
/// # Panics
/// Panics if an argument is `Missing`; resolution must not hand lowering a
/// call it could not complete.
pub fn lower_resolved_call<C>(ctx: &mut C, call: &ResolvedCall) -> TargetId
where
    C: TranslationContext + ?Sized,
{
    let receivers = LoweredReceivers {
        dispatch: lower_receiver(ctx, call.dispatch_receiver()),
        extension: lower_receiver(ctx, call.extension_receiver()),
    };
    let args = lower_arguments(ctx, call);
    ctx.lower_call(call, receivers, &args)
}

/// Translate a receiver slot.
pub fn lower_receiver<C>(ctx: &mut C, receiver: &Receiver) -> Option<TargetId>
where
    C: TranslationContext + ?Sized,
{
    match receiver {
        Receiver::Expression(expr) => Some(ctx.translate(*expr)),
        Receiver::Implicit { class } => Some(ctx.target().alloc(TargetExpr::This(class.clone()))),
        Receiver::None => None,
    }
}

/// Translate the value arguments of `call`, defaulted ones as
/// [`TargetExpr::Default`].
///
/// # Panics
/// Panics if an argument is `Missing`.
pub fn lower_arguments<C>(ctx: &mut C, call: &ResolvedCall) -> Vec<TargetId>
where
    C: TranslationContext + ?Sized,
{
    call.arguments_with_parameters()
        .map(|(param, arg)| match arg {
            ValueArgument::Expression(expr) => ctx.translate(expr),
            ValueArgument::Defaulted => ctx.target().alloc(TargetExpr::Default),
            ValueArgument::Missing => panic!(
                "internal compiler error: argument `{}` of `{}` at {} is missing",
                param.name,
                call.resulting_descriptor(),
                ctx.span(call.call_site())
            ),
        })
        .collect()
}
