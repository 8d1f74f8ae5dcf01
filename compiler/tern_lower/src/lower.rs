//! Expression lowering driver.
//!
//! `Lowerer` walks the syntax arena and fills a `TargetArena`:
//! - literals and identifiers map one to one
//! - membership operators go through the [`SpecializingTranslator`]
//! - other binary operators and explicit calls that resolution bound to a
//!   callable go through generic call lowering
//! - unresolved arithmetic and comparison operators map to primitive
//!   target operators

use tern_descriptors::{BindingContext, CallableDescriptor, ResolvedCall};
use tern_ir::{BinaryOp, ExprArena, ExprId, ExprKind, Span};

use crate::translate::lower_resolved_call;
use crate::{
    ExpressionTranslator, GenericCallLowering, LowerOptions, LoweredReceivers, SpecializationTable,
    SpecializingTranslator, TargetArena, TargetBinOp, TargetExpr, TargetId, TranslationContext,
};

/// Output of lowering one root expression.
#[derive(Clone, Debug)]
pub struct Lowered {
    pub arena: TargetArena,
    pub root: TargetId,
}

/// Lower `root` with the standard specialization table.
pub fn lower(
    exprs: &ExprArena,
    bindings: &BindingContext,
    root: ExprId,
    options: LowerOptions,
) -> Lowered {
    let mut lowerer = Lowerer::new(exprs, bindings, SpecializationTable::standard(), options);
    let root = lowerer.translate(root);
    lowerer.finish(root)
}

/// Default translation context.
pub struct Lowerer<'a> {
    exprs: &'a ExprArena,
    bindings: &'a BindingContext,
    specializer: SpecializingTranslator<'a>,
    target: TargetArena,
}

impl<'a> Lowerer<'a> {
    pub fn new(
        exprs: &'a ExprArena,
        bindings: &'a BindingContext,
        table: &'a SpecializationTable,
        options: LowerOptions,
    ) -> Self {
        Lowerer {
            exprs,
            bindings,
            specializer: SpecializingTranslator::new(exprs, bindings, table, options),
            target: TargetArena::new(),
        }
    }

    /// Consume the lowerer, keeping everything allocated so far.
    pub fn finish(self, root: TargetId) -> Lowered {
        Lowered {
            arena: self.target,
            root,
        }
    }

    fn lower_binary(
        &mut self,
        site: ExprId,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    ) -> TargetId {
        if op.is_membership() {
            let specializer = self.specializer;
            return specializer.translate_operation(self, site);
        }
        let bindings = self.bindings;
        if let Some(call) = bindings.resolved_call(site) {
            return lower_resolved_call(self, call);
        }
        let Some(target_op) = primitive_op(op) else {
            panic!(
                "internal compiler error: operator `{op}` at {} was never resolved",
                self.span(site)
            );
        };
        let left = self.translate(left);
        let right = self.translate(right);
        self.target.binary(target_op, left, right)
    }
}

fn primitive_op(op: BinaryOp) -> Option<TargetBinOp> {
    Some(match op {
        BinaryOp::Add => TargetBinOp::Add,
        BinaryOp::Sub => TargetBinOp::Sub,
        BinaryOp::Mul => TargetBinOp::Mul,
        BinaryOp::Eq => TargetBinOp::Eq,
        BinaryOp::NotEq => TargetBinOp::NotEq,
        BinaryOp::Lt => TargetBinOp::Lt,
        BinaryOp::LtEq => TargetBinOp::LtEq,
        BinaryOp::Gt => TargetBinOp::Gt,
        BinaryOp::GtEq => TargetBinOp::GtEq,
        BinaryOp::And => TargetBinOp::And,
        BinaryOp::Or => TargetBinOp::Or,
        BinaryOp::RangeTo | BinaryOp::In | BinaryOp::NotIn => return None,
    })
}

impl ExpressionTranslator for Lowerer<'_> {
    #[tracing::instrument(level = "trace", skip(self))]
    fn translate(&mut self, expr: ExprId) -> TargetId {
        let exprs = self.exprs;
        match exprs.expr_kind(expr) {
            ExprKind::Int(value) => self.target.alloc(TargetExpr::Int(*value)),
            ExprKind::Char(value) => self.target.alloc(TargetExpr::Char(*value)),
            ExprKind::Bool(value) => self.target.alloc(TargetExpr::Bool(*value)),
            ExprKind::Ident(name) => self.target.alloc(TargetExpr::Ident(name.clone())),
            ExprKind::Not(operand) => {
                let operand = self.translate(*operand);
                self.target.not(operand)
            }
            ExprKind::Binary { op, left, right } => self.lower_binary(expr, *op, *left, *right),
            ExprKind::Call { .. } => {
                let bindings = self.bindings;
                let call = bindings.resolved_call_with_assert(expr);
                lower_resolved_call(self, call)
            }
        }
    }
}

impl GenericCallLowering for Lowerer<'_> {
    fn lower_call(
        &mut self,
        call: &ResolvedCall,
        receivers: LoweredReceivers,
        args: &[TargetId],
    ) -> TargetId {
        let mut all_args = Vec::with_capacity(args.len() + 1);
        all_args.extend(receivers.extension);
        all_args.extend_from_slice(args);
        let args = self.target.alloc_list(&all_args);

        let callee = call.resulting_descriptor();
        if let CallableDescriptor::Constructor(ctor) = callee {
            return self.target.alloc(TargetExpr::New {
                class: ctor.constructed_class.clone(),
                args,
            });
        }
        self.target.alloc(TargetExpr::Call {
            callee: callee.clone(),
            receiver: receivers.dispatch,
            args,
        })
    }
}

impl TranslationContext for Lowerer<'_> {
    fn target(&mut self) -> &mut TargetArena {
        &mut self.target
    }

    fn span(&self, expr: ExprId) -> Span {
        self.exprs.expr_span(expr)
    }
}
