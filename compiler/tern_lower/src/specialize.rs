//! Specializing translation of membership tests.
//!
//! `x in a..b` resolves to `IntRange.contains` called on the result of
//! `Int.rangeTo`. When both calls are the well-known library functions the
//! whole operation is lowered to two primitive comparisons instead of a
//! range allocation plus a call:
//!
//! ```text
//! x in a..b        ──▶  x >= a && x <= b
//! x in a until b   ──▶  x >= a && x < b
//! x !in a..b       ──▶  !(x >= a && x <= b)
//! ```
//!
//! # Matching
//!
//! Specializations are tried in table order. A specialization applies only
//! when its full structural precondition holds: the operation resolves to
//! its `contains` function, the syntactic right operand is itself a resolved
//! call to its range constructor, and the constructor's lower bound sits in
//! the expected receiver slot. Any shape mismatch falls through to the next
//! entry and finally to the generic call path. The one exception is a
//! matched constructor call without an upper-bound argument expression,
//! which means resolution broke its contract and is an internal error.
//!
//! # Evaluation Order
//!
//! The specialized form evaluates operands in the same order as the generic
//! call (lower bound, upper bound, tested value). When any operand has side
//! effects, every operand other than a literal is bound to a temporary in
//! that order first, so short-circuiting never skips or repeats a side
//! effect and no variable read moves past one.

use std::sync::OnceLock;

use tern_descriptors::{BindingContext, ResolvedCall, ValueArgument};
use tern_ir::{BinaryOp, ExprArena, ExprId, ExprKind, FqName};
use tern_patterns::{DescriptorPredicate, PatternBuilder};
use tern_resolve::ClassResolver;

use crate::translate::lower_resolved_call;
use crate::{LowerOptions, TargetArena, TargetExpr, TargetId, TranslationContext};

/// Which receiver slot of the range constructor holds the lower bound.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoundReceiver {
    /// `a.rangeTo(b)`: member function, bound in the dispatch receiver.
    Dispatch,
    /// `a until b`: extension function, bound in the extension receiver.
    Extension,
}

/// Whether the range includes its upper bound.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UpperBound {
    Inclusive,
    Exclusive,
}

/// One entry of the specialization table.
#[derive(Clone, Debug)]
pub struct Specialization {
    range_class: FqName,
    contains: DescriptorPredicate,
    range_ctor: DescriptorPredicate,
    receiver: BoundReceiver,
    upper: UpperBound,
}

impl Specialization {
    /// Specialize `contains` of `range_class` when the range was built by a
    /// call matching `range_ctor`.
    pub fn membership(
        builder: &PatternBuilder,
        range_class: &str,
        range_ctor: &str,
        receiver: BoundReceiver,
        upper: UpperBound,
    ) -> Self {
        let contains = builder.pattern(&format!("{range_class}.contains"));
        let range_ctor = builder.pattern(range_ctor);
        // The contains pattern's text is the range class plus the member.
        let range_class = FqName::new(contains.text()).parent().unwrap_or_else(FqName::root);
        Specialization {
            range_class,
            contains,
            range_ctor,
            receiver,
            upper,
        }
    }

    /// The range class whose `contains` this entry replaces.
    pub fn range_class(&self) -> &FqName {
        &self.range_class
    }

    pub fn contains(&self) -> &DescriptorPredicate {
        &self.contains
    }

    pub fn range_ctor(&self) -> &DescriptorPredicate {
        &self.range_ctor
    }

    pub fn receiver(&self) -> BoundReceiver {
        self.receiver
    }

    pub fn upper(&self) -> UpperBound {
        self.upper
    }
}

/// Prioritized list of membership specializations.
#[derive(Clone, Debug, Default)]
pub struct SpecializationTable {
    entries: Vec<Specialization>,
}

impl SpecializationTable {
    pub fn new(entries: Vec<Specialization>) -> Self {
        SpecializationTable { entries }
    }

    /// The built-in table, compiled once per process.
    pub fn standard() -> &'static SpecializationTable {
        static STANDARD: OnceLock<SpecializationTable> = OnceLock::new();
        STANDARD.get_or_init(|| Self::standard_in(&PatternBuilder::new()))
    }

    /// The built-in table with every pattern compiled by `builder`, for
    /// libraries that live under a root package.
    pub fn standard_in(builder: &PatternBuilder) -> Self {
        use BoundReceiver::{Dispatch, Extension};
        use UpperBound::{Exclusive, Inclusive};

        let entry = |range, ctor, receiver, upper| {
            Specialization::membership(builder, range, ctor, receiver, upper)
        };
        Self::new(vec![
            entry("ranges.IntRange", "Int.rangeTo", Dispatch, Inclusive),
            entry("ranges.IntRange", "ranges.until", Extension, Exclusive),
            entry("ranges.LongRange", "Long.rangeTo", Dispatch, Inclusive),
            entry("ranges.CharRange", "Char.rangeTo", Dispatch, Inclusive),
        ])
    }

    /// Only the entries whose range class resolves through `resolver`.
    pub fn available_in<R: ClassResolver + ?Sized>(&self, resolver: &R) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|entry| {
                let available = resolver.resolve_class(&entry.range_class).is_some();
                if !available {
                    tracing::trace!(
                        range_class = %entry.range_class,
                        "range class unavailable, dropping specialization"
                    );
                }
                available
            })
            .cloned()
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[Specialization] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Operands of a confirmed range construction.
#[derive(Copy, Clone, Debug)]
struct RangeBounds {
    lower: ExprId,
    upper: ExprId,
}

/// Lowers membership operations, preferring specialized comparisons.
#[derive(Copy, Clone)]
pub struct SpecializingTranslator<'a> {
    exprs: &'a ExprArena,
    bindings: &'a BindingContext,
    table: &'a SpecializationTable,
    options: LowerOptions,
}

impl<'a> SpecializingTranslator<'a> {
    pub fn new(
        exprs: &'a ExprArena,
        bindings: &'a BindingContext,
        table: &'a SpecializationTable,
        options: LowerOptions,
    ) -> Self {
        SpecializingTranslator {
            exprs,
            bindings,
            table,
            options,
        }
    }

    /// Lower the membership operation at `site`.
    ///
    /// # Panics
    /// Panics if `site` is not a membership operation, was not resolved to
    /// a function, or matched a specialization whose range constructor has
    /// no upper-bound argument.
    #[tracing::instrument(level = "trace", skip_all, fields(site = ?site))]
    pub fn translate_operation<C>(&self, ctx: &mut C, site: ExprId) -> TargetId
    where
        C: TranslationContext + ?Sized,
    {
        let (negated, left, right) = match self.exprs.expr_kind(site) {
            ExprKind::Binary { op, left, right } if op.is_membership() => {
                (*op == BinaryOp::NotIn, *left, *right)
            }
            other => panic!(
                "internal compiler error: {other:?} at {} is not a membership operation",
                self.exprs.expr_span(site)
            ),
        };
        let call = self.bindings.function_resolved_call_with_assert(site);
        let test = self.translate_in(ctx, call, left, right);
        if negated {
            ctx.target().not(test)
        } else {
            test
        }
    }

    /// Lower `left in right`, already resolved to `call`.
    pub fn translate_in<C>(
        &self,
        ctx: &mut C,
        call: &ResolvedCall,
        left: ExprId,
        right: ExprId,
    ) -> TargetId
    where
        C: TranslationContext + ?Sized,
    {
        if self.options.specialize {
            for entry in &self.table.entries {
                if !entry.contains.apply_callable(call.resulting_descriptor()) {
                    continue;
                }
                if let Some(bounds) = self.match_range(entry, right) {
                    tracing::debug!(
                        site = ?call.call_site(),
                        contains = %entry.contains,
                        range_ctor = %entry.range_ctor,
                        "specialized membership test"
                    );
                    return emit_bounds_test(ctx, entry.upper, bounds, left);
                }
                tracing::trace!(
                    range_ctor = %entry.range_ctor,
                    "range operand shape does not match, falling through"
                );
            }
        }
        tracing::debug!(
            site = ?call.call_site(),
            callee = %call.resulting_descriptor(),
            "membership test through generic call"
        );
        lower_resolved_call(ctx, call)
    }

    /// Confirm that `range` was built by `entry`'s range constructor.
    fn match_range(&self, entry: &Specialization, range: ExprId) -> Option<RangeBounds> {
        let nested = self.bindings.resolved_call(range)?;
        let function = nested.resulting_descriptor().as_function()?;
        if !entry.range_ctor.apply_function(function) {
            return None;
        }
        let receiver = match entry.receiver {
            BoundReceiver::Dispatch => nested.dispatch_receiver(),
            BoundReceiver::Extension => nested.extension_receiver(),
        };
        let lower = receiver.expression()?;
        let upper = match nested.value_arguments().first() {
            Some(ValueArgument::Expression(expr)) => *expr,
            other => panic!(
                "internal compiler error: range `{}` at {} has no upper bound ({other:?})",
                nested.resulting_descriptor(),
                self.exprs.expr_span(range)
            ),
        };
        Some(RangeBounds { lower, upper })
    }
}

/// Emit `value >= lower && value <= upper` (`<` when exclusive).
fn emit_bounds_test<C>(
    ctx: &mut C,
    upper_kind: UpperBound,
    bounds: RangeBounds,
    left: ExprId,
) -> TargetId
where
    C: TranslationContext + ?Sized,
{
    let operands = [
        ctx.translate(bounds.lower),
        ctx.translate(bounds.upper),
        ctx.translate(left),
    ];
    let target = ctx.target();
    let mut effects = Vec::new();
    let [lower, upper, value] = bind_in_order(target, operands, &mut effects);

    let above = target.greater_than_eq(value, lower);
    let below = match upper_kind {
        UpperBound::Inclusive => target.less_than_eq(value, upper),
        UpperBound::Exclusive => target.less_than(value, upper),
    };
    let test = target.and(above, below);
    target.sequence(&effects, test)
}

/// Make every operand safe to evaluate any number of times while keeping
/// the order in which the operands were written, recording bindings in
/// `effects`.
///
/// Pure operands are returned as-is. Once any operand needs a temporary,
/// every operand that is not a literal or temporary gets one too: a variable
/// read must not move past a later operand's side effect.
fn bind_in_order<const N: usize>(
    target: &mut TargetArena,
    operands: [TargetId; N],
    effects: &mut Vec<TargetId>,
) -> [TargetId; N] {
    let pure = operands
        .iter()
        .all(|&id| target.get(id).is_trivially_duplicable());
    if pure {
        return operands;
    }
    operands.map(|id| {
        if target.get(id).is_stable() {
            return id;
        }
        let temp = target.fresh_temp();
        effects.push(target.alloc(TargetExpr::Assign { temp, value: id }));
        target.alloc(TargetExpr::Temp(temp))
    })
}
