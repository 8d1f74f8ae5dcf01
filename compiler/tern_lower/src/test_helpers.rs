//! Shared test utilities for lowering tests.
//!
//! `Fixture` builds a small resolved program (syntax plus bindings) the way
//! overload resolution would hand it over; `Eval` interprets the lowered
//! target tree so tests can compare observable behavior of specialized and
//! generic output. Only compiled in test builds.

use rustc_hash::FxHashMap;
use tern_descriptors::{
    BindingContext, CallableDescriptor, FunctionDescriptor, Receiver, ResolvedCall, TypeRef,
    ValueArgument, ValueParameter,
};
use tern_ir::{BinaryOp, Expr, ExprArena, ExprId, ExprKind, FqName, Name, Span};

use crate::{TargetArena, TargetBinOp, TargetExpr, TargetId, TempId};

/// Element type of a range, with the names of its library declarations.
#[derive(Copy, Clone, Debug)]
pub(crate) enum RangeKind {
    Int,
    Long,
    Char,
}

impl RangeKind {
    pub(crate) fn element(self) -> &'static str {
        match self {
            RangeKind::Int => "Int",
            RangeKind::Long => "Long",
            RangeKind::Char => "Char",
        }
    }

    pub(crate) fn range_class(self) -> &'static str {
        match self {
            RangeKind::Int => "ranges.IntRange",
            RangeKind::Long => "ranges.LongRange",
            RangeKind::Char => "ranges.CharRange",
        }
    }
}

pub(crate) fn function(
    owner: &str,
    name: &str,
    params: &[(&str, &str)],
    ret: &str,
) -> FunctionDescriptor {
    FunctionDescriptor::new(
        FqName::new(owner),
        name,
        params
            .iter()
            .map(|(name, ty)| ValueParameter::new(name, TypeRef::named(ty)))
            .collect(),
        TypeRef::named(ret),
    )
}

/// `<Range>.contains(value: <Element>): Boolean`
pub(crate) fn contains_fn(kind: RangeKind) -> CallableDescriptor {
    function(kind.range_class(), "contains", &[("value", kind.element())], "Boolean").into()
}

/// `<Element>.rangeTo(other: <Element>): <Range>`
pub(crate) fn range_to_fn(kind: RangeKind) -> CallableDescriptor {
    function(kind.element(), "rangeTo", &[("other", kind.element())], kind.range_class()).into()
}

/// `fun Int.until(to: Int): IntRange` in package `ranges`
pub(crate) fn until_fn() -> CallableDescriptor {
    function("ranges", "until", &[("to", "Int")], "ranges.IntRange")
        .with_extension_receiver(TypeRef::named("Int"))
        .into()
}

/// `test.tick(value: Int): Int` logs its argument and returns it.
pub(crate) fn tick_fn() -> CallableDescriptor {
    function("test", "tick", &[("value", "Int")], "Int").into()
}

/// Builder for resolved syntax.
#[derive(Default)]
pub(crate) struct Fixture {
    pub exprs: ExprArena,
    pub bindings: BindingContext,
    offset: u32,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, kind: ExprKind) -> ExprId {
        let span = Span::new(self.offset, self.offset + 1);
        self.offset += 2;
        self.exprs.alloc_expr(Expr::new(kind, span))
    }

    pub(crate) fn int(&mut self, value: i64) -> ExprId {
        self.alloc(ExprKind::Int(value))
    }

    pub(crate) fn char(&mut self, value: char) -> ExprId {
        self.alloc(ExprKind::Char(value))
    }

    pub(crate) fn ident(&mut self, name: &str) -> ExprId {
        self.alloc(ExprKind::Ident(Name::new(name)))
    }

    /// An unresolved primitive binary operation.
    pub(crate) fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.alloc(ExprKind::Binary { op, left, right })
    }

    /// A free call `callee(args)` resolved to `descriptor`.
    pub(crate) fn call(
        &mut self,
        descriptor: CallableDescriptor,
        args: &[ValueArgument],
    ) -> ExprId {
        let written: Vec<ExprId> = args.iter().filter_map(|arg| arg.expression()).collect();
        let range = self.exprs.alloc_expr_list(&written);
        let site = self.alloc(ExprKind::Call {
            receiver: ExprId::INVALID,
            callee: Name::new(descriptor.name()),
            args: range,
        });
        self.resolve(site, descriptor, Receiver::None, Receiver::None, args.to_vec());
        site
    }

    /// `tick(value)`
    pub(crate) fn tick(&mut self, value: i64) -> ExprId {
        let arg = self.int(value);
        self.call(tick_fn(), &[ValueArgument::Expression(arg)])
    }

    /// `lower..upper`, resolved to the element type's `rangeTo`.
    pub(crate) fn range_to(&mut self, kind: RangeKind, lower: ExprId, upper: ExprId) -> ExprId {
        let site = self.binary(BinaryOp::RangeTo, lower, upper);
        self.resolve(
            site,
            range_to_fn(kind),
            Receiver::Expression(lower),
            Receiver::None,
            vec![ValueArgument::Expression(upper)],
        );
        site
    }

    /// `lower until upper`, resolved to the `ranges.until` extension.
    pub(crate) fn until(&mut self, lower: ExprId, upper: ExprId) -> ExprId {
        let args = self.exprs.alloc_expr_list(&[upper]);
        let site = self.alloc(ExprKind::Call {
            receiver: lower,
            callee: Name::new("until"),
            args,
        });
        self.resolve(
            site,
            until_fn(),
            Receiver::None,
            Receiver::Expression(lower),
            vec![ValueArgument::Expression(upper)],
        );
        site
    }

    /// `value in range` (or `!in`), resolved to `kind`'s `contains`.
    pub(crate) fn membership(
        &mut self,
        op: BinaryOp,
        kind: RangeKind,
        value: ExprId,
        range: ExprId,
    ) -> ExprId {
        let site = self.binary(op, value, range);
        self.resolve(
            site,
            contains_fn(kind),
            Receiver::Expression(range),
            Receiver::None,
            vec![ValueArgument::Expression(value)],
        );
        site
    }

    pub(crate) fn resolve(
        &mut self,
        site: ExprId,
        descriptor: CallableDescriptor,
        dispatch: Receiver,
        extension: Receiver,
        args: Vec<ValueArgument>,
    ) {
        self.bindings
            .record_call(ResolvedCall::new(site, descriptor, dispatch, extension, args));
    }
}

/// Runtime value of the test evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Value {
    Int(i64),
    Char(char),
    Bool(bool),
    Range { lower: i64, upper: i64, inclusive: bool },
    Unit,
}

impl Value {
    fn ordinal(&self) -> i64 {
        match self {
            Value::Int(value) => *value,
            Value::Char(value) => i64::from(u32::from(*value)),
            other => panic!("{other:?} is not ordered"),
        }
    }

    fn truth(&self) -> bool {
        match self {
            Value::Bool(value) => *value,
            other => panic!("{other:?} is not a boolean"),
        }
    }
}

/// Interpreter over a lowered target tree.
pub(crate) struct Eval<'a> {
    arena: &'a TargetArena,
    env: FxHashMap<Name, Value>,
    temps: FxHashMap<TempId, Value>,
    /// Arguments of every `tick` call, in evaluation order.
    pub log: Vec<i64>,
}

impl<'a> Eval<'a> {
    pub(crate) fn new(arena: &'a TargetArena) -> Self {
        Eval {
            arena,
            env: FxHashMap::default(),
            temps: FxHashMap::default(),
            log: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn with(mut self, name: &str, value: Value) -> Self {
        self.env.insert(Name::new(name), value);
        self
    }

    pub(crate) fn eval(&mut self, id: TargetId) -> Value {
        let arena = self.arena;
        match arena.get(id) {
            TargetExpr::Int(value) => Value::Int(*value),
            TargetExpr::Char(value) => Value::Char(*value),
            TargetExpr::Bool(value) => Value::Bool(*value),
            TargetExpr::Ident(name) => match self.env.get(name) {
                Some(value) => value.clone(),
                None => panic!("unbound identifier {name}"),
            },
            TargetExpr::Temp(temp) => match self.temps.get(temp) {
                Some(value) => value.clone(),
                None => panic!("temporary {temp} read before assignment"),
            },
            TargetExpr::Not(operand) => Value::Bool(!self.eval(*operand).truth()),
            TargetExpr::Binary { op, left, right } => self.eval_binary(*op, *left, *right),
            TargetExpr::Call {
                callee,
                receiver,
                args,
            } => {
                let receiver = receiver.map(|receiver| self.eval(receiver));
                let args: Vec<Value> = arena
                    .get_list(*args)
                    .iter()
                    .map(|&arg| self.eval(arg))
                    .collect();
                self.call(callee, receiver, &args)
            }
            TargetExpr::Assign { temp, value } => {
                let value = self.eval(*value);
                self.temps.insert(*temp, value);
                Value::Unit
            }
            TargetExpr::Sequence { effects, value } => {
                for &effect in arena.get_list(*effects) {
                    self.eval(effect);
                }
                self.eval(*value)
            }
            other @ (TargetExpr::This(_) | TargetExpr::Default | TargetExpr::New { .. }) => {
                panic!("test evaluator cannot run {other:?}")
            }
        }
    }

    fn eval_binary(&mut self, op: TargetBinOp, left: TargetId, right: TargetId) -> Value {
        match op {
            TargetBinOp::And => {
                let result = self.eval(left).truth() && self.eval(right).truth();
                return Value::Bool(result);
            }
            TargetBinOp::Or => {
                let result = self.eval(left).truth() || self.eval(right).truth();
                return Value::Bool(result);
            }
            _ => {}
        }
        let left = self.eval(left).ordinal();
        let right = self.eval(right).ordinal();
        match op {
            TargetBinOp::Add => Value::Int(left + right),
            TargetBinOp::Sub => Value::Int(left - right),
            TargetBinOp::Mul => Value::Int(left * right),
            TargetBinOp::Eq => Value::Bool(left == right),
            TargetBinOp::NotEq => Value::Bool(left != right),
            TargetBinOp::Lt => Value::Bool(left < right),
            TargetBinOp::LtEq => Value::Bool(left <= right),
            TargetBinOp::Gt => Value::Bool(left > right),
            TargetBinOp::GtEq => Value::Bool(left >= right),
            TargetBinOp::And | TargetBinOp::Or => unreachable!("handled above"),
        }
    }

    fn call(
        &mut self,
        callee: &CallableDescriptor,
        receiver: Option<Value>,
        args: &[Value],
    ) -> Value {
        match (callee.owner().as_str(), callee.name(), receiver, args) {
            ("Int" | "Long" | "Char", "rangeTo", Some(lower), [upper]) => Value::Range {
                lower: lower.ordinal(),
                upper: upper.ordinal(),
                inclusive: true,
            },
            ("ranges", "until", None, [lower, upper]) => Value::Range {
                lower: lower.ordinal(),
                upper: upper.ordinal(),
                inclusive: false,
            },
            (
                _,
                "contains",
                Some(Value::Range {
                    lower,
                    upper,
                    inclusive,
                }),
                [value],
            ) => {
                let value = value.ordinal();
                let below = if inclusive { value <= upper } else { value < upper };
                Value::Bool(value >= lower && below)
            }
            ("test", "tick", None, [value]) => {
                self.log.push(value.ordinal());
                value.clone()
            }
            (owner, name, receiver, args) => {
                panic!("test evaluator has no builtin {owner}.{name} for {receiver:?} {args:?}")
            }
        }
    }
}
