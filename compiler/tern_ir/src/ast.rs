//! Flat expression arena.
//!
//! The parser is an external collaborator; this module only defines the
//! shape of the syntax it hands over. Expressions live in a struct-of-arrays
//! arena indexed by [`ExprId`], argument lists in a flattened side table
//! indexed by [`ExprRange`].

use std::fmt;

use crate::{ExprId, ExprRange, Name, Span};

/// Binary operators as written in source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    /// `a..b`
    RangeTo,
    /// `x in r`
    In,
    /// `x !in r`
    NotIn,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::RangeTo => "..",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "!in",
        }
    }

    /// Membership operators (`in`, `!in`).
    pub const fn is_membership(self) -> bool {
        matches!(self, BinaryOp::In | BinaryOp::NotIn)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Expression kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Char(char),
    Bool(bool),
    Ident(Name),
    /// `!operand`
    Not(ExprId),
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// `receiver.callee(args)`, `callee(args)` or infix `receiver callee arg`.
    ///
    /// `receiver` is `ExprId::INVALID` when the call has no explicit receiver.
    Call {
        receiver: ExprId,
        callee: Name,
        args: ExprRange,
    },
}

/// Expression node: kind plus source span.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Arena for syntax expressions.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    /// Expression kinds (parallel with spans).
    kinds: Vec<ExprKind>,
    /// Source spans (parallel with kinds).
    spans: Vec<Span>,
    /// Flattened argument lists.
    expr_lists: Vec<ExprId>,
}

impl ExprArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its ID.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.kinds.len(), "expressions"));
        self.kinds.push(expr.kind);
        self.spans.push(expr.span);
        id
    }

    /// Allocate a contiguous argument list.
    pub fn alloc_expr_list(&mut self, ids: &[ExprId]) -> ExprRange {
        if ids.is_empty() {
            return ExprRange::EMPTY;
        }
        let start = to_u32(self.expr_lists.len(), "expression lists");
        self.expr_lists.extend_from_slice(ids);
        let len = u16::try_from(ids.len())
            .unwrap_or_else(|_| panic!("expression list of {} exceeds u16::MAX", ids.len()));
        ExprRange::new(start, len)
    }

    /// Get expression IDs from a range.
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    /// Get the kind of an expression.
    #[inline]
    pub fn expr_kind(&self, id: ExprId) -> &ExprKind {
        &self.kinds[id.index()]
    }

    /// Get the span of an expression.
    #[inline]
    pub fn expr_span(&self, id: ExprId) -> Span {
        self.spans[id.index()]
    }

    /// Number of allocated expressions.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no expressions have been allocated.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("{what} count exceeds u32::MAX"))
}
