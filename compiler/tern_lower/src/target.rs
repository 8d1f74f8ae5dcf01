//! Target expression tree.
//!
//! The emittable output of lowering. Nodes live in a struct-of-arrays arena
//! indexed by [`TargetId`]; call argument lists and sequence effects live in
//! a flattened side table indexed by [`TargetRange`].
//!
//! The tree is opaque to the rest of the core beyond "an emittable node":
//! lowering only allocates into it, and a backend walks it.

use std::fmt;

use tern_descriptors::CallableDescriptor;
use tern_ir::{FqName, Name};

/// Index of a node in a [`TargetArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct TargetId(u32);

impl TargetId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}

/// A compiler-introduced local.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TempId(u32);

impl TempId {
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$t{}", self.0)
    }
}

/// Range of node ids in the flattened list table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct TargetRange {
    start: u32,
    len: u16,
}

impl TargetRange {
    pub const EMPTY: TargetRange = TargetRange { start: 0, len: 0 };

    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

tern_ir::static_assert_size!(TargetRange, 8);

/// Primitive operators of the target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TargetBinOp {
    Add,
    Sub,
    Mul,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// Short-circuit conjunction.
    And,
    /// Short-circuit disjunction.
    Or,
}

impl TargetBinOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            TargetBinOp::Add => "+",
            TargetBinOp::Sub => "-",
            TargetBinOp::Mul => "*",
            TargetBinOp::Eq => "==",
            TargetBinOp::NotEq => "!=",
            TargetBinOp::Lt => "<",
            TargetBinOp::LtEq => "<=",
            TargetBinOp::Gt => ">",
            TargetBinOp::GtEq => ">=",
            TargetBinOp::And => "&&",
            TargetBinOp::Or => "||",
        }
    }
}

/// Target expression kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TargetExpr {
    Int(i64),
    Char(char),
    Bool(bool),
    Ident(Name),
    Temp(TempId),
    /// Implicit receiver of the given class.
    This(FqName),
    /// The declared default value of the parameter in this argument position.
    Default,
    Binary {
        op: TargetBinOp,
        left: TargetId,
        right: TargetId,
    },
    Not(TargetId),
    /// Call of a resolved callable. An extension receiver, when present, is
    /// the first entry of `args`.
    Call {
        callee: CallableDescriptor,
        receiver: Option<TargetId>,
        args: TargetRange,
    },
    /// Constructor invocation.
    New { class: FqName, args: TargetRange },
    /// `temp = value`; evaluates to unit.
    Assign { temp: TempId, value: TargetId },
    /// Evaluate `effects` in order, then `value`.
    Sequence { effects: TargetRange, value: TargetId },
}

impl TargetExpr {
    /// Whether evaluating this node twice is indistinguishable from
    /// evaluating it once.
    pub fn is_trivially_duplicable(&self) -> bool {
        matches!(
            self,
            TargetExpr::Int(_)
                | TargetExpr::Char(_)
                | TargetExpr::Bool(_)
                | TargetExpr::Ident(_)
                | TargetExpr::Temp(_)
                | TargetExpr::This(_)
        )
    }

    /// Whether every evaluation yields the same value regardless of what
    /// ran in between: literals and compiler temporaries.
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            TargetExpr::Int(_) | TargetExpr::Char(_) | TargetExpr::Bool(_) | TargetExpr::Temp(_)
        )
    }
}

/// Arena for target expressions.
#[derive(Clone, Debug, Default)]
pub struct TargetArena {
    nodes: Vec<TargetExpr>,
    lists: Vec<TargetId>,
    temps: u32,
}

impl TargetArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, expr: TargetExpr) -> TargetId {
        let id = TargetId(to_u32(self.nodes.len(), "target nodes"));
        self.nodes.push(expr);
        id
    }

    pub fn alloc_list(&mut self, ids: &[TargetId]) -> TargetRange {
        if ids.is_empty() {
            return TargetRange::EMPTY;
        }
        let start = to_u32(self.lists.len(), "target lists");
        self.lists.extend_from_slice(ids);
        let len = u16::try_from(ids.len())
            .unwrap_or_else(|_| panic!("target list of {} exceeds u16::MAX", ids.len()));
        TargetRange { start, len }
    }

    pub fn get_list(&self, range: TargetRange) -> &[TargetId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.lists[start..start + range.len()]
    }

    #[inline]
    pub fn get(&self, id: TargetId) -> &TargetExpr {
        &self.nodes[id.index()]
    }

    /// A temporary not used anywhere else in this arena.
    pub fn fresh_temp(&mut self) -> TempId {
        let temp = TempId(self.temps);
        self.temps += 1;
        temp
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Builders

    pub fn binary(&mut self, op: TargetBinOp, left: TargetId, right: TargetId) -> TargetId {
        self.alloc(TargetExpr::Binary { op, left, right })
    }

    pub fn greater_than_eq(&mut self, left: TargetId, right: TargetId) -> TargetId {
        self.binary(TargetBinOp::GtEq, left, right)
    }

    pub fn less_than_eq(&mut self, left: TargetId, right: TargetId) -> TargetId {
        self.binary(TargetBinOp::LtEq, left, right)
    }

    pub fn less_than(&mut self, left: TargetId, right: TargetId) -> TargetId {
        self.binary(TargetBinOp::Lt, left, right)
    }

    pub fn and(&mut self, left: TargetId, right: TargetId) -> TargetId {
        self.binary(TargetBinOp::And, left, right)
    }

    pub fn not(&mut self, operand: TargetId) -> TargetId {
        self.alloc(TargetExpr::Not(operand))
    }

    /// Wrap `value` so that `effects` run first.
    pub fn sequence(&mut self, effects: &[TargetId], value: TargetId) -> TargetId {
        if effects.is_empty() {
            return value;
        }
        let effects = self.alloc_list(effects);
        self.alloc(TargetExpr::Sequence { effects, value })
    }

    /// Render `id` as a single-line expression, for logs and test failures.
    pub fn display(&self, id: TargetId) -> DisplayTarget<'_> {
        DisplayTarget { arena: self, id }
    }
}

/// Renders a target subtree. See [`TargetArena::display`].
pub struct DisplayTarget<'a> {
    arena: &'a TargetArena,
    id: TargetId,
}

impl DisplayTarget<'_> {
    fn child(&self, id: TargetId) -> Self {
        DisplayTarget {
            arena: self.arena,
            id,
        }
    }

    fn list(&self, f: &mut fmt::Formatter<'_>, range: TargetRange, sep: &str) -> fmt::Result {
        for (i, &id) in self.arena.get_list(range).iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            write!(f, "{}", self.child(id))?;
        }
        Ok(())
    }
}

impl fmt::Display for DisplayTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arena.get(self.id) {
            TargetExpr::Int(value) => write!(f, "{value}"),
            TargetExpr::Char(value) => write!(f, "{value:?}"),
            TargetExpr::Bool(value) => write!(f, "{value}"),
            TargetExpr::Ident(name) => write!(f, "{name}"),
            TargetExpr::Temp(temp) => write!(f, "{temp}"),
            TargetExpr::This(class) => write!(f, "this@{class}"),
            TargetExpr::Default => f.write_str("<default>"),
            TargetExpr::Binary { op, left, right } => write!(
                f,
                "({} {} {})",
                self.child(*left),
                op.as_symbol(),
                self.child(*right)
            ),
            TargetExpr::Not(operand) => write!(f, "!{}", self.child(*operand)),
            TargetExpr::Call {
                callee,
                receiver,
                args,
            } => {
                match receiver {
                    Some(receiver) => write!(f, "{}.{}(", self.child(*receiver), callee.name())?,
                    None => write!(f, "{}.{}(", callee.owner(), callee.name())?,
                }
                self.list(f, *args, ", ")?;
                f.write_str(")")
            }
            TargetExpr::New { class, args } => {
                write!(f, "new {class}(")?;
                self.list(f, *args, ", ")?;
                f.write_str(")")
            }
            TargetExpr::Assign { temp, value } => write!(f, "{temp} = {}", self.child(*value)),
            TargetExpr::Sequence { effects, value } => {
                f.write_str("{ ")?;
                self.list(f, *effects, "; ")?;
                write!(f, "; {} }}", self.child(*value))
            }
        }
    }
}

fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("{what} count exceeds u32::MAX"))
}
