//! Call receivers.

use tern_ir::{ExprId, FqName};

/// The object a call is invoked on (dispatch) or with (extension).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Receiver {
    /// An explicit receiver expression. The source expression is retained so
    /// lowering can translate it again on its own.
    Expression(ExprId),
    /// An implicit `this` of the given class.
    Implicit { class: FqName },
    /// The call has no receiver in this slot.
    #[default]
    None,
}

impl Receiver {
    pub fn is_present(&self) -> bool {
        !matches!(self, Receiver::None)
    }

    /// The receiver expression, when the receiver is explicit.
    pub fn expression(&self) -> Option<ExprId> {
        match self {
            Receiver::Expression(expr) => Some(*expr),
            Receiver::Implicit { .. } | Receiver::None => None,
        }
    }
}
