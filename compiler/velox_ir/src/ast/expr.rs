//! Expression nodes.

use std::fmt;

use super::operators::{BinaryOp, UnaryOp, UpdateOp};
use crate::{ExprId, ExprRange, Name, Span, Spanned};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal: `42`, `0xff`
    Int(i64),
    /// Real literal, stored as `f64::to_bits`: `3.5`
    Real(u64),
    /// String literal (interned): `"text"`
    Str(Name),
    /// Boolean literal: `true`, `false`
    Bool(bool),
    /// `undefined`
    Undefined,
    /// Color literal: `|r,g,b|`, `|r,g,b,a|` or packed `|0xRRGGBB|`
    Color(ExprRange),
    /// Vector literal: `<x,y>`
    Vector { x: ExprId, y: ExprId },
    /// List literal: `[a, b, c]`
    List(ExprRange),

    /// Simple name reference
    Ident(Name),
    /// Receiver of the current method call or instant realization
    This,
    /// Member access: `receiver.name`
    Member { receiver: ExprId, name: Name },
    /// List index access: `receiver[index]`
    Index { receiver: ExprId, index: ExprId },
    /// Function call: `callee(args)`
    Call { callee: ExprId, args: ExprRange },
    /// Constructor call: `new Class(args)`
    New { class: Name, args: ExprRange },

    /// Prefix unary operation: `-x`, `!x`
    Unary { op: UnaryOp, operand: ExprId },
    /// Increment / decrement of a location: `++x`, `x--`
    Update {
        op: UpdateOp,
        target: ExprId,
        postfix: bool,
    },
    /// Binary operation; `And`/`Or` short-circuit
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
}

impl ExprKind {
    /// Whether this expression denotes an assignable storage location.
    ///
    /// Location expressions may be evaluated in write context, where a
    /// missing variable or field is created as `undefined` instead of
    /// raising an error.
    #[inline]
    pub fn is_location(&self) -> bool {
        matches!(
            self,
            ExprKind::Ident(_) | ExprKind::Member { .. } | ExprKind::Index { .. }
        )
    }
}
