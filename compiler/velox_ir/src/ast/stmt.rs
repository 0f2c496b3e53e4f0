//! Statement nodes.

use std::fmt;

use super::operators::AssignOp;
use crate::{ExprId, Name, ParamRange, Span, Spanned, StmtId, StmtRange};

/// Statement node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// A formal parameter, optionally with a default value expression.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub default: Option<ExprId>,
    pub span: Span,
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// `;`
    Empty,
    /// Expression evaluated for its effect: `f(x);`
    Expr(ExprId),
    /// Plain or compound assignment: `a.b = c;`, `x += 1;`
    Assign {
        target: ExprId,
        op: AssignOp,
        value: ExprId,
    },
    /// `{ ... }` - introduces a code-block scope
    Block(StmtRange),
    /// Statement list without its own scope (script root, function body)
    Sequence(StmtRange),
    /// `include "path";` - statements of another unit spliced in at parse time
    Include { path: Name, body: StmtRange },

    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    DoWhile {
        body: StmtId,
        cond: ExprId,
    },
    For {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<StmtId>,
        body: StmtId,
    },
    Loop {
        body: StmtId,
    },
    Break,
    Continue,
    Return(Option<ExprId>),

    /// `function name(params) { body }`; `body` is a `Sequence`
    Function {
        name: Name,
        params: ParamRange,
        body: StmtId,
    },
    /// `class Name { function ... }`; every member is a `Function` statement
    Class { name: Name, methods: StmtRange },
    /// `instant Name { ... }` - defines a single live object
    Instant { name: Name, body: StmtRange },
    /// `Name { ... }` - realizes members onto the object bound to `Name`
    Realize { name: Name, body: StmtRange },
    /// `global name;`
    Global(Name),
    /// `var name [= init];`
    Var { name: Name, init: Option<ExprId> },
}

impl StmtKind {
    /// Definitions that are forward-declared when their enclosing block is entered.
    #[inline]
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            StmtKind::Function { .. } | StmtKind::Class { .. } | StmtKind::Instant { .. }
        )
    }
}
