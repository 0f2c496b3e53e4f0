//! Velox IR - shared data structures for the Velox scripting engine.
//!
//! This crate contains the types every other Velox crate speaks:
//! - Spans with 1-based source lines
//! - Names for interned identifiers
//! - Tokens, `TokenList` and the `TokenSource` contract the parser consumes
//! - AST nodes (`Expr`, `Stmt`) stored flat in an `ExprArena`
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and string literals become `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Immutable After Parse**: a finished arena is wrapped in `SharedArena`
//!   and executed by any number of independent script contexts
//!
//! Reals are stored as u64 bits so every node stays `Eq + Hash`.

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod span;
mod token;

pub use arena::{ExprArena, SharedArena};
pub use ast::{AssignOp, BinaryOp, Expr, ExprKind, Param, Stmt, StmtKind, UnaryOp, UpdateOp};
pub use expr_id::{ExprId, ExprRange, ParamRange, StmtId, StmtRange};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList, TokenSource};

/// Trait for types that carry a source location.
pub trait Spanned {
    fn span(&self) -> Span;
}
