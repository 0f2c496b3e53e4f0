//! Flat AST types using arena allocation.
//!
//! - No `Box<Expr>`: children are `ExprId` / `StmtId` indices
//! - Variable-length children (arguments, statement lists, parameters) are
//!   ranges into side tables of the `ExprArena`
//!
//! The node set is closed: the evaluator matches on `ExprKind` and
//! `StmtKind` exhaustively.
//!
//! # Module Structure
//!
//! - `expr`: expression nodes (`Expr`, `ExprKind`)
//! - `stmt`: statement nodes (`Stmt`, `StmtKind`, `Param`)
//! - `operators`: binary, unary, update and compound-assignment operators

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind};
pub use operators::{AssignOp, BinaryOp, UnaryOp, UpdateOp};
pub use stmt::{Param, Stmt, StmtKind};
