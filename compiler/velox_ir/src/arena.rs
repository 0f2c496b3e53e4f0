//! Arena allocation for the flat AST.
//!
//! - Contiguous storage for all expressions and statements of a program
//! - Child references use `ExprId` / `StmtId` indices
//! - Lists use ranges into flattened side tables
//!
//! Once parsing finishes the arena is frozen into a `SharedArena`; nothing
//! in it changes while scripts run, so one arena can back many contexts.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::ast::{Expr, Param, Stmt};
use crate::{ExprId, ExprRange, ParamRange, StmtId, StmtRange};

/// Contiguous storage for all nodes of a parsed program.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// Flattened expression lists (call args, list elements, color components).
    expr_lists: Vec<ExprId>,
    /// All statements (indexed by `StmtId`).
    stmts: Vec<Stmt>,
    /// Flattened statement lists (block bodies, class members).
    stmt_lists: Vec<StmtId>,
    /// All parameters.
    params: Vec<Param>,
}

/// Convert a table length to a `u32` index.
///
/// Programs with more than 2^32 nodes are not supported.
#[inline]
fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena table exceeded u32::MAX entries"))
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on source size.
    /// Heuristic: ~1 expression per 8 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated_exprs = source_len / 8;
        ExprArena {
            exprs: Vec::with_capacity(estimated_exprs),
            expr_lists: Vec::with_capacity(estimated_exprs / 4),
            stmts: Vec::with_capacity(estimated_exprs / 2),
            stmt_lists: Vec::with_capacity(estimated_exprs / 2),
            params: Vec::with_capacity(estimated_exprs / 16),
        }
    }

    // Expressions

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len());
        self.expr_lists.extend(exprs);
        ExprRange::new(start, to_u32(self.expr_lists.len()) - start)
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    // Statements

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// Get statement by ID.
    ///
    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len());
        self.stmt_lists.extend(stmts);
        StmtRange::new(start, to_u32(self.stmt_lists.len()) - start)
    }

    #[inline]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }

    // Parameters

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Param>) -> ParamRange {
        let start = to_u32(self.params.len());
        self.params.extend(params);
        ParamRange::new(start, to_u32(self.params.len()) - start)
    }

    #[inline]
    pub fn get_params(&self, range: ParamRange) -> &[Param] {
        let start = range.start as usize;
        &self.params[start..start + range.len()]
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("stmts", &self.stmts.len())
            .field("params", &self.params.len())
            .finish()
    }
}

/// Frozen arena shared between script contexts (and threads).
///
/// Function values keep a `SharedArena` next to their body `StmtId`, so a
/// function stays callable even when invoked from code in another arena.
#[derive(Clone, Default)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether both handles point to the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedArena").field(&*self.0).finish()
    }
}
