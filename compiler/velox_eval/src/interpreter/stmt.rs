//! Statement execution.
//!
//! Statement lists run in two passes. The first (prepare) hoists the
//! definitions among the direct children, so functions, classes and
//! instants can be used before their position in the source. The second
//! executes the remaining statements in order, stopping as soon as a
//! control flag is raised.

use velox_ir::{AssignOp, ExprId, Name, StmtId, StmtKind, StmtRange};
use velox_stack::ensure_sufficient_stack;

use super::object::Defaults;
use super::Interpreter;
use crate::context::ControlFlags;
use crate::errors::EvalResult;
use crate::operators;
use crate::Item;

impl Interpreter<'_> {
    pub(crate) fn exec_stmt(&mut self, id: StmtId) -> EvalResult<()> {
        ensure_sufficient_stack(|| {
            let stmt = self.arena.get_stmt(id);
            let span = stmt.span;
            let kind = stmt.kind.clone();
            self.exec_kind(kind).map_err(|e| e.at(span))
        })
    }

    fn exec_kind(&mut self, kind: StmtKind) -> EvalResult<()> {
        match kind {
            StmtKind::Empty => Ok(()),
            StmtKind::Expr(expr) => self.eval_expr(expr).map(drop),
            StmtKind::Assign { target, op, value } => self.exec_assign(target, op, value),
            StmtKind::Block(range) => {
                let mut scoped = self.scoped();
                scoped.exec_sequence(range)
            }
            StmtKind::Sequence(range) | StmtKind::Include { body: range, .. } => {
                self.exec_sequence(range)
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond)? {
                    self.exec_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch)
                } else {
                    Ok(())
                }
            }
            StmtKind::While { cond, body } => self.exec_while(cond, body),
            StmtKind::DoWhile { body, cond } => self.exec_do_while(body, cond),
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => self.exec_for(init, cond, step, body),
            StmtKind::Loop { body } => self.exec_loop(body),
            StmtKind::Break => {
                self.ctx.set_flags(ControlFlags::BREAK_EXECUTED);
                Ok(())
            }
            StmtKind::Continue => {
                self.ctx.set_flags(ControlFlags::CONTINUE_EXECUTED);
                Ok(())
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?.detached(),
                    None => Item::undefined(),
                };
                self.ctx.set_return_value(value);
                self.ctx.set_flags(ControlFlags::RETURN_EXECUTED);
                Ok(())
            }
            StmtKind::Function { name, params, body } => {
                self.define_function(name, params, body, Defaults::Evaluate)
            }
            StmtKind::Class { name, methods } => {
                self.define_class(name, methods, Defaults::Evaluate)
            }
            StmtKind::Instant { name, body } => {
                self.define_instant(name, body)?;
                self.exec_instant_body(name, body)
            }
            StmtKind::Realize { name, body } => self.exec_realize(name, body),
            StmtKind::Global(name) => {
                self.ctx.declare_global_name(name);
                Ok(())
            }
            StmtKind::Var { name, init } => self.exec_var(name, init),
        }
    }

    /// Prepare, then execute, a statement list in the current scope.
    pub(crate) fn exec_sequence(&mut self, range: StmtRange) -> EvalResult<()> {
        let arena = self.arena.clone();
        let stmts = arena.get_stmt_list(range);
        for &id in stmts {
            self.prepare_stmt(id)?;
        }
        self.exec_prepared(stmts)
    }

    /// Hoist a definition into the current scope (or realization target).
    pub(crate) fn prepare_stmt(&mut self, id: StmtId) -> EvalResult<()> {
        let stmt = self.arena.get_stmt(id);
        let span = stmt.span;
        let result = match stmt.kind.clone() {
            StmtKind::Function { name, params, body } => {
                self.define_function(name, params, body, Defaults::Pending)
            }
            StmtKind::Class { name, methods } => {
                self.define_class(name, methods, Defaults::Pending)
            }
            StmtKind::Instant { name, body } => self.define_instant(name, body),
            // Included statements are spliced into the enclosing list.
            StmtKind::Include { body, .. } => {
                let arena = self.arena.clone();
                arena
                    .get_stmt_list(body)
                    .iter()
                    .try_for_each(|&child| self.prepare_stmt(child))
            }
            _ => Ok(()),
        };
        result.map_err(|e| e.at(span))
    }

    /// Execute already-prepared statements until one raises a control flag.
    pub(crate) fn exec_prepared(&mut self, stmts: &[StmtId]) -> EvalResult<()> {
        for &id in stmts {
            let mark = self.ctx.temporaries_mark();
            let result = self.exec_prepared_stmt(id);
            self.ctx.release_temporaries(mark);
            result?;
            if !self.ctx.flags().is_empty() {
                break;
            }
        }
        Ok(())
    }

    fn exec_prepared_stmt(&mut self, id: StmtId) -> EvalResult<()> {
        let stmt = self.arena.get_stmt(id);
        let span = stmt.span;
        match stmt.kind.clone() {
            // Rebind with evaluated defaults in the scope prepare used.
            StmtKind::Function { name, params, body } if self.has_defaults(params) => self
                .define_function(name, params, body, Defaults::Evaluate)
                .map_err(|e| e.at(span)),
            StmtKind::Class { name, methods } if self.methods_have_defaults(methods) => self
                .define_class(name, methods, Defaults::Evaluate)
                .map_err(|e| e.at(span)),
            StmtKind::Function { .. } | StmtKind::Class { .. } => Ok(()),
            StmtKind::Instant { name, body } => {
                self.exec_instant_body(name, body).map_err(|e| e.at(span))
            }
            StmtKind::Include { body, .. } => {
                let arena = self.arena.clone();
                self.exec_prepared(arena.get_stmt_list(body))
            }
            _ => self.exec_stmt(id),
        }
    }

    fn exec_assign(&mut self, target: ExprId, op: AssignOp, value: ExprId) -> EvalResult<()> {
        let value = self.eval_expr(value)?;
        match op.binary_op() {
            None => self.eval_location(target)?.assign(&value),
            Some(op) => {
                let target = self.eval_modify_target(target)?;
                let result = operators::arithmetic(op, &target.state(), &value.state())?;
                target.set(result);
            }
        }
        Ok(())
    }

    fn exec_var(&mut self, name: Name, init: Option<ExprId>) -> EvalResult<()> {
        let item = match init {
            Some(init) => self.eval_expr(init)?.detached(),
            None => Item::undefined(),
        };
        self.ctx.declare(name, item);
        Ok(())
    }

    fn eval_condition(&mut self, cond: ExprId) -> EvalResult<bool> {
        let span = self.arena.get_expr(cond).span;
        self.eval_expr(cond)?.to_boolean().map_err(|e| e.at(span))
    }

    // Loops
    //
    // Each loop runs in its own scope. `BREAK_EXECUTED` is cleared on entry,
    // `CONTINUE_EXECUTED` after every body run; both are clear on exit.
    // `RETURN_EXECUTED` passes through to the enclosing call.

    /// Run the body once; `true` when the loop must stop.
    fn loop_body(&mut self, body: StmtId) -> EvalResult<bool> {
        self.exec_stmt(body)?;
        if self.ctx.flags().intersects(ControlFlags::LOOP_EXIT) {
            return Ok(true);
        }
        self.ctx.clear_flags(ControlFlags::CONTINUE_EXECUTED);
        Ok(false)
    }

    fn exit_loop(&mut self) {
        self.ctx
            .clear_flags(ControlFlags::BREAK_EXECUTED | ControlFlags::CONTINUE_EXECUTED);
    }

    fn exec_while(&mut self, cond: ExprId, body: StmtId) -> EvalResult<()> {
        let mut scoped = self.scoped();
        scoped.ctx.clear_flags(ControlFlags::BREAK_EXECUTED);
        while scoped.eval_condition(cond)? {
            if scoped.loop_body(body)? {
                break;
            }
        }
        scoped.exit_loop();
        Ok(())
    }

    fn exec_do_while(&mut self, body: StmtId, cond: ExprId) -> EvalResult<()> {
        let mut scoped = self.scoped();
        scoped.ctx.clear_flags(ControlFlags::BREAK_EXECUTED);
        loop {
            if scoped.loop_body(body)? || !scoped.eval_condition(cond)? {
                break;
            }
        }
        scoped.exit_loop();
        Ok(())
    }

    fn exec_for(
        &mut self,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<StmtId>,
        body: StmtId,
    ) -> EvalResult<()> {
        let mut scoped = self.scoped();
        if let Some(init) = init {
            scoped.exec_stmt(init)?;
        }
        scoped.ctx.clear_flags(ControlFlags::BREAK_EXECUTED);
        loop {
            if let Some(cond) = cond {
                if !scoped.eval_condition(cond)? {
                    break;
                }
            }
            if scoped.loop_body(body)? {
                break;
            }
            if let Some(step) = step {
                scoped.exec_stmt(step)?;
            }
        }
        scoped.exit_loop();
        Ok(())
    }

    fn exec_loop(&mut self, body: StmtId) -> EvalResult<()> {
        let mut scoped = self.scoped();
        scoped.ctx.clear_flags(ControlFlags::BREAK_EXECUTED);
        while !scoped.loop_body(body)? {}
        scoped.exit_loop();
        Ok(())
    }
}
