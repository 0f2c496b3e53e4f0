//! RAII guards for interpreter state.
//!
//! Every push onto a context stack (block scope, call activation,
//! realization target) is paired with a guard that pops it on drop, so an
//! error propagating with `?` leaves the context balanced.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`,
//! so code inside the scope uses it exactly like the interpreter.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::{EvalResult, ObjectRef};

/// Which stack the guard pops.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum ScopeExit {
    Block,
    Call,
    Realize,
}

pub(crate) struct ScopedInterpreter<'guard, 'ctx> {
    interpreter: &'guard mut Interpreter<'ctx>,
    exit: ScopeExit,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        let ctx = &mut *self.interpreter.ctx;
        match self.exit {
            ScopeExit::Block => ctx.pop_scope(),
            ScopeExit::Call => ctx.pop_frame(),
            ScopeExit::Realize => ctx.pop_realize_target(),
        }
    }
}

impl<'ctx> Deref for ScopedInterpreter<'_, 'ctx> {
    type Target = Interpreter<'ctx>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'ctx> Interpreter<'ctx> {
    /// Enter a code-block scope.
    pub(crate) fn scoped(&mut self) -> ScopedInterpreter<'_, 'ctx> {
        self.ctx.push_scope();
        ScopedInterpreter {
            interpreter: self,
            exit: ScopeExit::Block,
        }
    }

    /// Enter a call activation; fails at the recursion limit.
    pub(crate) fn enter_call(
        &mut self,
        receiver: Option<ObjectRef>,
    ) -> EvalResult<ScopedInterpreter<'_, 'ctx>> {
        self.ctx.push_frame(receiver)?;
        Ok(ScopedInterpreter {
            interpreter: self,
            exit: ScopeExit::Call,
        })
    }

    /// Make `object` the target of new names and `this`.
    pub(crate) fn realizing(&mut self, object: ObjectRef) -> ScopedInterpreter<'_, 'ctx> {
        self.ctx.push_realize_target(object);
        ScopedInterpreter {
            interpreter: self,
            exit: ScopeExit::Realize,
        }
    }
}
