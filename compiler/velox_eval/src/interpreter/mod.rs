//! Tree-walking interpreter.
//!
//! An [`Interpreter`] is a short-lived view that walks one arena's nodes
//! against a borrowed [`ScriptContext`]. Calling a script function swaps in
//! the arena the function was defined in for the duration of the call.
//!
//! # Module Structure
//!
//! - `stmt`: statement execution, definition hoisting, loops
//! - `expr`: expression evaluation in read and write mode
//! - `call`: function calls and `new`
//! - `object`: function, class and instant definitions, realization
//! - `scope_guard`: RAII guards for scopes, calls and realizations

mod call;
mod expr;
mod object;
mod scope_guard;
mod stmt;

use velox_ir::{Name, SharedArena};

use crate::ScriptContext;

/// How an expression's result will be used.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Access {
    /// The value is consumed; missing names are errors.
    Read,
    /// Read, then written back (`+=`, `++`). The target must already exist
    /// and be writable.
    Modify,
    /// The result will be written; missing names and fields are created
    /// as `undefined`.
    Write,
}

pub(crate) struct Interpreter<'c> {
    pub(crate) ctx: &'c mut ScriptContext,
    arena: SharedArena,
}

impl<'c> Interpreter<'c> {
    pub(crate) fn new(ctx: &'c mut ScriptContext, arena: SharedArena) -> Self {
        Interpreter { ctx, arena }
    }

    fn name_str(&self, name: Name) -> &'static str {
        self.ctx.interner().lookup(name)
    }
}
