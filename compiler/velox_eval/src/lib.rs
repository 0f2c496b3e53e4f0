//! Velox evaluator: value model, script context and tree-walking interpreter.
//!
//! ```text
//! let interner = SharedInterner::default();
//! let program = velox_parse::parse_source(source, &interner, None)?;
//! let mut ctx = ScriptContext::new(interner);
//! let result = ctx.run(&program)?;
//! ```
//!
//! # Module Structure
//!
//! - `value`: `Item` storage cells and the `ItemState` kinds they hold
//! - `operators`: the binary and unary operator tables
//! - `context`: `ScriptContext`, scopes, control flags, builder
//! - `interpreter`: statement and expression execution
//! - `natives`: builtin native functions
//! - `print_handler`: where `print` output goes
//! - `errors`: run-time errors and their factories

mod context;
pub mod errors;
mod interpreter;
mod natives;
pub mod operators;
mod print_handler;
mod value;

pub use context::{
    ControlFlags, Scope, ScopeKind, ScriptContext, ScriptContextBuilder, DEFAULT_MAX_CALL_DEPTH,
};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{
    format_real, new_list, Color, FunctionBody, FunctionParam, FunctionValue, Item, ItemState,
    ListRef, NativeFn, ObjectRef, ObjectType, ValueKind, Vector2,
};

#[cfg(test)]
mod tests;
