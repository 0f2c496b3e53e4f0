//! Builtin native functions.
//!
//! Installed into the builtin global layer of every context unless the
//! builder opts out. Hosts add their own with
//! [`ScriptContext::register_native`].

use crate::errors::EvalError;
use crate::{EvalResult, Item, ItemState, ScriptContext};

pub(crate) fn register_builtins(ctx: &mut ScriptContext) {
    ctx.register_native("print", &["value"], print);
    ctx.register_native("append", &["list", "value"], append);
    ctx.register_native("length", &["value"], length);
    ctx.register_native("typeOf", &["value"], type_of);
}

/// `print(value)`: write the value's string form and a newline.
fn print(ctx: &mut ScriptContext) -> EvalResult<Item> {
    let text = ctx.argument("value")?.to_string();
    ctx.print_handler().println(&text);
    Ok(Item::undefined())
}

/// `append(list, value)`: push a copy of the value's state onto the list.
fn append(ctx: &mut ScriptContext) -> EvalResult<Item> {
    let list = ctx.argument("list")?;
    let Some(items) = list.as_list() else {
        return Err(EvalError::native(format!(
            "append expects a list, found {}",
            list.kind()
        )));
    };
    let value = ctx.argument("value")?.detached();
    items.borrow_mut().push(value);
    Ok(Item::undefined())
}

/// `length(value)`: element count of a list, character count of a string.
fn length(ctx: &mut ScriptContext) -> EvalResult<Item> {
    let value = ctx.argument("value")?;
    let len = match &*value.state() {
        ItemState::List(items) => items.borrow().len(),
        ItemState::String(s) => s.chars().count(),
        other => {
            return Err(EvalError::native(format!(
                "length expects a list or string, found {}",
                other.kind()
            )))
        }
    };
    Ok(Item::from(i64::try_from(len).unwrap_or(i64::MAX)))
}

/// `typeOf(value)`: the kind name, e.g. `"integer"`.
fn type_of(ctx: &mut ScriptContext) -> EvalResult<Item> {
    let value = ctx.argument("value")?;
    Ok(Item::from(value.kind().as_str()))
}
