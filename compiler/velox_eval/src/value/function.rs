//! Callable values: script functions and host natives.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use velox_ir::{Name, SharedArena, StmtId};

use crate::{EvalResult, Item, ScriptContext};

/// Host callback behind a native function.
///
/// Arguments are read by parameter name through
/// [`ScriptContext::argument`]; the returned item becomes the call's value.
pub type NativeFn = Rc<dyn Fn(&mut ScriptContext) -> EvalResult<Item>>;

/// A formal parameter with its definition-time default, if any.
#[derive(Clone, Debug)]
pub struct FunctionParam {
    pub name: Name,
    /// Evaluated once when the function is defined; each call that omits
    /// the argument binds a fresh copy.
    pub default: Option<Item>,
}

#[derive(Clone)]
pub enum FunctionBody {
    /// Body `Sequence` in the arena of the program that defined it.
    Script { arena: SharedArena, body: StmtId },
    Native(NativeFn),
}

/// A function definition.
#[derive(Clone)]
pub struct FunctionValue {
    pub name: Name,
    display_name: &'static str,
    pub params: SmallVec<[FunctionParam; 4]>,
    pub body: FunctionBody,
}

impl FunctionValue {
    pub fn new(
        name: Name,
        display_name: &'static str,
        params: SmallVec<[FunctionParam; 4]>,
        body: FunctionBody,
    ) -> Self {
        FunctionValue {
            name,
            display_name,
            params,
            body,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn is_native(&self) -> bool {
        matches!(self.body, FunctionBody::Native(_))
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.display_name)
            .field("arity", &self.params.len())
            .field("native", &self.is_native())
            .finish()
    }
}
