//! `ScriptContextBuilder` for configuring a context before first use.

use velox_ir::SharedInterner;

use super::ScriptContext;
use crate::natives;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Calls allowed to be active at once before a run fails.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 2048;

/// Builder for [`ScriptContext`].
pub struct ScriptContextBuilder {
    interner: SharedInterner,
    max_call_depth: usize,
    print_handler: Option<SharedPrintHandler>,
    builtins: bool,
}

impl ScriptContextBuilder {
    /// The interner must be the one the programs run here were parsed with.
    pub fn new(interner: SharedInterner) -> Self {
        ScriptContextBuilder {
            interner,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            print_handler: None,
            builtins: true,
        }
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Destination of `print`. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Start with an empty builtin layer.
    #[must_use]
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    pub fn build(self) -> ScriptContext {
        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);
        let mut context = ScriptContext::with_parts(self.interner, print_handler, self.max_call_depth);
        if self.builtins {
            natives::register_builtins(&mut context);
        }
        context
    }
}
