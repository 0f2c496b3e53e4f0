//! End-to-end tests: source text through the parser into a context.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod control_flow;
mod host;
mod values;

use velox_ir::SharedInterner;

use crate::{buffer_handler, EvalError, EvalResult, Item, ScriptContext, SharedPrintHandler};

/// A context that captures `print` output.
pub(crate) struct Harness {
    pub ctx: ScriptContext,
    pub output: SharedPrintHandler,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_depth(crate::DEFAULT_MAX_CALL_DEPTH)
    }

    pub fn with_depth(depth: usize) -> Self {
        let output = buffer_handler();
        let ctx = ScriptContext::builder(SharedInterner::default())
            .print_handler(output.clone())
            .max_call_depth(depth)
            .build();
        Harness { ctx, output }
    }

    pub fn run(&mut self, source: &str) -> EvalResult<Item> {
        let interner = self.ctx.interner().clone();
        let program = velox_parse::parse_source(source, &interner, None)
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        self.ctx.run(&program)
    }

    pub fn output(&self) -> String {
        self.output.get_output()
    }
}

/// Run a script and return what it printed.
pub(crate) fn output_of(source: &str) -> String {
    let mut harness = Harness::new();
    if let Err(e) = harness.run(source) {
        panic!("script failed: {e}");
    }
    harness.output()
}

/// Run a script and return its top-level `return` value.
pub(crate) fn result_of(source: &str) -> Item {
    Harness::new()
        .run(source)
        .unwrap_or_else(|e| panic!("script failed: {e}"))
}

/// Run a script that must fail.
pub(crate) fn error_of(source: &str) -> EvalError {
    match Harness::new().run(source) {
        Ok(value) => panic!("expected an error, script returned {value}"),
        Err(e) => e,
    }
}
