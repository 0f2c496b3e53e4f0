//! Per-execution state.
//!
//! A [`ScriptContext`] owns everything a running script can change:
//! - a stack of global scope layers (layer 0 holds natives)
//! - one activation per active function call, each with its own scope stack
//! - the return-value stack and the pending [`ControlFlags`]
//! - the class registry and the stack of objects being realized
//!
//! Programs are immutable and can be run against any number of contexts.
//!
//! # Name resolution
//!
//! A name is looked up in the current activation's scopes (innermost first),
//! then among the members of the current receiver, then in the global layers
//! (topmost first). A name declared `global` in the activation skips straight
//! to the globals. A write to a missing name creates it in the innermost
//! scope; directly inside a realization body it becomes a field of the
//! realized object, and at the script root it becomes a global.

mod builder;
mod flags;
mod scope;

use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;
use velox_ir::{Name, SharedInterner};
use velox_parse::Program;

pub use builder::{ScriptContextBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use flags::ControlFlags;
pub use scope::{Scope, ScopeKind};

use scope::{Activation, RealizeTarget};

use crate::errors::{
    not_callable, recursion_limit_exceeded, unknown_identifier, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::print_handler::SharedPrintHandler;
use crate::value::{FunctionBody, FunctionParam, FunctionValue, Item, ItemState, ObjectRef, ObjectType};

/// Execution state for Velox scripts.
pub struct ScriptContext {
    interner: SharedInterner,
    globals: Vec<Scope>,
    root: Activation,
    calls: Vec<Activation>,
    returns: Vec<Item>,
    flags: ControlFlags,
    classes: FxHashMap<Name, Rc<ObjectType>>,
    instants: Vec<RealizeTarget>,
    print_handler: SharedPrintHandler,
    max_call_depth: usize,
}

impl ScriptContext {
    /// Context with builtins and stdout printing.
    pub fn new(interner: SharedInterner) -> Self {
        Self::builder(interner).build()
    }

    pub fn builder(interner: SharedInterner) -> ScriptContextBuilder {
        ScriptContextBuilder::new(interner)
    }

    fn with_parts(
        interner: SharedInterner,
        print_handler: SharedPrintHandler,
        max_call_depth: usize,
    ) -> Self {
        ScriptContext {
            interner,
            globals: vec![Scope::new(ScopeKind::Global), Scope::new(ScopeKind::Global)],
            root: Activation::default(),
            calls: Vec::new(),
            returns: Vec::new(),
            flags: ControlFlags::empty(),
            classes: FxHashMap::default(),
            instants: Vec::new(),
            print_handler,
            max_call_depth,
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Number of script or native calls currently active.
    pub fn call_depth(&self) -> usize {
        self.calls.len()
    }

    // Running

    /// Execute a program's top-level statements.
    ///
    /// Returns the value of a top-level `return`, or `undefined`. Globals,
    /// classes and instants defined by the program stay in the context.
    pub fn run(&mut self, program: &Program) -> EvalResult<Item> {
        debug!(statements = program.statements().len(), "running program");
        self.returns.push(Item::undefined());
        let result = Interpreter::new(self, program.arena.clone()).exec_stmt(program.root);
        let value = self.returns.pop().unwrap_or_default();
        self.flags = ControlFlags::empty();
        result.map(|()| value)
    }

    /// Call a script or native function bound to `name`.
    pub fn call(&mut self, name: &str, args: Vec<Item>) -> EvalResult<Item> {
        let key = self.interner.intern(name);
        let callee = self.lookup(key).ok_or_else(|| unknown_identifier(name))?;
        self.call_item(&callee, args)
    }

    /// Call a function item with already-evaluated arguments.
    pub fn call_item(&mut self, callee: &Item, args: Vec<Item>) -> EvalResult<Item> {
        let Some(function) = callee.as_function() else {
            return Err(not_callable(callee.kind()));
        };
        let arena = match &function.body {
            FunctionBody::Script { arena, .. } => arena.clone(),
            FunctionBody::Native(_) => velox_ir::SharedArena::default(),
        };
        Interpreter::new(self, arena).call_function(&function, args, None)
    }

    /// Forget everything the scripts defined. Natives are kept.
    pub fn reset(&mut self) {
        debug!("resetting script context");
        self.globals.truncate(1);
        self.globals.push(Scope::new(ScopeKind::Global));
        self.root = Activation::default();
        self.calls.clear();
        self.returns.clear();
        self.flags = ControlFlags::empty();
        self.classes.clear();
        self.instants.clear();
    }

    // Natives

    /// Install a native function in the builtin layer.
    ///
    /// The callback reads its arguments by parameter name with
    /// [`argument`](Self::argument); missing arguments are `undefined`.
    pub fn register_native<F>(&mut self, name: &str, params: &[&str], callback: F)
    where
        F: Fn(&mut ScriptContext) -> EvalResult<Item> + 'static,
    {
        let key = self.interner.intern(name);
        let params: SmallVec<[FunctionParam; 4]> = params
            .iter()
            .map(|param| FunctionParam {
                name: self.interner.intern(param),
                default: None,
            })
            .collect();
        let function = FunctionValue::new(
            key,
            self.interner.lookup(key),
            params,
            FunctionBody::Native(Rc::new(callback)),
        );
        debug!(name, "registering native function");
        self.globals[0].insert(key, Item::new(ItemState::Function(Rc::new(function))));
    }

    /// Argument of the native function currently executing.
    pub fn argument(&self, name: &str) -> EvalResult<Item> {
        let key = self.interner.intern(name);
        self.frame()
            .scopes
            .first()
            .and_then(|scope| scope.get(key))
            .ok_or_else(|| unknown_identifier(name))
    }

    // Control flags

    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ControlFlags) {
        self.flags.insert(flags);
    }

    pub fn clear_flags(&mut self, flags: ControlFlags) {
        self.flags.remove(flags);
    }

    // Scopes

    fn frame(&self) -> &Activation {
        self.calls.last().unwrap_or(&self.root)
    }

    fn frame_mut(&mut self) -> &mut Activation {
        self.calls.last_mut().unwrap_or(&mut self.root)
    }

    fn top_global_mut(&mut self) -> &mut Scope {
        let top = self.globals.len() - 1;
        &mut self.globals[top]
    }

    /// Open a code-block scope in the current activation.
    pub fn push_scope(&mut self) {
        self.frame_mut().scopes.push(Scope::new(ScopeKind::Block));
    }

    pub fn pop_scope(&mut self) {
        self.frame_mut().scopes.pop();
    }

    /// Open a new global layer; globals defined from now on land in it.
    pub fn push_global_layer(&mut self) {
        self.globals.push(Scope::new(ScopeKind::Global));
    }

    /// Drop the topmost global layer. The builtin and base layers stay.
    pub fn pop_global_layer(&mut self) {
        if self.globals.len() > 2 {
            self.globals.pop();
        }
    }

    pub fn global_layers(&self) -> usize {
        self.globals.len()
    }

    /// Enter a call; fails when the depth limit is reached.
    pub(crate) fn push_frame(&mut self, receiver: Option<ObjectRef>) -> EvalResult<()> {
        if self.calls.len() >= self.max_call_depth {
            return Err(recursion_limit_exceeded(self.max_call_depth));
        }
        self.calls.push(Activation::call(receiver));
        self.returns.push(Item::undefined());
        Ok(())
    }

    pub(crate) fn pop_frame(&mut self) {
        self.calls.pop();
        self.returns.pop();
    }

    /// Bind a parameter in the current call's function scope.
    pub(crate) fn bind_parameter(&mut self, name: Name, item: Item) {
        if let Some(scope) = self.frame_mut().scopes.first_mut() {
            scope.insert(name, item);
        }
    }

    // Names

    /// Resolve a name for reading.
    pub fn lookup(&self, name: Name) -> Option<Item> {
        self.resolve(name, true)
    }

    /// Resolve a name in the global layers only.
    pub fn global(&self, name: &str) -> Option<Item> {
        self.lookup_global(self.interner.intern(name))
    }

    fn lookup_global(&self, name: Name) -> Option<Item> {
        self.globals.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Resolve a name for a call. A callee found among the receiver's
    /// members is returned with that receiver, so it runs as a method.
    pub(crate) fn lookup_callee(&self, name: Name) -> Option<(Item, Option<ObjectRef>)> {
        self.resolve_with_owner(name, true)
    }

    fn resolve(&self, name: Name, with_methods: bool) -> Option<Item> {
        self.resolve_with_owner(name, with_methods)
            .map(|(item, _)| item)
    }

    /// Class methods are visible to reads only; a write never lands in a class.
    fn resolve_with_owner(
        &self,
        name: Name,
        with_methods: bool,
    ) -> Option<(Item, Option<ObjectRef>)> {
        let frame = self.frame();
        if !frame.declares_global(name) {
            if let Some(item) = frame.find(name) {
                return Some((item, None));
            }
            if let Some(receiver) = self.receiver() {
                let member = if with_methods {
                    receiver.member(name)
                } else {
                    receiver.field(name)
                };
                if let Some(item) = member {
                    return Some((item, Some(receiver)));
                }
            }
        }
        self.lookup_global(name).map(|item| (item, None))
    }

    /// Resolve an existing name that is about to be written.
    pub(crate) fn lookup_writable(&self, name: Name) -> Option<Item> {
        self.resolve(name, false)
    }

    /// Resolve a name for writing, creating it as `undefined` if missing.
    pub fn lookup_or_create(&mut self, name: Name) -> Item {
        if let Some(item) = self.lookup_writable(name) {
            return item;
        }
        let item = Item::undefined();
        self.declare(name, item.clone());
        item
    }

    /// Bind `name` in the scope a new definition belongs to, shadowing
    /// outer bindings.
    pub fn declare(&mut self, name: Name, item: Item) {
        let depth = self.calls.len();
        let scope_depth = self.frame().scopes.len();
        if self.frame().declares_global(name) {
            self.top_global_mut().insert(name, item);
            return;
        }
        if let Some(target) = self
            .instants
            .last()
            .filter(|t| t.frame == depth && t.scope_depth == scope_depth)
        {
            target.object.set_field(name, item);
            return;
        }
        match self.frame_mut().scopes.last_mut() {
            Some(scope) => scope.insert(name, item),
            None => self.top_global_mut().insert(name, item),
        }
    }

    /// Bind `name` in the topmost global layer.
    pub fn define_global(&mut self, name: Name, item: Item) {
        self.top_global_mut().insert(name, item);
    }

    /// Route reads and writes of `name` in this activation to the globals.
    pub fn declare_global_name(&mut self, name: Name) {
        if let Some(scope) = self.frame_mut().scopes.last_mut() {
            scope.declare_global(name);
        }
    }

    // Receivers and realization

    /// The object `this` refers to: the innermost realization running in
    /// this activation, else the method receiver.
    pub fn receiver(&self) -> Option<ObjectRef> {
        let depth = self.calls.len();
        match self.instants.last() {
            Some(target) if target.frame == depth => Some(target.object.clone()),
            _ => self.frame().receiver.clone(),
        }
    }

    pub(crate) fn push_realize_target(&mut self, object: ObjectRef) {
        let target = RealizeTarget {
            object,
            frame: self.calls.len(),
            scope_depth: self.frame().scopes.len(),
        };
        self.instants.push(target);
    }

    pub(crate) fn pop_realize_target(&mut self) {
        self.instants.pop();
    }

    // Return values

    /// Store the value of the innermost executing `return`.
    pub fn set_return_value(&mut self, item: Item) {
        if let Some(slot) = self.returns.last_mut() {
            *slot = item;
        }
    }

    /// Value stored by the innermost `return` so far.
    pub fn return_value(&self) -> Item {
        self.returns.last().cloned().unwrap_or_default()
    }

    // Classes

    pub fn register_class(&mut self, class: Rc<ObjectType>) {
        debug!(
            class = class.display_name(),
            methods = class.method_count(),
            "registering class"
        );
        self.classes.insert(class.name(), class);
    }

    pub fn class(&self, name: Name) -> Option<Rc<ObjectType>> {
        self.classes.get(&name).cloned()
    }

    // Temporaries

    fn current_scope_mut(&mut self) -> &mut Scope {
        if self.frame().scopes.is_empty() {
            return self.top_global_mut();
        }
        let frame = self.frame_mut();
        let top = frame.scopes.len() - 1;
        &mut frame.scopes[top]
    }

    /// Keep `item` alive until the current statement completes.
    pub fn hold(&mut self, item: Item) {
        self.current_scope_mut().hold(item);
    }

    pub(crate) fn temporaries_mark(&mut self) -> usize {
        self.current_scope_mut().temporaries()
    }

    pub(crate) fn release_temporaries(&mut self, mark: usize) {
        self.current_scope_mut().release(mark);
    }
}

impl std::fmt::Debug for ScriptContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptContext")
            .field("global_layers", &self.globals.len())
            .field("call_depth", &self.calls.len())
            .field("flags", &self.flags)
            .field("classes", &self.classes.len())
            .finish_non_exhaustive()
    }
}
