//! Name scopes and call activations.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use velox_ir::Name;

use crate::{Item, ObjectRef};

/// What introduced a scope.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ScopeKind {
    /// A layer of the global scope stack.
    Global,
    /// Parameters and top-level locals of a function call.
    Function,
    /// A `{ ... }` block or a loop.
    Block,
}

/// A single lexical scope.
///
/// The enclosing scope is the previous entry in the owning stack; lookups
/// walk outward from the innermost entry.
#[derive(Debug)]
pub struct Scope {
    kind: ScopeKind,
    bindings: FxHashMap<Name, Item>,
    /// Names declared `global` while this scope was innermost.
    global_names: SmallVec<[Name; 2]>,
    /// Temporaries kept alive until the current statement finishes.
    anonymous: Vec<Item>,
}

impl Scope {
    pub fn new(kind: ScopeKind) -> Self {
        Scope {
            kind,
            bindings: FxHashMap::default(),
            global_names: SmallVec::new(),
            anonymous: Vec::new(),
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn get(&self, name: Name) -> Option<Item> {
        self.bindings.get(&name).cloned()
    }

    pub fn contains(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Bind `name`, replacing any binding of the same name in this scope.
    pub fn insert(&mut self, name: Name, item: Item) {
        self.bindings.insert(name, item);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn declare_global(&mut self, name: Name) {
        if !self.global_names.contains(&name) {
            self.global_names.push(name);
        }
    }

    pub(crate) fn declares_global(&self, name: Name) -> bool {
        self.global_names.contains(&name)
    }

    pub(crate) fn hold(&mut self, item: Item) {
        self.anonymous.push(item);
    }

    pub(crate) fn temporaries(&self) -> usize {
        self.anonymous.len()
    }

    pub(crate) fn release(&mut self, mark: usize) {
        self.anonymous.truncate(mark);
    }
}

/// Scopes and receiver of one function call (or of the script root).
#[derive(Debug, Default)]
pub(crate) struct Activation {
    pub(crate) scopes: Vec<Scope>,
    /// `this` for method calls.
    pub(crate) receiver: Option<ObjectRef>,
}

impl Activation {
    pub(crate) fn call(receiver: Option<ObjectRef>) -> Self {
        Activation {
            scopes: vec![Scope::new(ScopeKind::Function)],
            receiver,
        }
    }

    pub(crate) fn declares_global(&self, name: Name) -> bool {
        self.scopes.iter().any(|scope| scope.declares_global(name))
    }

    pub(crate) fn find(&self, name: Name) -> Option<Item> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

/// Object that an `instant` body or a realization is writing into.
#[derive(Debug)]
pub(crate) struct RealizeTarget {
    pub(crate) object: ObjectRef,
    /// Activation the body runs in (0 is the script root).
    pub(crate) frame: usize,
    /// Scope depth of that activation when the body started; blocks
    /// nested inside the body get ordinary locals.
    pub(crate) scope_depth: usize,
}
