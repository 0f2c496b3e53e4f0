//! Definitions and realization.
//!
//! `function`, `class` and `instant` bind their name in the scope that is
//! current when the enclosing statement list is prepared. Inside an
//! `instant` body or a realization (`Name { ... }`) that scope is the object
//! itself, so nested definitions become its members.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;
use velox_ir::{Name, ParamRange, StmtId, StmtKind, StmtRange};

use super::Interpreter;
use crate::errors::{not_an_object, EvalResult};
use crate::value::{
    FunctionBody, FunctionParam, FunctionValue, Item, ItemState, ObjectRef, ObjectType,
};

/// Whether parameter defaults are evaluated while building a definition.
///
/// Hoisting binds a definition before any statement of its list has run,
/// so its defaults stay pending until the definition itself is executed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Defaults {
    Pending,
    Evaluate,
}

impl Interpreter<'_> {
    /// Build a script function. Each default is evaluated at most once per
    /// definition; a pending default binds `undefined`.
    fn build_function(
        &mut self,
        name: Name,
        params: ParamRange,
        body: StmtId,
        defaults: Defaults,
    ) -> EvalResult<FunctionValue> {
        let arena = self.arena.clone();
        let mut formal: SmallVec<[FunctionParam; 4]> = SmallVec::new();
        for param in arena.get_params(params) {
            let default = match param.default {
                Some(expr) if defaults == Defaults::Evaluate => {
                    Some(self.eval_expr(expr)?.deep_copy())
                }
                _ => None,
            };
            formal.push(FunctionParam {
                name: param.name,
                default,
            });
        }
        Ok(FunctionValue::new(
            name,
            self.name_str(name),
            formal,
            FunctionBody::Script { arena, body },
        ))
    }

    pub(crate) fn has_defaults(&self, params: ParamRange) -> bool {
        self.arena
            .get_params(params)
            .iter()
            .any(|param| param.default.is_some())
    }

    pub(crate) fn methods_have_defaults(&self, methods: StmtRange) -> bool {
        self.arena.get_stmt_list(methods).iter().any(|&id| {
            matches!(
                self.arena.get_stmt(id).kind,
                StmtKind::Function { params, .. } if self.has_defaults(params)
            )
        })
    }

    pub(crate) fn define_function(
        &mut self,
        name: Name,
        params: ParamRange,
        body: StmtId,
        defaults: Defaults,
    ) -> EvalResult<()> {
        let function = self.build_function(name, params, body, defaults)?;
        self.ctx
            .declare(name, Item::new(ItemState::Function(Rc::new(function))));
        Ok(())
    }

    /// Register a class and bind its name.
    pub(crate) fn define_class(
        &mut self,
        name: Name,
        methods: StmtRange,
        defaults: Defaults,
    ) -> EvalResult<()> {
        let arena = self.arena.clone();
        let mut table = FxHashMap::default();
        for &id in arena.get_stmt_list(methods) {
            let stmt = arena.get_stmt(id);
            if let StmtKind::Function {
                name: method,
                params,
                body,
            } = stmt.kind
            {
                let function = self
                    .build_function(method, params, body, defaults)
                    .map_err(|e| e.at(stmt.span))?;
                table.insert(method, Rc::new(function));
            }
        }
        let class = Rc::new(ObjectType::new(name, self.name_str(name), table));
        self.ctx.register_class(Rc::clone(&class));
        self.ctx.declare(name, Item::new(ItemState::Class(class)));
        Ok(())
    }

    /// Bind an `instant` to an empty object and hoist its nested definitions.
    pub(crate) fn define_instant(&mut self, name: Name, body: StmtRange) -> EvalResult<()> {
        debug!(instant = self.name_str(name), "defining instant");
        let object = ObjectRef::new(None);
        self.ctx.declare(name, Item::object(object.clone()));
        let arena = self.arena.clone();
        let mut scoped = self.realizing(object);
        for &id in arena.get_stmt_list(body) {
            scoped.prepare_stmt(id)?;
        }
        Ok(())
    }

    /// Run the member statements of a prepared `instant`.
    pub(crate) fn exec_instant_body(&mut self, name: Name, body: StmtRange) -> EvalResult<()> {
        let object = self.realization_target(name)?;
        let arena = self.arena.clone();
        let mut scoped = self.realizing(object);
        scoped.exec_prepared(arena.get_stmt_list(body))
    }

    /// `Name { ... }`: add or update members of the object bound to `Name`,
    /// creating the object if the name is unbound or `undefined`.
    pub(crate) fn exec_realize(&mut self, name: Name, body: StmtRange) -> EvalResult<()> {
        let object = self.realization_target(name)?;
        let arena = self.arena.clone();
        let mut scoped = self.realizing(object);
        let stmts = arena.get_stmt_list(body);
        for &id in stmts {
            scoped.prepare_stmt(id)?;
        }
        scoped.exec_prepared(stmts)
    }

    fn realization_target(&mut self, name: Name) -> EvalResult<ObjectRef> {
        let item = self.ctx.lookup_or_create(name);
        if item.is_undefined() {
            item.set(ItemState::Object(ObjectRef::new(None)));
        }
        item.as_object()
            .ok_or_else(|| not_an_object(self.name_str(name), item.kind()))
    }
}
