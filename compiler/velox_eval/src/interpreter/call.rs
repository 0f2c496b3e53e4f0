//! Function calls and object construction.

use std::rc::Rc;

use tracing::trace;
use velox_ir::{ExprId, ExprKind, ExprRange, Name};

use super::Interpreter;
use crate::context::ControlFlags;
use crate::errors::{not_callable, too_many_parameters, unknown_class, unknown_field, EvalResult};
use crate::value::{FunctionBody, FunctionValue, Item, ItemState, ObjectRef, ValueKind};

impl Interpreter<'_> {
    pub(crate) fn eval_call(&mut self, callee: ExprId, args: ExprRange) -> EvalResult<Item> {
        let (function, receiver) = self.resolve_callee(callee)?;
        let args = self.eval_args(args)?;
        self.call_function(&function, args, receiver)
    }

    /// Find the function a call expression names, and the receiver it
    /// runs against when called as a method.
    fn resolve_callee(
        &mut self,
        callee: ExprId,
    ) -> EvalResult<(Rc<FunctionValue>, Option<ObjectRef>)> {
        let expr = self.arena.get_expr(callee);
        let span = expr.span;
        let kind = expr.kind.clone();
        let (item, receiver) = match kind {
            // `obj.method(...)`
            ExprKind::Member { receiver, name } => {
                let target = self.eval_expr(receiver)?;
                match target.as_object() {
                    Some(object) => {
                        let method = object.member(name).ok_or_else(|| {
                            unknown_field(self.name_str(name), ValueKind::Object).at(span)
                        })?;
                        (method, Some(object))
                    }
                    None => return Err(not_callable(target.kind()).at(span)),
                }
            }
            // `method(...)` inside a method body may name a sibling member.
            ExprKind::Ident(name) => match self.ctx.lookup_callee(name) {
                Some(found) => found,
                None => (self.eval_expr(callee)?, None),
            },
            _ => (self.eval_expr(callee)?, None),
        };
        let function = item
            .as_function()
            .ok_or_else(|| not_callable(item.kind()).at(span))?;
        Ok((function, receiver))
    }

    /// Call `function` with evaluated arguments.
    ///
    /// Arguments are bound by reference: a parameter aliases the item the
    /// caller passed. Omitted parameters get a fresh copy of their default,
    /// or `undefined`.
    pub(crate) fn call_function(
        &mut self,
        function: &Rc<FunctionValue>,
        args: Vec<Item>,
        receiver: Option<ObjectRef>,
    ) -> EvalResult<Item> {
        if args.len() > function.arity() {
            return Err(too_many_parameters(
                function.display_name(),
                function.arity(),
                args.len(),
            ));
        }
        trace!(
            function = function.display_name(),
            depth = self.ctx.call_depth(),
            "call"
        );

        let mut frame = self.enter_call(receiver)?;
        let mut args = args.into_iter();
        for param in &function.params {
            let item = match args.next() {
                Some(arg) => arg,
                None => param
                    .default
                    .as_ref()
                    .map_or_else(Item::undefined, Item::deep_copy),
            };
            frame.ctx.bind_parameter(param.name, item);
        }

        match &function.body {
            FunctionBody::Script { arena, body } => {
                let caller_arena = std::mem::replace(&mut frame.arena, arena.clone());
                let result = frame.exec_stmt(*body);
                frame.arena = caller_arena;
                result?;
            }
            FunctionBody::Native(callback) => {
                let value = callback(&mut *frame.ctx)?;
                frame.ctx.set_return_value(value);
            }
        }
        frame.ctx.clear_flags(ControlFlags::RETURN_EXECUTED);
        Ok(frame.ctx.return_value())
    }

    /// `new Class(args)`: a fresh instance, initialized by the method named
    /// after the class when there is one.
    pub(crate) fn eval_new(&mut self, class: Name, args: ExprRange) -> EvalResult<Item> {
        let Some(class_type) = self.ctx.class(class) else {
            return Err(unknown_class(self.name_str(class)));
        };
        let args = self.eval_args(args)?;
        let object = ObjectRef::new(Some(Rc::clone(&class_type)));
        match class_type.constructor() {
            Some(constructor) => {
                let constructor = Rc::clone(constructor);
                self.call_function(&constructor, args, Some(object.clone()))?;
            }
            None if !args.is_empty() => {
                return Err(too_many_parameters(
                    class_type.display_name(),
                    0,
                    args.len(),
                ));
            }
            None => {}
        }
        let instance = Item::new(ItemState::Object(object));
        self.ctx.hold(instance.clone());
        Ok(instance)
    }
}
