//! Expression evaluation.
//!
//! Every expression evaluates to an [`Item`]. Names, members and list
//! elements evaluate to the storage cell itself, so a write through the
//! result lands in the variable. Operands of operators and receivers of
//! member and index access are always evaluated in read mode.

use velox_ir::{BinaryOp, ExprId, ExprKind, ExprRange, Name, UpdateOp};
use velox_stack::ensure_sufficient_stack;

use super::{Access, Interpreter};
use crate::errors::{
    index_out_of_bounds, read_only_member, this_outside_method, unknown_field,
    unknown_identifier, unsupported_binary, unsupported_unary, EvalResult,
};
use crate::operators;
use crate::value::{Color, Item, ItemState, ValueKind, Vector2};

impl Interpreter<'_> {
    /// Evaluate for the value.
    pub(crate) fn eval_expr(&mut self, id: ExprId) -> EvalResult<Item> {
        self.eval_access(id, Access::Read)
    }

    /// Evaluate as an assignment target.
    pub(crate) fn eval_location(&mut self, id: ExprId) -> EvalResult<Item> {
        self.eval_access(id, Access::Write)
    }

    /// Evaluate the target of a compound assignment or `++`/`--`.
    pub(crate) fn eval_modify_target(&mut self, id: ExprId) -> EvalResult<Item> {
        self.eval_access(id, Access::Modify)
    }

    fn eval_access(&mut self, id: ExprId, access: Access) -> EvalResult<Item> {
        ensure_sufficient_stack(|| {
            let expr = self.arena.get_expr(id);
            let span = expr.span;
            let kind = expr.kind.clone();
            self.eval_kind(kind, access).map_err(|e| e.at(span))
        })
    }

    fn eval_kind(&mut self, kind: ExprKind, access: Access) -> EvalResult<Item> {
        match kind {
            ExprKind::Int(value) => Ok(Item::from(value)),
            ExprKind::Real(bits) => Ok(Item::from(f64::from_bits(bits))),
            ExprKind::Str(name) => Ok(Item::string(self.name_str(name))),
            ExprKind::Bool(value) => Ok(Item::from(value)),
            ExprKind::Undefined => Ok(Item::undefined()),
            ExprKind::Color(components) => self.eval_color(components),
            ExprKind::Vector { x, y } => {
                let x = self.eval_expr(x)?.to_real()?;
                let y = self.eval_expr(y)?.to_real()?;
                Ok(Item::from(Vector2::new(x, y)))
            }
            ExprKind::List(elements) => {
                let items = self.eval_args(elements)?;
                Ok(Item::list(items.iter().map(Item::detached).collect()))
            }
            ExprKind::Ident(name) => self.eval_ident(name, access),
            ExprKind::This => self
                .ctx
                .receiver()
                .map(Item::object)
                .ok_or_else(this_outside_method),
            ExprKind::Member { receiver, name } => self.eval_member(receiver, name, access),
            ExprKind::Index { receiver, index } => self.eval_index(receiver, index, access),
            ExprKind::Call { callee, args } => self.eval_call(callee, args),
            ExprKind::New { class, args } => self.eval_new(class, args),
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                let result = operators::unary(op, &operand.state())?;
                Ok(Item::new(result))
            }
            ExprKind::Update {
                op,
                target,
                postfix,
            } => self.eval_update(op, target, postfix),
            ExprKind::Binary { op, left, right } => self.eval_binary(op, left, right),
        }
    }

    /// Evaluate argument or element expressions left to right.
    pub(crate) fn eval_args(&mut self, range: ExprRange) -> EvalResult<Vec<Item>> {
        let arena = self.arena.clone();
        arena
            .get_expr_list(range)
            .iter()
            .map(|&id| self.eval_expr(id))
            .collect()
    }

    fn eval_ident(&mut self, name: Name, access: Access) -> EvalResult<Item> {
        match access {
            Access::Read => self
                .ctx
                .lookup(name)
                .ok_or_else(|| unknown_identifier(self.name_str(name))),
            Access::Modify => self
                .ctx
                .lookup_writable(name)
                .ok_or_else(|| unknown_identifier(self.name_str(name))),
            Access::Write => Ok(self.ctx.lookup_or_create(name)),
        }
    }

    /// `|r,g,b|`, `|r,g,b,a|` or packed `|0xRRGGBB|`.
    fn eval_color(&mut self, components: ExprRange) -> EvalResult<Item> {
        let values = self
            .eval_args(components)?
            .iter()
            .map(Item::to_integer)
            .collect::<EvalResult<Vec<i64>>>()?;
        let color = match values[..] {
            [packed] => Color::from_packed(packed),
            [r, g, b] => Color::from_components(r, g, b, 255),
            [r, g, b, a] => Color::from_components(r, g, b, a),
            _ => Color::new(0, 0, 0, 255),
        };
        Ok(Item::from(color))
    }

    fn eval_member(&mut self, receiver: ExprId, name: Name, access: Access) -> EvalResult<Item> {
        let receiver = self.eval_expr(receiver)?;
        let field = self.name_str(name);
        let state = receiver.state().clone();
        match state {
            ItemState::Object(object) => match access {
                Access::Read => object
                    .member(name)
                    .ok_or_else(|| unknown_field(field, ValueKind::Object)),
                Access::Modify => object
                    .field(name)
                    .ok_or_else(|| unknown_field(field, ValueKind::Object)),
                Access::Write => Ok(object.field_or_insert(name)),
            },
            ItemState::Color(color) => {
                if access != Access::Read {
                    return Err(read_only_member(field, ValueKind::Color));
                }
                color
                    .component(field)
                    .map(|c| Item::from(i64::from(c)))
                    .ok_or_else(|| unknown_field(field, ValueKind::Color))
            }
            ItemState::Vector(vector) => {
                if access != Access::Read {
                    return Err(read_only_member(field, ValueKind::Vector));
                }
                vector
                    .component(field)
                    .map(Item::from)
                    .ok_or_else(|| unknown_field(field, ValueKind::Vector))
            }
            other => Err(unknown_field(field, other.kind())),
        }
    }

    fn eval_index(&mut self, receiver: ExprId, index: ExprId, access: Access) -> EvalResult<Item> {
        let receiver = self.eval_expr(receiver)?;
        let index = self.eval_expr(index)?.to_integer()?;
        let state = receiver.state().clone();
        match state {
            ItemState::List(list) => {
                let items = list.borrow();
                let element = usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .cloned();
                element.ok_or_else(|| index_out_of_bounds(index, items.len()))
            }
            ItemState::String(_) if access != Access::Read => {
                Err(read_only_member(&format!("[{index}]"), ValueKind::String))
            }
            ItemState::String(text) => usize::try_from(index)
                .ok()
                .and_then(|i| text.chars().nth(i))
                .map(|c| Item::from(c.to_string()))
                .ok_or_else(|| index_out_of_bounds(index, text.chars().count())),
            other => Err(unsupported_binary("[]", other.kind(), ValueKind::Integer)),
        }
    }

    /// `++x`, `x--` and friends. Only integers and reals can be stepped.
    fn eval_update(&mut self, op: UpdateOp, target: ExprId, postfix: bool) -> EvalResult<Item> {
        let target = self.eval_modify_target(target)?;
        let old = target.state().clone();
        if !matches!(old, ItemState::Integer(_) | ItemState::Real(_)) {
            return Err(unsupported_unary(op.as_symbol(), old.kind()));
        }
        let new = operators::arithmetic(op.binary_op(), &old, &ItemState::Integer(1))?;
        target.set(new.clone());
        Ok(Item::new(if postfix { old } else { new }))
    }

    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult<Item> {
        if op.is_logical() {
            let lhs = self.eval_expr(left)?.to_boolean()?;
            let short_circuit = match op {
                BinaryOp::And => !lhs,
                _ => lhs,
            };
            if short_circuit {
                return Ok(Item::from(lhs));
            }
            let rhs = self.eval_expr(right)?.to_boolean()?;
            return Ok(Item::from(rhs));
        }

        let lhs = self.eval_expr(left)?;
        let rhs = self.eval_expr(right)?;
        if op.is_relational() {
            let result = operators::relational(op, &lhs.state(), &rhs.state())?;
            Ok(Item::from(result))
        } else {
            let result = operators::arithmetic(op, &lhs.state(), &rhs.state())?;
            Ok(Item::new(result))
        }
    }
}
