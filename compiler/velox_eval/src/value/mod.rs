//! Run-time values.
//!
//! Every storage location (variable, parameter, field, list element) is an
//! [`Item`]: a shared, mutable cell around an [`ItemState`]. Cloning an
//! `Item` aliases the cell; [`Item::assign`] overwrites the state in place,
//! so every alias observes the write. Objects and lists inside a state are
//! handles themselves, which gives script code reference semantics for
//! them.
//!
//! Items are single-threaded (`Rc`/`RefCell`); a script context never
//! crosses threads.

mod color;
mod function;
mod object;
mod vector;

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

pub use color::Color;
pub use function::{FunctionBody, FunctionParam, FunctionValue, NativeFn};
pub use object::{new_list, ListRef, ObjectRef, ObjectType};
pub use vector::Vector2;

use crate::errors::{invalid_conversion, EvalResult};

/// Discriminant of an [`ItemState`], used in error messages and `typeOf`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Boolean,
    Integer,
    Real,
    String,
    Color,
    Vector,
    List,
    Function,
    Object,
    Class,
}

impl ValueKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::String => "string",
            Self::Color => "color",
            Self::Vector => "vector",
            Self::List => "list",
            Self::Function => "function",
            Self::Object => "object",
            Self::Class => "class",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value held by an [`Item`].
#[derive(Clone, Default)]
pub enum ItemState {
    #[default]
    Undefined,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(Rc<str>),
    Color(Color),
    Vector(Vector2),
    List(ListRef),
    Function(Rc<FunctionValue>),
    Object(ObjectRef),
    Class(Rc<ObjectType>),
}

impl ItemState {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Integer(_) => ValueKind::Integer,
            Self::Real(_) => ValueKind::Real,
            Self::String(_) => ValueKind::String,
            Self::Color(_) => ValueKind::Color,
            Self::Vector(_) => ValueKind::Vector,
            Self::List(_) => ValueKind::List,
            Self::Function(_) => ValueKind::Function,
            Self::Object(_) => ValueKind::Object,
            Self::Class(_) => ValueKind::Class,
        }
    }

    /// Integer coercion: integers as-is, reals truncated toward zero.
    pub fn to_integer(&self) -> EvalResult<i64> {
        match self {
            Self::Integer(i) => Ok(*i),
            #[expect(
                clippy::cast_possible_truncation,
                reason = "saturating truncation toward zero is the conversion"
            )]
            Self::Real(r) => Ok(*r as i64),
            other => Err(invalid_conversion(other.kind(), "integer")),
        }
    }

    pub fn to_real(&self) -> EvalResult<f64> {
        match self {
            #[expect(
                clippy::cast_precision_loss,
                reason = "integers beyond 2^53 round to the nearest real"
            )]
            Self::Integer(i) => Ok(*i as f64),
            Self::Real(r) => Ok(*r),
            other => Err(invalid_conversion(other.kind(), "real")),
        }
    }

    /// Truth value: booleans as-is, integers when non-zero.
    pub fn to_boolean(&self) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            Self::Integer(i) => Ok(*i != 0),
            other => Err(invalid_conversion(other.kind(), "boolean")),
        }
    }

    fn deep_copy(&self, seen: &mut FxHashMap<*const (), ItemState>) -> ItemState {
        match self {
            Self::List(list) => {
                let key: *const () = Rc::as_ptr(list).cast();
                if let Some(done) = seen.get(&key) {
                    return done.clone();
                }
                let copy = new_list(Vec::new());
                seen.insert(key, Self::List(Rc::clone(&copy)));
                let source: Vec<Item> = list.borrow().clone();
                let items = source
                    .iter()
                    .map(|item| Item::new(item.state().deep_copy(seen)))
                    .collect();
                *copy.borrow_mut() = items;
                Self::List(copy)
            }
            Self::Object(object) => {
                let key = object.addr();
                if let Some(done) = seen.get(&key) {
                    return done.clone();
                }
                let copy = ObjectRef::new(object.class().cloned());
                seen.insert(key, Self::Object(copy.clone()));
                for (name, item) in object.fields() {
                    let field = Item::new(item.state().deep_copy(seen));
                    copy.set_field(name, field);
                }
                Self::Object(copy)
            }
            other => other.clone(),
        }
    }

    fn write_display(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => f.write_str(&format_real(*r)),
            Self::String(s) => f.write_str(s),
            Self::Color(c) => write!(f, "{c}"),
            Self::Vector(v) => write!(f, "{v}"),
            Self::List(_) if depth >= MAX_DISPLAY_DEPTH => f.write_str("[...]"),
            Self::List(list) => {
                f.write_str("[")?;
                for (i, item) in list.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.state().write_display(f, depth + 1)?;
                }
                f.write_str("]")
            }
            Self::Function(func) => write!(f, "<function {}>", func.display_name()),
            Self::Object(object) => match object.class() {
                Some(class) => write!(f, "<{} object>", class.display_name()),
                None => f.write_str("<object>"),
            },
            Self::Class(class) => write!(f, "<class {}>", class.display_name()),
        }
    }
}

const MAX_DISPLAY_DEPTH: usize = 16;

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_display(f, 0)
    }
}

impl fmt::Debug for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "String({s:?})"),
            Self::List(list) => f.debug_tuple("List").field(&list.borrow()).finish(),
            Self::Function(func) => write!(f, "{func:?}"),
            Self::Object(object) => write!(f, "{object:?}"),
            Self::Class(class) => write!(f, "{class:?}"),
            Self::Undefined => f.write_str("Undefined"),
            other => write!(f, "{:?}({other})", other.kind()),
        }
    }
}

/// Format a real so that it always reads back as a real: `1.0`, not `1`.
pub fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// A shared, mutable storage cell.
#[derive(Clone, Default)]
pub struct Item(Rc<RefCell<ItemState>>);

impl Item {
    pub fn new(state: ItemState) -> Self {
        Item(Rc::new(RefCell::new(state)))
    }

    pub fn undefined() -> Self {
        Self::new(ItemState::Undefined)
    }

    pub fn string(s: &str) -> Self {
        Self::new(ItemState::String(Rc::from(s)))
    }

    pub fn list(items: Vec<Item>) -> Self {
        Self::new(ItemState::List(new_list(items)))
    }

    pub fn object(object: ObjectRef) -> Self {
        Self::new(ItemState::Object(object))
    }

    /// Borrow the current state.
    ///
    /// The borrow must end before the item is written again.
    pub fn state(&self) -> Ref<'_, ItemState> {
        self.0.borrow()
    }

    pub fn kind(&self) -> ValueKind {
        self.state().kind()
    }

    pub fn is_undefined(&self) -> bool {
        matches!(*self.state(), ItemState::Undefined)
    }

    /// Replace the state in place; every alias sees the new value.
    pub fn set(&self, state: ItemState) {
        *self.0.borrow_mut() = state;
    }

    /// Copy `source`'s state into this cell.
    pub fn assign(&self, source: &Item) {
        if self.ptr_eq(source) {
            return;
        }
        let state = source.state().clone();
        self.set(state);
    }

    pub fn ptr_eq(&self, other: &Item) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// A fresh cell holding the same state. Object and list handles stay shared.
    #[must_use]
    pub fn detached(&self) -> Item {
        Item::new(self.state().clone())
    }

    /// A fully independent duplicate: lists and objects are copied
    /// recursively, preserving any cycles among them.
    #[must_use]
    pub fn deep_copy(&self) -> Item {
        let mut seen = FxHashMap::default();
        let state = self.state().deep_copy(&mut seen);
        Item::new(state)
    }

    pub fn to_integer(&self) -> EvalResult<i64> {
        self.state().to_integer()
    }

    pub fn to_real(&self) -> EvalResult<f64> {
        self.state().to_real()
    }

    pub fn to_boolean(&self) -> EvalResult<bool> {
        self.state().to_boolean()
    }

    pub fn as_object(&self) -> Option<ObjectRef> {
        match &*self.state() {
            ItemState::Object(object) => Some(object.clone()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<ListRef> {
        match &*self.state() {
            ItemState::List(list) => Some(Rc::clone(list)),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<Rc<FunctionValue>> {
        match &*self.state() {
            ItemState::Function(func) => Some(Rc::clone(func)),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.state(), f)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.state(), f)
    }
}

impl From<ItemState> for Item {
    fn from(state: ItemState) -> Self {
        Item::new(state)
    }
}

impl From<bool> for Item {
    fn from(value: bool) -> Self {
        Item::new(ItemState::Boolean(value))
    }
}

impl From<i64> for Item {
    fn from(value: i64) -> Self {
        Item::new(ItemState::Integer(value))
    }
}

impl From<f64> for Item {
    fn from(value: f64) -> Self {
        Item::new(ItemState::Real(value))
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Item::string(value)
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Item::new(ItemState::String(Rc::from(value)))
    }
}

impl From<Color> for Item {
    fn from(value: Color) -> Self {
        Item::new(ItemState::Color(value))
    }
}

impl From<Vector2> for Item {
    fn from(value: Vector2) -> Self {
        Item::new(ItemState::Vector(value))
    }
}

#[cfg(test)]
mod tests;
