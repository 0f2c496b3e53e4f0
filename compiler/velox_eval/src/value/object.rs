//! Objects, classes and lists.
//!
//! Objects and lists are shared handles: assigning one copies the handle,
//! so both names observe later member writes. [`Item::deep_copy`] is the
//! only way to detach them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use velox_ir::Name;

use super::{FunctionValue, Item, ItemState};

/// Shared, growable list of items.
pub type ListRef = Rc<RefCell<Vec<Item>>>;

pub fn new_list(items: Vec<Item>) -> ListRef {
    Rc::new(RefCell::new(items))
}

/// A class declared with `class Name { ... }`.
pub struct ObjectType {
    name: Name,
    display_name: &'static str,
    methods: FxHashMap<Name, Rc<FunctionValue>>,
}

impl ObjectType {
    pub fn new(
        name: Name,
        display_name: &'static str,
        methods: FxHashMap<Name, Rc<FunctionValue>>,
    ) -> Self {
        ObjectType {
            name,
            display_name,
            methods,
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    pub fn method(&self, name: Name) -> Option<&Rc<FunctionValue>> {
        self.methods.get(&name)
    }

    /// The method named after the class, if declared.
    pub fn constructor(&self) -> Option<&Rc<FunctionValue>> {
        self.method(self.name)
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.display_name)
            .field("methods", &self.methods.len())
            .finish()
    }
}

struct ObjectValue {
    class: Option<Rc<ObjectType>>,
    fields: RefCell<FxHashMap<Name, Item>>,
}

/// Handle to a live object: a class instance or an `instant`.
#[derive(Clone)]
pub struct ObjectRef(Rc<ObjectValue>);

impl ObjectRef {
    pub fn new(class: Option<Rc<ObjectType>>) -> Self {
        ObjectRef(Rc::new(ObjectValue {
            class,
            fields: RefCell::new(FxHashMap::default()),
        }))
    }

    pub fn class(&self) -> Option<&Rc<ObjectType>> {
        self.0.class.as_ref()
    }

    /// An instance field, aliased.
    pub fn field(&self, name: Name) -> Option<Item> {
        self.0.fields.borrow().get(&name).cloned()
    }

    /// A class method, wrapped in a fresh item.
    pub fn method(&self, name: Name) -> Option<Item> {
        let method = self.class()?.method(name)?;
        Some(Item::new(ItemState::Function(Rc::clone(method))))
    }

    /// Read lookup: instance fields shadow class methods.
    pub fn member(&self, name: Name) -> Option<Item> {
        self.field(name).or_else(|| self.method(name))
    }

    /// Write lookup: the named field, created as `undefined` if missing.
    pub fn field_or_insert(&self, name: Name) -> Item {
        self.0
            .fields
            .borrow_mut()
            .entry(name)
            .or_insert_with(Item::undefined)
            .clone()
    }

    /// Bind `name` to `item`, replacing any previous field.
    pub fn set_field(&self, name: Name, item: Item) {
        self.0.fields.borrow_mut().insert(name, item);
    }

    pub fn has_field(&self, name: Name) -> bool {
        self.0.fields.borrow().contains_key(&name)
    }

    pub fn field_count(&self) -> usize {
        self.0.fields.borrow().len()
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    /// Snapshot of the fields, for copying without holding the borrow.
    pub(crate) fn fields(&self) -> Vec<(Name, Item)> {
        self.0
            .fields
            .borrow()
            .iter()
            .map(|(name, item)| (*name, item.clone()))
            .collect()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("class", &self.class().map(|c| c.display_name()))
            .field("fields", &self.field_count())
            .finish()
    }
}
