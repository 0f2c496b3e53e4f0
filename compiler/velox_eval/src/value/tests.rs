#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use velox_ir::SharedInterner;

use super::*;

#[test]
fn assign_writes_through_aliases() {
    let a = Item::from(1i64);
    let alias = a.clone();
    a.assign(&Item::from("two"));
    assert_eq!(alias.to_string(), "two");
    assert!(a.ptr_eq(&alias));
}

#[test]
fn assign_copies_state_not_cell() {
    let a = Item::from(1i64);
    let b = Item::from(2i64);
    a.assign(&b);
    b.set(ItemState::Integer(3));
    assert_eq!(a.to_string(), "2");
    assert!(!a.ptr_eq(&b));
}

#[test]
fn self_assign_is_noop() {
    let a = Item::from(5i64);
    a.assign(&a.clone());
    assert_eq!(a.to_integer().unwrap(), 5);

    let u = Item::undefined();
    u.assign(&Item::undefined());
    assert!(u.is_undefined());
}

#[test]
fn assigned_lists_share_elements() {
    let list = Item::list(vec![Item::from(1i64)]);
    let other = Item::undefined();
    other.assign(&list);
    other.as_list().unwrap().borrow_mut().push(Item::from(2i64));
    assert_eq!(list.to_string(), "[1, 2]");
}

#[test]
fn deep_copy_detaches_nested_values() {
    let interner = SharedInterner::default();
    let field = interner.intern("v");

    let object = ObjectRef::new(None);
    object.set_field(field, Item::from(1i64));
    let list = Item::list(vec![Item::object(object.clone()), Item::from(2i64)]);

    let copy = list.deep_copy();
    object.field(field).unwrap().set(ItemState::Integer(99));
    list.as_list().unwrap().borrow()[1].set(ItemState::Integer(7));

    let copied = copy.as_list().unwrap();
    let copied_object = copied.borrow()[0].as_object().unwrap();
    assert_eq!(copied_object.field(field).unwrap().to_integer().unwrap(), 1);
    assert_eq!(copied.borrow()[1].to_integer().unwrap(), 2);
    assert!(!copied_object.ptr_eq(&object));
}

#[test]
fn deep_copy_preserves_cycles() {
    let interner = SharedInterner::default();
    let me = interner.intern("me");

    let object = ObjectRef::new(None);
    object.set_field(me, Item::object(object.clone()));

    let copy = Item::object(object.clone()).deep_copy().as_object().unwrap();
    let inner = copy.field(me).unwrap().as_object().unwrap();
    assert!(inner.ptr_eq(&copy));
    assert!(!inner.ptr_eq(&object));
}

#[test]
fn coercions() {
    assert_eq!(Item::from(3.9).to_integer().unwrap(), 3);
    assert_eq!(Item::from(-3.9).to_integer().unwrap(), -3);
    assert_eq!(Item::from(4i64).to_real().unwrap(), 4.0);
    assert!(Item::from(2i64).to_boolean().unwrap());
    assert!(!Item::from(0i64).to_boolean().unwrap());

    let err = Item::from("x").to_integer().unwrap_err();
    assert_eq!(err.message, "cannot convert string to integer");
    let err = Item::from(1.5).to_boolean().unwrap_err();
    assert_eq!(err.message, "cannot convert real to boolean");
}

#[test]
fn display_forms() {
    assert_eq!(Item::undefined().to_string(), "undefined");
    assert_eq!(Item::from(true).to_string(), "true");
    assert_eq!(Item::from(2.0).to_string(), "2.0");
    assert_eq!(Item::from(2.5).to_string(), "2.5");
    assert_eq!(Item::from(Color::new(1, 2, 3, 255)).to_string(), "|1,2,3,255|");
    assert_eq!(Item::from(Vector2::new(1.0, -0.5)).to_string(), "<1.0,-0.5>");
    assert_eq!(
        Item::list(vec![Item::from(1i64), Item::from("a")]).to_string(),
        "[1, a]"
    );
    assert_eq!(Item::object(ObjectRef::new(None)).to_string(), "<object>");
}

#[test]
fn self_containing_list_display_terminates() {
    let list = Item::list(Vec::new());
    let handle = list.as_list().unwrap();
    handle.borrow_mut().push(list.clone());
    assert!(list.to_string().contains("[...]"));
}

#[test]
fn color_clamps_and_unpacks() {
    assert_eq!(
        Color::from_components(300, -5, 128, 255),
        Color::new(255, 0, 128, 255)
    );
    assert_eq!(Color::from_packed(0x00ff_8010), Color::new(0xff, 0x80, 0x10, 255));
    assert_eq!(Color::new(1, 2, 3, 4).component("a"), Some(4));
    assert_eq!(Color::new(1, 2, 3, 4).component("q"), None);
}

#[test]
fn object_members() {
    let interner = SharedInterner::default();
    let a = interner.intern("a");

    let object = ObjectRef::new(None);
    assert!(object.member(a).is_none());
    let created = object.field_or_insert(a);
    assert!(created.is_undefined());
    created.set(ItemState::Integer(4));
    assert_eq!(object.field(a).unwrap().to_integer().unwrap(), 4);
    assert!(object.has_field(a));
}

#[test]
fn kind_names() {
    assert_eq!(Item::from(1i64).kind().as_str(), "integer");
    assert_eq!(Item::list(Vec::new()).kind(), ValueKind::List);
    assert_eq!(ValueKind::Vector.to_string(), "vector");
}
