use super::*;
use crate::array::ArrayShape;
use crate::registry::{Builtins, ClassTable};
use crate::union::Union;

fn setup() -> (ClassTable<&'static str>, Builtins) {
    ClassTable::with_builtins()
}

#[test]
fn structural_equality() {
    let (mut table, b) = setup();
    let push = table.intern_member("push");
    let build = || {
        Signature::new(
            b.array_instance(),
            false,
            push,
            vec![b.instance(&b.int)],
            None,
        )
    };
    assert_eq!(build(), build());

    let other_arg = Signature::new(b.array_instance(), false, push, vec![b.instance(&b.str)], None);
    assert_ne!(build(), other_arg);

    let with_block = Signature::new(
        b.array_instance(),
        false,
        push,
        vec![b.instance(&b.int)],
        Some(b.proc_instance()),
    );
    assert_ne!(build(), with_block);
    assert_eq!(build().arity(), 1);
}

#[test]
fn lookup_instance_method() {
    let (mut table, b) = setup();
    let upcase = table.intern_member("upcase");
    table.add_method(&b.str, upcase, "String#upcase");
    let sig = Signature::new(b.instance(&b.str), false, upcase, vec![], None);
    assert_eq!(sig.lookup(&table), Some("String#upcase"));
}

#[test]
fn lookup_singleton_method() {
    let (mut table, b) = setup();
    let new = table.intern_member("new");
    table.add_singleton_method(&b.obj, new, "Object.new");
    let foo = table.new_class("Foo", Some(&b.obj));
    let sig = Signature::new(TypeValue::class(foo), true, new, vec![], None);
    assert_eq!(sig.lookup(&table), Some("Object.new"));
}

#[test]
fn lookup_on_array_receiver_uses_base_type() {
    let (mut table, b) = setup();
    let size = table.intern_member("size");
    table.add_method(&b.ary, size, "Array#size");
    let receiver = TypeValue::array(
        ArrayShape::seq(Union::single(b.instance(&b.int))),
        b.array_instance(),
    );
    let sig = Signature::new(receiver, false, size, vec![], None);
    assert_eq!(sig.lookup(&table), Some("Array#size"));
}

#[test]
fn lookup_miss_is_none() {
    let (mut table, _) = setup();
    let m = table.intern_member("frobnicate");
    let sig = Signature::new(TypeValue::Any, false, m, vec![], None);
    assert_eq!(sig.lookup(&table), None);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "signature components must be stripped of local arrays")]
fn local_array_argument_is_rejected() {
    let (mut table, b) = setup();
    let m = table.intern_member("push");
    let _ = Signature::new(
        b.array_instance(),
        false,
        m,
        vec![TypeValue::local_array(tprof_common::ArrayId(0), b.array_instance())],
        None,
    );
}

#[test]
fn serializes_to_json() {
    let (mut table, _) = setup();
    let m = table.intern_member("new");
    let sig = Signature::new(TypeValue::Any, true, m, vec![TypeValue::Any], None);
    let json = serde_json::to_value(&sig).expect("serialize");
    assert_eq!(json["receiver_type"], serde_json::json!("Any"));
    assert_eq!(json["is_singleton"], serde_json::json!(true));
    assert_eq!(json["member_id"], serde_json::json!(m.0));
    assert_eq!(json["arg_types"], serde_json::json!(["Any"]));
    assert!(json["block_type"].is_null());
}
