use super::*;

#[test]
fn with_builtins_registers_root_and_builtin_classes() {
    let (table, b) = ClassTable::<u32>::with_builtins();
    assert_eq!(table.class_count(), 10);
    assert_eq!(b.obj.idx, ClassId(0));
    assert_eq!(table.get_class_name(&b.obj), "Object");
    assert_eq!(table.get_class_name(&b.nil), "NilClass");
    assert_eq!(table.get_class_name(&b.regexp), "Regexp");
    for class in [&b.nil, &b.int, &b.str, &b.ary, &b.proc] {
        assert_eq!(table.superclass(class), Some(b.obj.clone()));
    }
    assert_eq!(table.superclass(&b.obj), None);
}

#[test]
fn builtin_helpers() {
    let (_, b) = ClassTable::<u32>::with_builtins();
    assert_eq!(b.nil(), TypeValue::instance_of(&b.nil));
    assert_eq!(b.nil_union(), Union::single(b.nil()));
    assert_eq!(b.array_instance(), TypeValue::instance(TypeValue::class(b.ary.clone())));
}

#[test]
fn instance_lookup_walks_superclass_chain() {
    let (mut table, b) = ClassTable::with_builtins();
    let to_s = table.intern_member("to_s");
    table.add_method(&b.obj, to_s, 1u32);

    let foo = table.new_class("Foo", Some(&b.obj));
    let bar = table.new_class("Bar", Some(&foo));
    assert_eq!(table.get_method(&TypeValue::class(bar.clone()), to_s), Some(1));

    table.add_method(&foo, to_s, 2);
    assert_eq!(table.get_method(&TypeValue::class(bar), to_s), Some(2));
    assert_eq!(table.get_method(&TypeValue::class(b.obj.clone()), to_s), Some(1));
}

#[test]
fn singleton_lookup_walks_superclass_chain() {
    let (mut table, b) = ClassTable::with_builtins();
    let create = table.intern_member("create");
    let foo = table.new_class("Foo", Some(&b.obj));
    let bar = table.new_class("Bar", Some(&foo));
    table.add_singleton_method(&foo, create, 7u32);

    assert_eq!(table.get_singleton_method(&bar, create), Some(7));
    assert_eq!(table.get_singleton_method(&b.obj, create), None);
    // Singleton methods are not instance methods.
    assert_eq!(table.get_method(&TypeValue::class(bar), create), None);
}

#[test]
fn instance_lookup_on_non_class_is_miss() {
    let (mut table, _) = ClassTable::<u32>::with_builtins();
    let m = table.intern_member("foo");
    assert_eq!(table.get_method(&TypeValue::Any, m), None);
}

#[test]
fn unknown_class_names_fall_back() {
    let table = ClassTable::<u32>::new();
    assert_eq!(table.get_class_name(&ClassType::new(ClassId(4), Some("Ghost"))), "Ghost");
    assert_eq!(table.get_class_name(&ClassType::anonymous(ClassId(4))), "<class 4>");
    assert_eq!(table.get_method(&TypeValue::class(ClassType::anonymous(ClassId(4))), Atom(1)), None);
}

#[test]
fn class_type_carries_registered_name() {
    let (table, b) = ClassTable::<u32>::with_builtins();
    let handle = table.class_type(b.int.idx);
    assert_eq!(handle, b.int);
    assert_eq!(handle.name.as_deref(), Some("Integer"));
}

#[test]
fn member_names_resolve() {
    let mut table = ClassTable::<u32>::new();
    let each = table.intern_member("each");
    assert_eq!(table.intern_member("each"), each);
    assert_eq!(table.member_name(each), "each");
}

#[test]
#[should_panic(expected = "is not registered in this class table")]
fn unregistered_superclass_panics() {
    let mut table = ClassTable::<u32>::new();
    let ghost = ClassType::anonymous(ClassId(3));
    table.new_class("Foo", Some(&ghost));
}
