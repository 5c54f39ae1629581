use super::*;
use crate::registry::ClassTable;

fn builtins() -> Builtins {
    ClassTable::<()>::with_builtins().1
}

#[test]
fn scalars_promote_to_literals_over_their_class() {
    let b = builtins();
    let promoter = LiteralPromoter::new(&b);

    let cases = [
        (
            HostValue::Symbol("a".into()),
            LiteralValue::Symbol(Arc::from("a")),
            &b.sym,
        ),
        (HostValue::Integer(1), LiteralValue::Integer(1), &b.int),
        (HostValue::Boolean(false), LiteralValue::Boolean(false), &b.bool),
        (
            HostValue::String("s".into()),
            LiteralValue::String(Arc::from("s")),
            &b.str,
        ),
        (
            HostValue::Regex("a|b".into()),
            LiteralValue::Regex(Arc::from("a|b")),
            &b.regexp,
        ),
    ];
    for (host, value, class) in cases {
        let ty = promoter.promote(&host).expect("supported literal");
        assert_eq!(ty, TypeValue::literal(value, b.instance(class)));
    }
}

#[test]
fn range_promotes_with_bounds() {
    let b = builtins();
    let ty = LiteralPromoter::new(&b)
        .promote(&HostValue::Range {
            begin: Some(1),
            end: None,
            exclusive: true,
        })
        .expect("range");
    assert_eq!(
        ty,
        TypeValue::literal(
            LiteralValue::Range {
                begin: Some(1),
                end: None,
                exclusive: true,
            },
            b.instance(&b.range),
        )
    );
}

#[test]
fn nil_promotes_to_bare_instance() {
    let b = builtins();
    let ty = LiteralPromoter::new(&b).promote(&HostValue::Nil).expect("nil");
    assert_eq!(ty, b.nil());
}

#[test]
fn promotion_is_deterministic() {
    let b = builtins();
    let promoter = LiteralPromoter::new(&b);
    let value = HostValue::Array(vec![HostValue::Integer(3), HostValue::String("x".into())]);
    assert_eq!(
        promoter.promote(&value).expect("first"),
        promoter.promote(&value).expect("second")
    );
}

#[test]
fn array_promotes_to_tuple_of_singletons() {
    let b = builtins();
    let ty = LiteralPromoter::new(&b)
        .promote(&HostValue::Array(vec![
            HostValue::Integer(1),
            HostValue::Symbol("a".into()),
            HostValue::Boolean(true),
        ]))
        .expect("array");

    let expected = TypeValue::array(
        ArrayShape::tuple([
            Union::single(TypeValue::literal(LiteralValue::Integer(1), b.instance(&b.int))),
            Union::single(TypeValue::literal(
                LiteralValue::Symbol(Arc::from("a")),
                b.instance(&b.sym),
            )),
            Union::single(TypeValue::literal(LiteralValue::Boolean(true), b.instance(&b.bool))),
        ]),
        b.array_instance(),
    );
    assert_eq!(ty, expected);
}

#[test]
fn nested_array_promotes_recursively() {
    let b = builtins();
    let ty = LiteralPromoter::new(&b)
        .promote(&HostValue::Array(vec![HostValue::Array(vec![]), HostValue::Nil]))
        .expect("nested");
    let inner = TypeValue::array(ArrayShape::Tuple(Vec::new()), b.array_instance());
    assert_eq!(
        ty,
        TypeValue::array(
            ArrayShape::tuple([Union::single(inner), b.nil_union()]),
            b.array_instance(),
        )
    );
}

#[test]
fn root_class_promotes_to_object_instance() {
    let b = builtins();
    let ty = LiteralPromoter::new(&b)
        .promote(&HostValue::Class(b.obj.idx))
        .expect("root class");
    assert_eq!(ty, b.instance(&b.obj));
}

#[test]
fn other_class_is_unsupported() {
    let b = builtins();
    let err = LiteralPromoter::new(&b)
        .promote(&HostValue::Class(b.int.idx))
        .expect_err("non-root class");
    assert_eq!(err, LatticeError::UnsupportedClassLiteral { class: b.int.idx });
}

#[test]
fn unsupported_kinds_are_rejected() {
    let b = builtins();
    let promoter = LiteralPromoter::new(&b);
    let err = promoter.promote(&HostValue::Float(1.5)).expect_err("float");
    assert_eq!(
        err,
        LatticeError::UnsupportedLiteral {
            kind: "float".to_string()
        }
    );
    assert_eq!(err.to_string(), "unsupported literal: float");

    let err = promoter
        .promote(&HostValue::Hash(vec![(HostValue::Nil, HostValue::Nil)]))
        .expect_err("hash");
    assert!(matches!(err, LatticeError::UnsupportedLiteral { ref kind } if kind == "hash"));
}

#[test]
fn array_fails_with_first_unsupported_element() {
    let b = builtins();
    let err = LiteralPromoter::new(&b)
        .promote(&HostValue::Array(vec![
            HostValue::Integer(1),
            HostValue::Class(b.str.idx),
            HostValue::Float(0.5),
        ]))
        .expect_err("bad element");
    assert_eq!(err, LatticeError::UnsupportedClassLiteral { class: b.str.idx });
}
