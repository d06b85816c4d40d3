use super::*;
use tmpl_ir::{TypeFormal, TypeShape};

#[test]
fn test_builtin_zero_values() {
    let store = DefinitionStore::new();
    let cases = [
        (Type::int(), Value::Int(0)),
        (Type::boolean(), Value::Bool(false)),
        (Type::void(), Value::Void),
        (Type::string(), Value::string("")),
    ];
    for (ty, expected) in cases {
        let record = ZeroValues::for_type(&store, &ty);
        assert_eq!(record.value, expected, "{ty}");
        assert!(!record.needs_null_adjustment);
        assert_eq!(record.adjusted_type, ty);
    }
}

#[test]
fn test_nullable_types_get_null_without_adjustment() {
    let store = DefinitionStore::new();
    let nullable_int = Type::int().with_nullable(true);
    let record = ZeroValues::for_type(&store, &nullable_int);
    assert_eq!(record.value, Value::Null);
    assert!(!record.needs_null_adjustment);
    assert_eq!(record.adjusted_type, nullable_int);
}

#[test]
fn test_other_types_need_null_adjustment() {
    let mut store = DefinitionStore::new();
    let point = Type::simple(store.register_shape(TypeShape::new("Point")));
    let record = ZeroValues::for_type(&store, &point);
    assert_eq!(record.value, Value::Null);
    assert!(record.needs_null_adjustment);
    assert!(record.adjusted_type.is_nullable());
    assert_eq!(record.adjusted_type, point.with_nullable(true));

    let float = ZeroValues::for_type(&store, &Type::simple(DefId::FLOAT64));
    assert!(float.needs_null_adjustment);
}

#[test]
fn test_formal_defers_to_upper_bound() {
    let mut store = DefinitionStore::new();
    let t = store.register_formal(TypeFormal::new("T", vec![Type::int()]));
    let record = ZeroValues::for_type(&store, &Type::formal(t));
    assert_eq!(record.value, Value::Int(0));
    assert!(!record.needs_null_adjustment);
}

#[test]
fn test_unbounded_formal_needs_adjustment() {
    let mut store = DefinitionStore::new();
    let t = store.register_formal(TypeFormal::new("T", Vec::new()));
    let record = ZeroValues::for_type(&store, &Type::formal(t));
    assert_eq!(record.value, Value::Null);
    assert!(record.needs_null_adjustment);
    assert!(record.adjusted_type.is_nullable());
}

#[test]
fn test_self_bounded_formal_terminates() {
    let mut store = DefinitionStore::new();
    let next = DefId(DefId::FIRST_USER);
    let t = store.register_formal(TypeFormal::new("T", vec![Type::formal(next)]));
    assert_eq!(t, next);
    let record = ZeroValues::for_type(&store, &Type::formal(t));
    assert_eq!(record.value, Value::Null);
    assert!(record.needs_null_adjustment);
}
