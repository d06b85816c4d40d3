use super::*;
use rustc_hash::FxHashSet;

#[test]
fn test_float_equality_is_by_bits() {
    assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
    assert_ne!(Value::Float64(0.0), Value::Float64(-0.0));
    assert_eq!(Value::Float64(1.5), Value::Float64(1.5));
}

#[test]
fn test_values_key_a_hash_set() {
    let mut set = FxHashSet::default();
    assert!(set.insert(Value::Float64(f64::NAN)));
    assert!(!set.insert(Value::Float64(f64::NAN)));
    assert!(set.insert(Value::Int(1)));
    assert!(set.insert(Value::string("1")));
    assert!(set.insert(Value::list([Value::Int(1), Value::Null])));
    assert!(!set.insert(Value::list([Value::Int(1), Value::Null])));
    assert_eq!(set.len(), 4);
}

#[test]
fn test_distinct_tags_are_unequal() {
    assert_ne!(Value::Null, Value::Void);
    assert_ne!(Value::Int(0), Value::Bool(false));
    assert_eq!(Value::Bool(true).type_tag(), TypeTag::Boolean);
    assert_eq!(TypeTag::Float64.name(), "Float64");
}

#[test]
fn test_common_builtin_name() {
    let f = FunctionValue::named_builtin("plus");
    assert_eq!(f.common_builtin_name(), Some("plus"));

    let cover = FunctionValue::Cover(vec![
        FunctionValue::named_builtin("plus"),
        FunctionValue::named_builtin("plus"),
    ]);
    assert_eq!(cover.common_builtin_name(), Some("plus"));

    let mixed = FunctionValue::Cover(vec![
        FunctionValue::named_builtin("plus"),
        FunctionValue::named_builtin("minus"),
    ]);
    assert_eq!(mixed.common_builtin_name(), None);

    let opaque = FunctionValue::Cover(vec![FunctionValue::Opaque(3)]);
    assert_eq!(opaque.common_builtin_name(), None);
    assert_eq!(FunctionValue::Cover(Vec::new()).common_builtin_name(), None);
}

#[test]
fn test_natural_types() {
    assert_eq!(Value::Int(3).natural_type(), Type::int());
    assert!(Value::Null.natural_type().is_nullable());
    assert_eq!(Value::Void.natural_type(), Type::void());
}
