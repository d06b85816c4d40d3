use super::*;

#[test]
fn test_nullability() {
    assert!(!Type::int().is_nullable());
    assert!(Type::int().with_nullable(true).is_nullable());
    assert!(Type::null().is_nullable());
    assert!(Type::Top.is_nullable());
    assert!(!Type::Invalid.is_nullable());
    assert!(Type::formal(DefId(42)).with_nullable(true).is_nullable());
}

#[test]
fn test_with_nullable_keeps_arguments() {
    let list = Type::generic(DefId::LIST, vec![Type::string()]);
    let widened = list.with_nullable(true);
    assert_eq!(
        widened,
        Type::Defined {
            def: DefId::LIST,
            args: vec![Type::string()],
            nullable: true,
        }
    );
    assert_eq!(widened.with_nullable(false), list);
}

#[test]
fn test_definition_lookup() {
    assert_eq!(Type::int().definition(), Some(DefId::INT));
    assert_eq!(Type::formal(DefId(11)).definition(), Some(DefId(11)));
    let f = Type::Function(Signature::new(vec![Type::int()], Type::void()));
    assert_eq!(f.definition(), Some(DefId::FUNCTION));
    assert_eq!(Type::Top.definition(), None);
}

#[test]
fn test_type_type_and_void_like() {
    assert!(Type::simple(DefId::TYPE).is_type_type());
    assert!(!Type::int().is_type_type());
    assert!(Type::void().is_void_like());
    assert!(!Type::void().with_nullable(true).is_void_like());
}

#[test]
fn test_display() {
    assert_eq!(Type::int().with_nullable(true).to_string(), "int?");
    assert_eq!(
        Type::generic(DefId::LIST, vec![Type::string()]).to_string(),
        "list<string>"
    );
    let sig = Signature::new(vec![Type::int(), Type::boolean()], Type::void());
    assert_eq!(sig.to_string(), "fn (int, boolean): void");
    assert_eq!(sig.arity(), 2);
    assert!(sig.returns_void());
}
