use super::*;
use tmpl_common::FileId;
use tmpl_ir::{BlockStatement, Formal};

fn pos() -> Position {
    Position::new(FileId(4), 0, 30)
}

fn doc(keys: &MetadataKeys, short: &str, long: &str) -> DeclarationMetadata {
    DeclarationMetadata::new().with_value(
        &keys.doc_string,
        Value::list([Value::string(short), Value::string(long)]),
    )
}

#[test]
fn test_autodoc_unpacks_short_and_long() {
    let keys = MetadataKeys::default();
    let found = autodoc_for(pos(), &doc(&keys, "Adds.", "Adds two ints."), &keys)
        .expect("documented");
    assert_eq!(&*found.short, "Adds.");
    assert_eq!(&*found.long, "Adds two ints.");
    assert_eq!(found.pos, pos());
}

#[test]
fn test_malformed_doc_strings_are_ignored() {
    let keys = MetadataKeys::default();
    let one_element =
        DeclarationMetadata::new().with_value(&keys.doc_string, Value::list([Value::string("x")]));
    assert!(autodoc_for(pos(), &one_element, &keys).is_none());

    let not_strings = DeclarationMetadata::new().with_value(
        &keys.doc_string,
        Value::list([Value::Int(1), Value::string("x")]),
    );
    assert!(autodoc_for(pos(), &not_strings, &keys).is_none());

    assert!(autodoc_for(pos(), &DeclarationMetadata::new(), &keys).is_none());
}

#[test]
fn test_first_well_formed_entry_wins() {
    let keys = MetadataKeys::default();
    let metadata = DeclarationMetadata::new()
        .with_value(&keys.doc_string, Value::Int(0))
        .with_value(
            &keys.doc_string,
            Value::list([Value::string("first"), Value::string("First.")]),
        )
        .with_value(
            &keys.doc_string,
            Value::list([Value::string("second"), Value::string("Second.")]),
        );
    let found = autodoc_for(pos(), &metadata, &keys).expect("documented");
    assert_eq!(&*found.short, "first");
}

fn add_function(keys: &MetadataKeys) -> FunctionDeclaration {
    let mut x = Formal::new(pos(), ResolvedName::source("x", 1), Type::int());
    x.metadata = doc(keys, "left", "The left operand.\n\nNever negative.");
    let y = Formal::new(pos(), ResolvedName::source("y", 2), Type::int());
    FunctionDeclaration {
        pos: pos(),
        metadata: doc(keys, "Adds.", "Adds two ints."),
        name: ResolvedName::exported("add"),
        params: vec![x, y],
        return_type: Type::int(),
        body: BlockStatement::new(pos(), Vec::new()),
    }
}

#[test]
fn test_function_autodoc() {
    let keys = MetadataKeys::default();
    let help = FnAutodoc::for_function(&add_function(&keys), &keys);
    assert!(!help.is_empty());
    assert_eq!(help.short_help(), Some("Adds."));
    assert_eq!(help.params.len(), 2);
    assert!(help.params[0].autodoc.is_some());
    assert!(help.params[1].autodoc.is_none());
}

#[test]
fn test_render_long_help() {
    let keys = MetadataKeys::default();
    let help = FnAutodoc::for_function(&add_function(&keys), &keys);
    let expected = format!(
        "Adds two ints.\n\nx: {int}\n  The left operand.\n\n  Never negative.\n\ny: {int}",
        int = Type::int()
    );
    assert_eq!(help.render_long_help(), expected);
}

#[test]
fn test_undocumented_function_is_empty() {
    let keys = MetadataKeys::default();
    let mut function = add_function(&keys);
    function.metadata = DeclarationMetadata::new();
    for param in &mut function.params {
        param.metadata = DeclarationMetadata::new();
    }
    let help = FnAutodoc::for_function(&function, &keys);
    assert!(help.is_empty());
    assert_eq!(help.short_help(), None);
}
