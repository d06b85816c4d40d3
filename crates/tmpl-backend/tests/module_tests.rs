use super::*;
use crate::strategy::{BubbleBranchStrategy, RepresentationOfVoid};
use crate::constant_pool::PooledSupportCode;
use tmpl_common::{FileId, Symbol};
use tmpl_ir::{
    DefId, FunctionDeclaration, FunctionValue, Signature, StaticProperty, TypeShape, Visibility,
};

struct NoSupport;

impl SupportNetwork for NoSupport {
    fn support_code_for_function(&self, _: Position, _: &FunctionValue) -> Option<SupportCodeRef> {
        None
    }
}

/// A target that spells function types as single-method interfaces.
struct InterfaceTarget;

impl SupportNetwork for InterfaceTarget {
    fn support_code_for_function(&self, _: Position, _: &FunctionValue) -> Option<SupportCodeRef> {
        None
    }

    fn function_type_strategy(&self) -> FunctionTypeStrategy {
        FunctionTypeStrategy::ToFunctionalInterface
    }
}

fn pos() -> Position {
    Position::new(FileId(5), 100, 200)
}

fn location(path: &str, root_segments: usize, is_preface: bool) -> CodeLocationMetadata {
    CodeLocationMetadata {
        source_library: "mylib".into(),
        module_name: ModuleName::new(FilePath::parse(path), root_segments, is_preface),
        output_path: FilePath::parse("out/mylib/main.js"),
    }
}

fn input(output: Option<(ResolvedName, Type)>) -> ModuleInput {
    let (output_name, output_type) = output.map_or((None, None), |(n, t)| (Some(n), Some(t)));
    ModuleInput {
        pos: pos(),
        code_location: location("work/mylib/main.temper", 2, false),
        dependency_category: DependencyCategory::Production,
        output_name,
        output_type,
    }
}

fn cf(void: RepresentationOfVoid) -> CfOptions {
    CfOptions::new(BubbleBranchStrategy::CatchBubble, void)
}

/// A type-typed declaration with no type markers.
fn fiction(uid: u32) -> Declaration {
    Declaration::new(
        pos(),
        ResolvedName::source("T", uid),
        Type::simple(DefId::TYPE),
        None,
    )
}

fn nascent(keys: &MetadataKeys, path: &str, is_preface: bool) -> NascentModule {
    NascentModule::new(
        pos(),
        location(path, 2, is_preface),
        ModuleMetadata {
            pos: pos().left_edge(),
            dependency_category: DependencyCategory::Production,
        },
        0,
        FunctionTypeStrategy::ToFunctionType,
        keys.clone(),
    )
}

// =============================================================================
// Compiler fiction
// =============================================================================

#[test]
fn test_compiler_fiction_detection() {
    let keys = MetadataKeys::default();
    assert!(is_compiler_fiction(&fiction(1), &keys));

    for marker in keys.type_markers() {
        let marked = fiction(1)
            .with_metadata(DeclarationMetadata::new().with_value(marker, Value::Void));
        assert!(!is_compiler_fiction(&marked, &keys), "{marker}");
    }

    let ordinary = Declaration::new(pos(), ResolvedName::source("x", 2), Type::int(), None);
    assert!(!is_compiler_fiction(&ordinary, &keys));
}

#[test]
fn test_finish_drops_fiction_everywhere() {
    let keys = MetadataKeys::default();
    let mut module = nascent(&keys, "work/mylib/main.temper", false);
    let kept = Declaration::new(pos(), ResolvedName::source("x", 9), Type::int(), None);
    module.push(TopLevel::ModuleLevelDeclaration(fiction(1)));
    module.push(TopLevel::ModuleLevelDeclaration(kept.clone()));
    module.push(TopLevel::FunctionDeclaration(FunctionDeclaration {
        pos: pos(),
        metadata: DeclarationMetadata::new(),
        name: ResolvedName::exported("f"),
        params: Vec::new(),
        return_type: Type::void(),
        body: BlockStatement::new(
            pos(),
            vec![
                Statement::LocalDeclaration(fiction(2)),
                Statement::If {
                    pos: pos(),
                    test: Expression::value(pos(), Value::Bool(true)),
                    consequent: BlockStatement::new(
                        pos(),
                        vec![Statement::LocalDeclaration(fiction(3))],
                    ),
                    alternate: None,
                },
            ],
        ),
    }));
    module.push(TopLevel::ModuleInitBlock(BlockStatement::new(
        pos(),
        vec![
            Statement::LocalDeclaration(fiction(4)),
            Statement::LocalDeclaration(kept.clone()),
        ],
    )));

    let module = module.finish();
    assert_eq!(module.top_levels.len(), 3);
    assert_eq!(module.top_levels[0], TopLevel::ModuleLevelDeclaration(kept.clone()));
    let TopLevel::FunctionDeclaration(function) = &module.top_levels[1] else {
        panic!("expected the function");
    };
    assert_eq!(function.body.body.len(), 1);
    let Statement::If { consequent, .. } = &function.body.body[0] else {
        panic!("expected the if");
    };
    assert!(consequent.body.is_empty());
    let TopLevel::ModuleInitBlock(init) = &module.top_levels[2] else {
        panic!("expected the init block");
    };
    assert_eq!(init.body, vec![Statement::LocalDeclaration(kept)]);
}

// =============================================================================
// needs_translation
// =============================================================================

#[test]
fn test_library_config_file_never_needs_translation() {
    let keys = MetadataKeys::default();
    let mut module = nascent(&keys, "work/mylib/config.temper.md", false);
    module.push(TopLevel::ModuleInitBlock(BlockStatement::new(pos(), Vec::new())));
    assert!(!module.needs_translation());
}

#[test]
fn test_empty_preface_does_not_need_translation() {
    let keys = MetadataKeys::default();
    let mut module = nascent(&keys, "work/mylib/main.temper", true);
    assert!(!module.needs_translation());
    module.push(TopLevel::ModuleInitBlock(BlockStatement::new(pos(), Vec::new())));
    assert!(module.needs_translation());
}

#[test]
fn test_ordinary_module_needs_translation_even_when_empty() {
    let keys = MetadataKeys::default();
    assert!(nascent(&keys, "work/mylib/main.temper", false).needs_translation());
}

// =============================================================================
// CommonTopLevels
// =============================================================================

#[test]
fn test_common_top_levels_index_support_code() {
    let keys = MetadataKeys::default();
    let a = SupportCodeRef::named("a");
    let b = SupportCodeRef::named("b");
    let mut module = nascent(&keys, "work/mylib/main.temper", false);
    let a_name = ResolvedName::source("a", 1);
    module.push(TopLevel::support_code_declaration(
        pos(),
        a_name.clone(),
        a.clone(),
        Signature::invalid(),
    ));
    module.push(TopLevel::support_code_declaration(
        pos(),
        ResolvedName::source("b", 2),
        b.clone(),
        Signature::invalid(),
    ));
    let module = module.finish();
    let common = module.common_top_levels();
    assert_eq!(common.len(), 2);
    assert_eq!(common.name_for(&a), Some(&a_name));
    assert!(common.name_for(&SupportCodeRef::named("a")).is_none());
    assert_eq!(CommonTopLevels::for_module(&module), *common);
}

#[test]
fn test_duplicate_binding_is_an_error() {
    let code = SupportCodeRef::named("dup");
    let top_levels = vec![
        TopLevel::support_code_declaration(
            pos(),
            ResolvedName::source("dup", 1),
            code.clone(),
            Signature::invalid(),
        ),
        TopLevel::support_code_declaration(
            pos(),
            ResolvedName::source("dup", 2),
            code,
            Signature::invalid(),
        ),
    ];
    let err = CommonTopLevels::try_from_top_levels(&top_levels).expect_err("duplicate binding");
    assert!(matches!(
        err,
        InternalConsistencyError::DuplicateSupportCodeBinding { .. }
    ));
    assert!(err.to_string().contains("SupportCode(dup)"));
}

#[test]
#[should_panic(expected = "is bound to both")]
fn test_finish_panics_on_duplicate_binding() {
    let keys = MetadataKeys::default();
    let code = SupportCodeRef::named("dup");
    let mut module = nascent(&keys, "work/mylib/main.temper", false);
    for uid in 0..2 {
        module.push(TopLevel::support_code_declaration(
            pos(),
            ResolvedName::source("dup", uid),
            code.clone(),
            Signature::invalid(),
        ));
    }
    let _ = module.finish();
}

// =============================================================================
// ModuleTranslator
// =============================================================================

#[test]
fn test_pool_definitions_precede_translated_top_levels() {
    let keys = MetadataKeys::default();
    let store = DefinitionStore::new();
    let network = NoSupport;
    let mut tables = SharedNameTables::new();
    let mut translator = ModuleTranslator::new(
        cf(RepresentationOfVoid::ReifyVoid),
        &keys,
        &store,
        0,
        &mut tables,
        &network,
    );
    let x = translator.unused_temporary_name("x");
    let init = translator.pooled_value_ref(pos(), Value::string("hello"), Type::string());
    translator.add_top_level(TopLevel::ModuleLevelDeclaration(Declaration::new(
        pos(),
        x.clone(),
        Type::string(),
        Some(init),
    )));
    let again = translator.pooled_value_ref(pos(), Value::string("hello"), Type::string());

    let module = translator.finish_translation(input(None));
    assert_eq!(module.top_levels.len(), 2);
    let TopLevel::ModuleLevelDeclaration(pooled) = &module.top_levels[0] else {
        panic!("expected the pooled constant first");
    };
    assert_eq!(pooled.name.base_text(), "vString");
    assert!(matches!(&again, Expression::Reference { name, .. } if *name == pooled.name));
    assert_eq!(module.top_levels[1].declared_name(), Some(&x));
    assert!(module.result.is_none());
    assert_eq!(tables.len(), 1);
}

#[test]
fn test_result_exported_at_right_edge() {
    let keys = MetadataKeys::default();
    let store = DefinitionStore::new();
    let network = NoSupport;
    let mut tables = SharedNameTables::new();
    let translator = ModuleTranslator::new(
        cf(RepresentationOfVoid::DoNotReifyVoid),
        &keys,
        &store,
        0,
        &mut tables,
        &network,
    );
    let output = ResolvedName::source("result", 0);
    let module = translator.finish_translation(input(Some((output.clone(), Type::int()))));
    assert_eq!(
        module.result,
        Some(Expression::reference(pos().right_edge(), output, Type::int()))
    );
    assert_eq!(module.module_metadata.pos, pos().left_edge());
}

#[test]
fn test_void_result_depends_on_void_representation() {
    let keys = MetadataKeys::default();
    let store = DefinitionStore::new();
    let network = NoSupport;
    let output = ResolvedName::source("result", 0);

    for (void, exported) in [
        (RepresentationOfVoid::ReifyVoid, true),
        (RepresentationOfVoid::DoNotReifyVoid, false),
    ] {
        let mut tables = SharedNameTables::new();
        let translator = ModuleTranslator::new(cf(void), &keys, &store, 0, &mut tables, &network);
        let module = translator.finish_translation(input(Some((output.clone(), Type::void()))));
        assert_eq!(module.result.is_some(), exported, "{void:?}");
    }
}

#[test]
fn test_support_code_ref_pools_requirements_first() {
    let keys = MetadataKeys::default();
    let store = DefinitionStore::new();
    let network = NoSupport;
    let mut tables = SharedNameTables::new();
    let base = SupportCodeRef::named("base");
    let derived = SupportCodeRef::new(tmpl_ir::SupportCode {
        kind: tmpl_ir::SupportCodeKind::Named {
            base_name: "derived".into(),
        },
        requires: vec![tmpl_ir::SupportCodeRequirement::Other {
            required: base.clone(),
            descriptor: Signature::invalid(),
            metadata: DeclarationMetadata::new(),
        }],
    });
    let mut translator = ModuleTranslator::new(
        cf(RepresentationOfVoid::ReifyVoid),
        &keys,
        &store,
        3,
        &mut tables,
        &network,
    );
    let reference = translator.support_code_ref(pos(), derived.clone(), Type::Top);
    assert!(matches!(&reference, Expression::Reference { name, .. } if name.base_text() == "derived"));

    let module = translator.finish_translation(input(None));
    assert_eq!(module.scope_index, 3);
    let bound: Vec<_> = module
        .top_levels
        .iter()
        .filter_map(TopLevel::bound_support_code)
        .map(|(code, _)| code.clone())
        .collect();
    assert_eq!(bound, vec![base, derived]);
    assert_eq!(module.finish().common_top_levels().len(), 2);
}

#[test]
fn test_translator_strategy_helpers() {
    let keys = MetadataKeys::default();
    let mut store = DefinitionStore::new();
    let math = store.register_shape(TypeShape::new("Math").with_static(StaticProperty::new(
        Symbol::new("max"),
        Visibility::Public,
        DeclarationMetadata::new().with_value(&keys.fn_, Value::Void),
    )));
    let network = NoSupport;
    let mut tables = SharedNameTables::new();
    let translator = ModuleTranslator::new(
        CfOptions::new(
            BubbleBranchStrategy::IfHandlerScopeVar,
            RepresentationOfVoid::ReifyVoid,
        ),
        &keys,
        &store,
        0,
        &mut tables,
        &network,
    );

    assert_eq!(translator.zero_value_for(&Type::int()).value, Value::Int(0));

    let callee = Tree::call(
        pos(),
        Tree::get_static(pos()),
        vec![
            Tree::value(pos(), Value::Type(Type::simple(math))),
            Tree::value(pos(), Value::Symbol(Symbol::new("max"))),
        ],
    );
    let found = translator.static_method_callee(&callee).expect("static method");
    assert_eq!(found.type_id, math);

    let failure = translator.free_failure(pos(), None).into_stmt_list();
    assert_eq!(failure.as_slice(), &[Statement::ModuleInitFailed { pos: pos() }]);
}

// =============================================================================
// Module sets
// =============================================================================

#[test]
fn test_translators_sharing_tables_mint_distinct_names() {
    let keys = MetadataKeys::default();
    let store = DefinitionStore::new();
    let network = NoSupport;
    let mut tables = SharedNameTables::new();
    let options = cf(RepresentationOfVoid::ReifyVoid);

    let (first, first_again) = {
        let mut translator = ModuleTranslator::new(options, &keys, &store, 0, &mut tables, &network);
        let one = translator.pooled_value_ref(pos(), Value::Int(1), Type::int());
        let again = translator.pooled_value_ref(pos(), Value::Int(1), Type::int());
        let _ = translator.finish_translation(input(None));
        (one, again)
    };
    let (second, shared) = {
        let mut translator = ModuleTranslator::new(options, &keys, &store, 1, &mut tables, &network);
        let two = translator.pooled_value_ref(pos(), Value::Int(2), Type::int());
        let one = translator.pooled_value_ref(pos(), Value::Int(1), Type::int());
        let _ = translator.finish_translation(input(None));
        (two, one)
    };

    let name_of = |expr: &Expression| match expr {
        Expression::Reference { name, .. } => name.clone(),
        other => panic!("expected a reference, got {other:?}"),
    };
    let (first, second) = (name_of(&first), name_of(&second));
    assert_ne!(first, second);
    assert_eq!(name_of(&first_again), first);
    assert_eq!(name_of(&shared), first);

    let int_value = |n: i64| {
        Poolable::Value(PooledValue {
            value: Value::Int(n),
            descriptor: Type::int(),
        })
    };
    assert_eq!(tables.poolable_for(&first), Some(&int_value(1)));
    assert_eq!(tables.poolable_for(&second), Some(&int_value(2)));
    assert_eq!(tables.len(), 2);
}

#[test]
fn test_support_code_bound_once_per_scope_across_module_set() {
    let keys = MetadataKeys::default();
    let store = DefinitionStore::new();
    let network = NoSupport;
    let mut tables = SharedNameTables::new();
    let options = cf(RepresentationOfVoid::ReifyVoid);
    let helper = SupportCodeRef::named("helper");
    let other_helper = SupportCodeRef::named("helper");

    let mut modules = Vec::new();
    for scope_index in 0..2 {
        let mut translator =
            ModuleTranslator::new(options, &keys, &store, scope_index, &mut tables, &network);
        translator.support_code_ref(pos(), helper.clone(), Type::Top);
        translator.support_code_ref(pos(), helper.clone(), Type::Top);
        if scope_index == 1 {
            translator.support_code_ref(pos(), other_helper.clone(), Type::Top);
        }
        modules.push(translator.finish_translation(input(None)).finish());
    }

    let name_in = |module: &Module, code: &SupportCodeRef| {
        module.common_top_levels().name_for(code).cloned()
    };
    assert_eq!(modules[0].common_top_levels().len(), 1);
    assert_eq!(modules[1].common_top_levels().len(), 2);
    let first = name_in(&modules[0], &helper).expect("helper bound in scope 0");
    let second = name_in(&modules[1], &helper).expect("helper bound in scope 1");
    let other = name_in(&modules[1], &other_helper).expect("other helper bound");
    assert_ne!(first, second);
    assert_ne!(second, other);

    for (scope_index, name) in [(0, &first), (1, &second)] {
        let pooled = Poolable::SupportCode(PooledSupportCode {
            support_code: helper.clone(),
            scope_index,
        });
        assert_eq!(tables.name_for(&pooled), Some(name));
    }
    assert!(matches!(
        tables.poolable_for(&other),
        Some(Poolable::SupportCode(pooled)) if pooled.support_code == other_helper
    ));
}

// =============================================================================
// Function types
// =============================================================================

fn interface_declaration(keys: &MetadataKeys, store: &mut DefinitionStore) -> TopLevel {
    let def = store.register_shape(TypeShape::new("IntPredicate"));
    TopLevel::TypeDeclaration {
        pos: pos(),
        metadata: DeclarationMetadata::new()
            .with_value(&keys.type_decl, Value::Void)
            .with_value(&keys.functional_interface, Value::Void),
        name: ResolvedName::exported("IntPredicate"),
        def,
    }
}

#[test]
fn test_functional_interfaces_dropped_for_structural_function_types() {
    let keys = MetadataKeys::default();
    let mut store = DefinitionStore::new();
    let declaration = interface_declaration(&keys, &mut store);
    let network = NoSupport;
    let mut tables = SharedNameTables::new();
    let mut translator = ModuleTranslator::new(
        cf(RepresentationOfVoid::ReifyVoid),
        &keys,
        &store,
        0,
        &mut tables,
        &network,
    );
    let sig = Signature::new(vec![Type::int()], Type::boolean());
    assert_eq!(
        translator.function_type_form(&sig),
        crate::strategy::FunctionTypeForm::Structural(sig.clone())
    );
    translator.add_top_level(declaration);
    let module = translator.finish_translation(input(None)).finish();
    assert!(module.top_levels.is_empty());
}

#[test]
fn test_functional_interfaces_kept_for_nominal_function_types() {
    let keys = MetadataKeys::default();
    let mut store = DefinitionStore::new();
    let declaration = interface_declaration(&keys, &mut store);
    let network = InterfaceTarget;
    let mut tables = SharedNameTables::new();
    let mut translator = ModuleTranslator::new(
        cf(RepresentationOfVoid::ReifyVoid),
        &keys,
        &store,
        0,
        &mut tables,
        &network,
    );
    let sig = Signature::new(vec![Type::int()], Type::boolean());
    assert_eq!(
        translator.function_type_form(&sig),
        crate::strategy::FunctionTypeForm::Nominal(Type::generic(
            DefId::FUNCTION,
            vec![Type::int(), Type::boolean()]
        ))
    );
    translator.add_top_level(declaration.clone());
    let nascent = translator.finish_translation(input(None));
    assert_eq!(
        nascent.function_type_strategy,
        FunctionTypeStrategy::ToFunctionalInterface
    );
    let module = nascent.finish();
    assert_eq!(module.top_levels, vec![declaration]);
}
