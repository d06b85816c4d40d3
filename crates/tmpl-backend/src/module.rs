//! Module assembly.
//!
//! A [`ModuleTranslator`] owns everything needed while one source unit is
//! translated: the control-flow options, the reserved metadata keys, a name
//! maker for module-local temporaries, and the module's constant pool. Pooled
//! names come from the module set's [`SharedNameTables`] instead. Finishing translation yields a
//! [`NascentModule`], the mutable staging form of the module, which
//! [`NascentModule::finish`] consumes exactly once to produce an immutable
//! [`Module`].
//!
//! ```text
//! ModuleTranslator ──finish_translation──▶ NascentModule ──finish──▶ Module
//!   (pool, names)                          (top_levels: Vec)         (+ CommonTopLevels)
//! ```

use crate::constant_pool::{ConstantPool, Poolable, PooledValue, SharedNameTables, SupportNetwork};
use crate::static_dispatch::{StaticMethodCallee, unpack_static_method_callee};
use crate::stmt_or_expr::Stmt;
use crate::strategy::{CfOptions, FunctionTypeForm, FunctionTypeStrategy};
use crate::zero_values::{ZeroValueRecord, ZeroValues};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use tmpl_common::limits::TOP_LEVELS_INITIAL_CAPACITY;
use tmpl_common::{FilePath, ModuleName, NameMaker, Position, ResolvedName};
use tmpl_ir::{
    BlockStatement, Declaration, DeclarationMetadata, DefinitionStore, Expression, MetadataKeys,
    Signature, Statement, SupportCodeRef, TopLevel, Tree, Type, Value,
};
use tracing::debug;

// =============================================================================
// Module metadata
// =============================================================================

/// Which build a module belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DependencyCategory {
    Production,
    Test,
}

/// Where a module came from and where its output goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeLocationMetadata {
    pub source_library: Arc<str>,
    pub module_name: ModuleName,
    pub output_path: FilePath,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMetadata {
    pub pos: Position,
    pub dependency_category: DependencyCategory,
}

// =============================================================================
// Compiler fiction
// =============================================================================

/// True for a declaration whose type is the type of types and whose metadata
/// does not mark it as a real type declaration, placeholder, or formal. Such
/// declarations only exist for inference and have no output.
pub fn is_compiler_fiction(decl: &Declaration, keys: &MetadataKeys) -> bool {
    decl.ty.is_type_type()
        && !keys
            .type_markers()
            .into_iter()
            .any(|key| decl.metadata.contains(key))
}

fn drop_fiction_in_block(block: &mut BlockStatement, keys: &MetadataKeys) -> usize {
    let before = block.body.len();
    block.body.retain(|stmt| match stmt {
        Statement::LocalDeclaration(decl) => !is_compiler_fiction(decl, keys),
        _ => true,
    });
    let mut dropped = before - block.body.len();
    for stmt in &mut block.body {
        dropped += drop_fiction_in_statement(stmt, keys);
    }
    dropped
}

fn drop_fiction_in_statement(stmt: &mut Statement, keys: &MetadataKeys) -> usize {
    match stmt {
        Statement::Block(block) => drop_fiction_in_block(block, keys),
        Statement::If {
            consequent,
            alternate,
            ..
        } => {
            let mut dropped = drop_fiction_in_block(consequent, keys);
            if let Some(alternate) = alternate {
                dropped += drop_fiction_in_statement(alternate, keys);
            }
            dropped
        }
        _ => 0,
    }
}

// =============================================================================
// CommonTopLevels
// =============================================================================

/// An internal invariant was broken upstream of this layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InternalConsistencyError {
    /// Two top-levels of one module bind the same support code.
    DuplicateSupportCodeBinding {
        support_code: String,
        first: ResolvedName,
        second: ResolvedName,
    },
}

impl fmt::Display for InternalConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalConsistencyError::DuplicateSupportCodeBinding {
                support_code,
                first,
                second,
            } => write!(
                f,
                "{support_code} is bound to both {first} and {second}"
            ),
        }
    }
}

impl std::error::Error for InternalConsistencyError {}

/// Names bound to support code by a module's top-levels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommonTopLevels {
    support_codes: FxHashMap<SupportCodeRef, ResolvedName>,
}

impl CommonTopLevels {
    /// Scan `module`'s top-levels.
    ///
    /// # Panics
    ///
    /// If two top-levels bind the same support code. The constant pool never
    /// does that, so a duplicate means pooling went wrong.
    pub fn for_module(module: &Module) -> Self {
        match Self::try_for_module(module) {
            Ok(common) => common,
            Err(err) => panic!("{}: {err}", module.code_location.module_name),
        }
    }

    pub fn try_for_module(module: &Module) -> Result<Self, InternalConsistencyError> {
        Self::try_from_top_levels(&module.top_levels)
    }

    pub fn try_from_top_levels(top_levels: &[TopLevel]) -> Result<Self, InternalConsistencyError> {
        let mut support_codes = FxHashMap::default();
        for top_level in top_levels {
            let Some((code, name)) = top_level.bound_support_code() else {
                continue;
            };
            if let Some(first) = support_codes.insert(code.clone(), name.clone()) {
                return Err(InternalConsistencyError::DuplicateSupportCodeBinding {
                    support_code: code.to_string(),
                    first,
                    second: name.clone(),
                });
            }
        }
        Ok(CommonTopLevels { support_codes })
    }

    pub fn name_for(&self, support_code: &SupportCodeRef) -> Option<&ResolvedName> {
        self.support_codes.get(support_code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SupportCodeRef, &ResolvedName)> {
        self.support_codes.iter()
    }

    pub fn len(&self) -> usize {
        self.support_codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.support_codes.is_empty()
    }
}

// =============================================================================
// NascentModule / Module
// =============================================================================

/// A module under assembly.
#[derive(Debug)]
pub struct NascentModule {
    pub pos: Position,
    pub code_location: CodeLocationMetadata,
    pub module_metadata: ModuleMetadata,
    pub top_levels: Vec<TopLevel>,
    /// The module's exported result, if it has one.
    pub result: Option<Expression>,
    /// Scope index of the translator that produced this module.
    pub scope_index: usize,
    pub function_type_strategy: FunctionTypeStrategy,
    keys: MetadataKeys,
}

impl NascentModule {
    pub fn new(
        pos: Position,
        code_location: CodeLocationMetadata,
        module_metadata: ModuleMetadata,
        scope_index: usize,
        function_type_strategy: FunctionTypeStrategy,
        keys: MetadataKeys,
    ) -> Self {
        NascentModule {
            pos,
            code_location,
            module_metadata,
            top_levels: Vec::with_capacity(TOP_LEVELS_INITIAL_CAPACITY),
            result: None,
            scope_index,
            function_type_strategy,
            keys,
        }
    }

    pub fn module_name(&self) -> &ModuleName {
        &self.code_location.module_name
    }

    pub fn push(&mut self, top_level: TopLevel) {
        self.top_levels.push(top_level);
    }

    /// False for modules with no target-language counterpart: an empty
    /// preface, or a library configuration file.
    pub fn needs_translation(&self) -> bool {
        let name = self.module_name();
        if name.is_library_config_file() {
            return false;
        }
        !(name.is_preface && self.top_levels.is_empty() && self.result.is_none())
    }

    /// Freeze into a [`Module`].
    ///
    /// # Panics
    ///
    /// If two top-levels bind the same support code. See
    /// [`try_finish`](Self::try_finish).
    pub fn finish(self) -> Module {
        let name = self.module_name().clone();
        match self.try_finish() {
            Ok(module) => module,
            Err(err) => panic!("{name}: {err}"),
        }
    }

    /// Freeze into a [`Module`], dropping compiler fiction and indexing
    /// support-code bindings. Functional-interface type declarations are
    /// dropped too when function types are structural.
    pub fn try_finish(self) -> Result<Module, InternalConsistencyError> {
        let NascentModule {
            pos,
            code_location,
            module_metadata,
            mut top_levels,
            result,
            function_type_strategy,
            keys,
            ..
        } = self;

        let keep_interfaces = function_type_strategy.emits_functional_interfaces();
        let before = top_levels.len();
        top_levels.retain(|top_level| match top_level {
            TopLevel::ModuleLevelDeclaration(decl) => !is_compiler_fiction(decl, &keys),
            TopLevel::TypeDeclaration { metadata, .. } => {
                keep_interfaces || !metadata.contains(&keys.functional_interface)
            }
            _ => true,
        });
        let mut dropped = before - top_levels.len();
        for top_level in &mut top_levels {
            match top_level {
                TopLevel::FunctionDeclaration(function) => {
                    dropped += drop_fiction_in_block(&mut function.body, &keys);
                }
                TopLevel::ModuleInitBlock(block) | TopLevel::Test { body: block, .. } => {
                    dropped += drop_fiction_in_block(block, &keys);
                }
                TopLevel::ModuleLevelDeclaration(_)
                | TopLevel::SupportCodeDeclaration(_)
                | TopLevel::TypeDeclaration { .. } => {}
            }
        }

        let common_top_levels = CommonTopLevels::try_from_top_levels(&top_levels)?;
        debug!(
            module = %code_location.module_name,
            top_levels = top_levels.len(),
            dropped = dropped,
            support_codes = common_top_levels.len(),
            "finished module"
        );
        Ok(Module {
            pos,
            code_location,
            module_metadata,
            top_levels,
            result,
            common_top_levels,
        })
    }
}

/// A finished module, ready for a target emitter.
#[derive(Debug)]
pub struct Module {
    pub pos: Position,
    pub code_location: CodeLocationMetadata,
    pub module_metadata: ModuleMetadata,
    pub top_levels: Vec<TopLevel>,
    pub result: Option<Expression>,
    common_top_levels: CommonTopLevels,
}

impl Module {
    pub fn common_top_levels(&self) -> &CommonTopLevels {
        &self.common_top_levels
    }
}

// =============================================================================
// ModuleTranslator
// =============================================================================

/// Inputs that identify the module being translated.
#[derive(Clone, Debug)]
pub struct ModuleInput {
    pub pos: Position,
    pub code_location: CodeLocationMetadata,
    pub dependency_category: DependencyCategory,
    /// Name holding the module's result, if it produces one.
    pub output_name: Option<ResolvedName>,
    pub output_type: Option<Type>,
}

/// Translates one module of a module set.
pub struct ModuleTranslator<'a> {
    cf_options: CfOptions,
    keys: &'a MetadataKeys,
    store: &'a DefinitionStore,
    /// Temporaries only. Pooled names are minted by the shared tables.
    names: NameMaker,
    pool: ConstantPool<'a>,
    top_levels: Vec<TopLevel>,
}

impl<'a> ModuleTranslator<'a> {
    pub fn new(
        cf_options: CfOptions,
        keys: &'a MetadataKeys,
        store: &'a DefinitionStore,
        scope_index: usize,
        tables: &'a mut SharedNameTables,
        support_network: &'a dyn SupportNetwork,
    ) -> Self {
        debug!(scope_index, ?cf_options, "new module translator");
        ModuleTranslator {
            cf_options,
            keys,
            store,
            names: NameMaker::new(),
            pool: ConstantPool::new(scope_index, tables, support_network),
            top_levels: Vec::with_capacity(TOP_LEVELS_INITIAL_CAPACITY),
        }
    }

    pub fn cf_options(&self) -> CfOptions {
        self.cf_options
    }

    pub fn keys(&self) -> &'a MetadataKeys {
        self.keys
    }

    pub fn scope_index(&self) -> usize {
        self.pool.scope_index()
    }

    pub fn names(&mut self) -> &mut NameMaker {
        &mut self.names
    }

    pub fn pool(&self) -> &ConstantPool<'a> {
        &self.pool
    }

    pub fn unused_temporary_name(&mut self, hint: &str) -> ResolvedName {
        self.names.unused_temporary_name(hint)
    }

    pub fn add_top_level(&mut self, top_level: TopLevel) {
        self.top_levels.push(top_level);
    }

    // -------------------------------------------------------------------------
    // Strategy helpers
    // -------------------------------------------------------------------------

    pub fn zero_value_for(&self, ty: &Type) -> ZeroValueRecord {
        ZeroValues::for_type(self.store, ty)
    }

    pub fn static_method_callee(&self, callee: &Tree) -> Option<StaticMethodCallee<'a>> {
        unpack_static_method_callee(self.store, self.keys, callee)
    }

    pub fn free_failure(&self, pos: Position, output_name: Option<&ResolvedName>) -> Stmt {
        self.cf_options.free_failure(pos, output_name)
    }

    /// How a function type is spelled for this target.
    pub fn function_type_form(&self, sig: &Signature) -> FunctionTypeForm {
        self.function_type_strategy().function_type_form(sig)
    }

    pub fn function_type_strategy(&self) -> FunctionTypeStrategy {
        self.pool.support_network().function_type_strategy()
    }

    // -------------------------------------------------------------------------
    // Pooling
    // -------------------------------------------------------------------------

    pub fn fill_if_absent(
        &mut self,
        pos: Position,
        poolable: Poolable,
        descriptor: &Type,
        metadata: &DeclarationMetadata,
        suggested_name: Option<ResolvedName>,
    ) -> ResolvedName {
        self.pool
            .fill_if_absent(pos, poolable, descriptor, metadata, suggested_name)
    }

    /// A reference to a pooled copy of `value`.
    pub fn pooled_value_ref(&mut self, pos: Position, value: Value, descriptor: Type) -> Expression {
        let poolable = Poolable::Value(PooledValue {
            value,
            descriptor: descriptor.clone(),
        });
        let name = self.fill_if_absent(pos, poolable, &descriptor, &DeclarationMetadata::new(), None);
        Expression::reference(pos, name, descriptor)
    }

    /// A reference to `support_code` bound in this module's scope, pooling
    /// it and its requirements as needed.
    pub fn support_code_ref(
        &mut self,
        pos: Position,
        support_code: SupportCodeRef,
        descriptor: Type,
    ) -> Expression {
        self.pool.pool_requirements(pos, &support_code);
        let name = self.pool.fill_support_code(
            pos,
            support_code,
            &descriptor,
            &DeclarationMetadata::new(),
        );
        Expression::reference(pos, name, descriptor)
    }

    // -------------------------------------------------------------------------
    // Finishing
    // -------------------------------------------------------------------------

    /// End translation of this module. Pooled definitions come first so they
    /// are in scope for everything after them. The result is exported when
    /// the module has an output name and its type can be a value.
    pub fn finish_translation(mut self, input: ModuleInput) -> NascentModule {
        let ModuleInput {
            pos,
            code_location,
            dependency_category,
            output_name,
            output_type,
        } = input;
        let mut module = NascentModule::new(
            pos,
            code_location,
            ModuleMetadata {
                pos: pos.left_edge(),
                dependency_category,
            },
            self.scope_index(),
            self.function_type_strategy(),
            self.keys.clone(),
        );
        module.top_levels.extend(self.pool.take_definitions());
        module.top_levels.append(&mut self.top_levels);

        if let Some(output_name) = output_name {
            let output_is_void = output_type.as_ref().is_some_and(Type::is_void_like);
            if self.cf_options.exports_module_result(output_is_void) {
                let ty = output_type.unwrap_or(Type::Top);
                module.result = Some(Expression::reference(pos.right_edge(), output_name, ty));
            }
        }
        debug!(
            module = %module.code_location.module_name,
            top_levels = module.top_levels.len(),
            exports_result = module.result.is_some(),
            "finished translation"
        );
        module
    }
}

#[cfg(test)]
#[path = "../tests/module_tests.rs"]
mod module_tests;
