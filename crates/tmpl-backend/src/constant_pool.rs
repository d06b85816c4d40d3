//! Constant pool: hoisting constants and support code to module scope.
//!
//! Pool entries ([`Poolable`]) are compared structurally so that two uses of
//! the same constant, or of the same support code in the same scope, share one
//! named slot. Names are tracked in [`SharedNameTables`], one per module set.
//!
//! ## Scope index
//!
//! Support code is keyed by `(identity, scope_index)` rather than identity
//! alone. Two modules in one module set that both use an external helper
//! each get their own local binding, so neither has to import the helper
//! through the other and a dependency cycle cannot arise.
//!
//! ## Uniqueness
//!
//! The pool is the only writer of support-code bindings and never binds one
//! `(identity, scope_index)` pair twice. Later scans rely on that and treat a
//! duplicate as an internal error.

use crate::strategy::FunctionTypeStrategy;
use rustc_hash::FxHashMap;
use tmpl_common::{NameMaker, Position, ResolvedName};
use tmpl_ir::{
    DeclarationMetadata, Declaration, Expression, FunctionValue, Signature, SupportCodeDeclaration,
    SupportCodeRef, SupportCodeRequirement, SupportCodeWrapper, TopLevel, Type, Value,
};
use tracing::{debug, trace};

// =============================================================================
// Pool entries
// =============================================================================

/// Support code bound in one scope of a module set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PooledSupportCode {
    pub support_code: SupportCodeRef,
    pub scope_index: usize,
}

/// A constant and its static type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PooledValue {
    pub value: Value,
    pub descriptor: Type,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Poolable {
    SupportCode(PooledSupportCode),
    Value(PooledValue),
}

impl From<PooledSupportCode> for Poolable {
    fn from(pooled: PooledSupportCode) -> Self {
        Poolable::SupportCode(pooled)
    }
}

impl From<PooledValue> for Poolable {
    fn from(pooled: PooledValue) -> Self {
        Poolable::Value(pooled)
    }
}

/// Preferred base name for the slot holding `poolable`.
///
/// Named builtin functions become `fName`, reified types `vReifiedTypeInt`,
/// other values `v` plus their type tag, and support code its own base name.
pub fn base_name_for(poolable: &Poolable) -> String {
    match poolable {
        Poolable::Value(PooledValue { value, .. }) => {
            let specific = match value {
                Value::Function(f) => f.common_builtin_name().map(|n| format!("f{}", title_case(n))),
                Value::Type(ty) => {
                    let key = ty.definition().and_then(|d| d.builtin_key()).unwrap_or("");
                    Some(format!("vReifiedType{}", title_case(key)))
                }
                _ => None,
            };
            specific.unwrap_or_else(|| format!("v{}", value.type_tag().name()))
        }
        Poolable::SupportCode(PooledSupportCode { support_code, .. }) => support_code
            .base_name()
            .unwrap_or("supportCode")
            .to_string(),
    }
}

fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

// =============================================================================
// Support network
// =============================================================================

/// What a target backend provides to the pool.
pub trait SupportNetwork {
    /// Support code that implements `function` in the target, if any. When
    /// present, pooling the function value pools the support code instead.
    fn support_code_for_function(
        &self,
        pos: Position,
        function: &FunctionValue,
    ) -> Option<SupportCodeRef>;

    fn function_type_strategy(&self) -> FunctionTypeStrategy {
        FunctionTypeStrategy::ToFunctionType
    }
}

// =============================================================================
// SharedNameTables
// =============================================================================

/// Pool names shared by every module in one module set.
///
/// Pooled names are minted here rather than by each module's translator, so
/// two modules never hand out the same name for different entries.
#[derive(Debug, Default)]
pub struct SharedNameTables {
    pooled_to_name: FxHashMap<Poolable, ResolvedName>,
    rev_constant_pool: FxHashMap<ResolvedName, Poolable>,
    names: NameMaker,
}

impl SharedNameTables {
    pub fn new() -> Self {
        SharedNameTables::default()
    }

    pub fn name_for(&self, poolable: &Poolable) -> Option<&ResolvedName> {
        self.pooled_to_name.get(poolable)
    }

    pub fn poolable_for(&self, name: &ResolvedName) -> Option<&Poolable> {
        self.rev_constant_pool.get(name)
    }

    pub fn len(&self) -> usize {
        self.pooled_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pooled_to_name.is_empty()
    }
}

// =============================================================================
// ConstantPool
// =============================================================================

/// The pool for one module: fills slots in the shared tables and collects the
/// definitions that declare them.
pub struct ConstantPool<'a> {
    scope_index: usize,
    tables: &'a mut SharedNameTables,
    support_network: &'a dyn SupportNetwork,
    definitions: Vec<TopLevel>,
}

impl<'a> ConstantPool<'a> {
    pub fn new(
        scope_index: usize,
        tables: &'a mut SharedNameTables,
        support_network: &'a dyn SupportNetwork,
    ) -> Self {
        ConstantPool {
            scope_index,
            tables,
            support_network,
            definitions: Vec::new(),
        }
    }

    pub fn scope_index(&self) -> usize {
        self.scope_index
    }

    pub fn support_network(&self) -> &'a dyn SupportNetwork {
        self.support_network
    }

    /// `support_code` keyed to this pool's scope.
    pub fn pooled(&self, support_code: SupportCodeRef) -> PooledSupportCode {
        PooledSupportCode {
            support_code,
            scope_index: self.scope_index,
        }
    }

    /// A simpler entry `poolable` aliases: function values the target
    /// implements as support code alias that support code.
    fn alternate_poolable(&self, pos: Position, poolable: &Poolable) -> Option<Poolable> {
        match poolable {
            Poolable::Value(PooledValue {
                value: Value::Function(function),
                ..
            }) => self
                .support_network
                .support_code_for_function(pos, function)
                .map(|code| Poolable::SupportCode(self.pooled(code))),
            Poolable::Value(_) | Poolable::SupportCode(_) => None,
        }
    }

    /// True if `value` would be stored as support code rather than a constant.
    pub fn value_needs_pooling(&self, value: &PooledValue) -> bool {
        self.alternate_poolable(Position::UNKNOWN, &Poolable::Value(value.clone()))
            .is_some()
    }

    /// The name bound to `poolable`, creating a slot and its definition if
    /// there is none yet.
    #[tracing::instrument(level = "trace", skip(self, descriptor, metadata))]
    pub fn fill_if_absent(
        &mut self,
        pos: Position,
        poolable: Poolable,
        descriptor: &Type,
        metadata: &DeclarationMetadata,
        suggested_name: Option<ResolvedName>,
    ) -> ResolvedName {
        if let Some(existing) = self.tables.pooled_to_name.get(&poolable) {
            trace!(name = %existing, "reusing pooled name");
            return existing.clone();
        }

        if let Some(alternate) = self.alternate_poolable(pos, &poolable) {
            let name_in_pool =
                self.fill_if_absent(pos, alternate, descriptor, metadata, suggested_name);
            // The reverse table keeps pointing at the alternate.
            self.tables
                .pooled_to_name
                .insert(poolable, name_in_pool.clone());
            return name_in_pool;
        }

        let name_in_pool = match suggested_name {
            Some(name) => {
                self.tables.names.reserve(name.clone());
                name
            }
            None => self
                .tables
                .names
                .unused_source_name(&base_name_for(&poolable)),
        };
        debug!(name = %name_in_pool, scope = self.scope_index, "filling pool slot");

        // Bind before building the definition so a definition can refer to
        // its own slot.
        self.tables
            .pooled_to_name
            .insert(poolable.clone(), name_in_pool.clone());
        self.tables
            .rev_constant_pool
            .insert(name_in_pool.clone(), poolable.clone());

        let definition = match poolable {
            Poolable::SupportCode(pooled) => {
                let descriptor = match descriptor {
                    Type::Function(sig) => sig.clone(),
                    _ => Signature::invalid(),
                };
                TopLevel::SupportCodeDeclaration(SupportCodeDeclaration {
                    pos,
                    metadata: metadata.clone(),
                    name: name_in_pool.clone(),
                    init: SupportCodeWrapper {
                        pos,
                        support_code: pooled.support_code,
                        descriptor,
                    },
                })
            }
            Poolable::Value(pooled) => {
                let init = Expression::Value {
                    pos,
                    value: pooled.value,
                    ty: pooled.descriptor.clone(),
                };
                TopLevel::ModuleLevelDeclaration(
                    Declaration::new(pos, name_in_pool.clone(), pooled.descriptor, Some(init))
                        .with_metadata(metadata.clone()),
                )
            }
        };
        self.definitions.push(definition);
        name_in_pool
    }

    /// Shorthand for pooling support code in this pool's scope.
    pub fn fill_support_code(
        &mut self,
        pos: Position,
        support_code: SupportCodeRef,
        descriptor: &Type,
        metadata: &DeclarationMetadata,
    ) -> ResolvedName {
        let poolable = Poolable::SupportCode(self.pooled(support_code));
        self.fill_if_absent(pos, poolable, descriptor, metadata, None)
    }

    /// A reference to an already pooled entry.
    pub fn ref_or_null(&self, pos: Position, poolable: &Poolable, ty: Type) -> Option<Expression> {
        let name = self.tables.pooled_to_name.get(poolable)?;
        Some(Expression::reference(pos, name.clone(), ty))
    }

    pub fn name_for(&self, poolable: &Poolable) -> Option<&ResolvedName> {
        self.tables.name_for(poolable)
    }

    /// The support code a pooled name is bound to, if it names support code.
    pub fn support_code_for_name(&self, name: &ResolvedName) -> Option<&SupportCodeRef> {
        match self.tables.poolable_for(name)? {
            Poolable::SupportCode(pooled) => Some(&pooled.support_code),
            Poolable::Value(_) => None,
        }
    }

    /// Pool the support code that `support_code` requires.
    pub fn pool_requirements(
        &mut self,
        pos: Position,
        support_code: &SupportCodeRef,
    ) {
        for requirement in support_code.requires() {
            match requirement {
                SupportCodeRequirement::Other {
                    required,
                    descriptor,
                    metadata,
                } => {
                    let poolable = Poolable::SupportCode(self.pooled(required.clone()));
                    let descriptor = Type::Function(descriptor.clone());
                    self.fill_if_absent(pos, poolable, &descriptor, metadata, None);
                }
                SupportCodeRequirement::Library { .. } => {}
            }
        }
    }

    /// Record a support-code declaration built outside the pool.
    ///
    /// # Panics
    ///
    /// If the support code already has a name in this scope.
    pub fn associate_support_code(&mut self, decl: &SupportCodeDeclaration) {
        let pooled = Poolable::SupportCode(self.pooled(decl.init.support_code.clone()));
        assert!(
            !self.tables.pooled_to_name.contains_key(&pooled),
            "{} already pooled in scope {}",
            decl.init.support_code,
            self.scope_index
        );
        self.tables
            .pooled_to_name
            .insert(pooled.clone(), decl.name.clone());
        self.tables
            .rev_constant_pool
            .insert(decl.name.clone(), pooled);
    }

    /// Definitions created so far, in creation order.
    pub fn definitions(&self) -> &[TopLevel] {
        &self.definitions
    }

    /// Take the definitions created so far.
    pub fn take_definitions(&mut self) -> Vec<TopLevel> {
        std::mem::take(&mut self.definitions)
    }
}

#[cfg(test)]
#[path = "../tests/constant_pool_tests.rs"]
mod constant_pool_tests;
