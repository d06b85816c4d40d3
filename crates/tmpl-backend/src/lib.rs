//! The TmpL backend strategy layer.
//!
//! Sits between the type-checked IR and the per-target emitters and decides
//! how IR constructs map onto what each target can express:
//!
//! - Operator folding (`join`, re-exported from `tmpl-ir`)
//! - Zero values for explicitly initialized declarations (`ZeroValues`)
//! - Statement/expression duality (`StmtOrExpr`)
//! - Strategy choices and target presets (`CfOptions`, `TargetProfile`)
//! - Constant pooling (`ConstantPool`, `Poolable`)
//! - Static-dispatch recognition (`unpack_static_method_callee`)
//! - Module assembly (`ModuleTranslator`, `NascentModule`, `CommonTopLevels`)
//! - Documentation extraction (`autodoc_for`, `FnAutodoc`)
//!
//! Everything here is synchronous. A `ModuleTranslator` and its pool are
//! owned by one translation at a time; translate independent module sets
//! with independent `SharedNameTables`.

pub use tmpl_ir::operators::{Associativity, OperatorDefinition, TmplOperator, join};

pub mod zero_values;
pub use zero_values::{ZeroValueRecord, ZeroValues};

pub mod stmt_or_expr;
pub use stmt_or_expr::{OneExpr, RawNode, Stmt, StmtList, StmtOrExpr};

pub mod strategy;
pub use strategy::{
    BubbleBranchStrategy, CfOptions, FunctionTypeForm, FunctionTypeStrategy, RepresentationOfVoid,
};

pub mod target_profile;
pub use target_profile::{KNOWN_TARGETS, TargetProfile, TargetProfileConfig};

pub mod constant_pool;
pub use constant_pool::{
    ConstantPool, Poolable, PooledSupportCode, PooledValue, SharedNameTables, SupportNetwork,
    base_name_for,
};

pub mod static_dispatch;
pub use static_dispatch::{StaticMethodCallee, unpack_static_method_callee};

pub mod module;
pub use module::{
    CodeLocationMetadata, CommonTopLevels, DependencyCategory, InternalConsistencyError, Module,
    ModuleInput, ModuleMetadata, ModuleTranslator, NascentModule, is_compiler_fiction,
};

pub mod autodoc;
pub use autodoc::{Autodoc, FnAutodoc, ParamAutodoc, autodoc_for};

pub use tmpl_common::comment_safe;
