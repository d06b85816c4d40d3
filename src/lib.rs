//! TmpL backend strategy layer.
//!
//! Facade over the workspace crates:
//!
//! - [`common`]: positions, paths, names, output tokens, escaping
//! - [`ir`]: the typed IR the layer consumes
//! - [`backend`]: the strategy layer itself
//!
//! The most used items are re-exported at the root.

pub use tmpl_backend as backend;
pub use tmpl_common as common;
pub use tmpl_ir as ir;

pub mod tracing_config;

// Re-export the strategy layer's entry points.
pub use tmpl_backend::{
    BubbleBranchStrategy, CfOptions, CommonTopLevels, ConstantPool, FnAutodoc,
    FunctionTypeStrategy, ModuleTranslator, NascentModule, Poolable, RepresentationOfVoid,
    SharedNameTables, StmtOrExpr, SupportNetwork, TargetProfile, ZeroValues, autodoc_for,
    comment_safe, is_compiler_fiction, join, unpack_static_method_callee,
};

// Re-export the IR model.
pub use tmpl_ir::{DefinitionStore, Expression, MetadataKeys, Statement, TmplOperator, TopLevel, Type, Value};

// Re-export common types.
pub use tmpl_common::{ModuleName, OutName, Position, ResolvedName};
