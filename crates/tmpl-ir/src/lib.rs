//! The minimal IR data model consumed by the TmpL backend strategy layer.
//!
//! - Types and the definition store (`Type`, `DefId`, `DefinitionStore`)
//! - Constant values (`Value`, `FunctionValue`)
//! - Declaration metadata and reserved keys (`DeclarationMetadata`, `MetadataKeys`)
//! - The typed call tree produced by inference (`Tree`)
//! - TmpL statements, expressions and top-levels
//! - Typed operators and `join`

pub mod types;
pub use types::{DefId, Signature, Type};

pub mod def;
pub use def::{
    Definition, DefinitionStore, StaticProperty, TypeFormal, TypeShape, Visibility,
};

pub mod values;
pub use values::{FunctionValue, TypeTag, Value};

pub mod metadata;
pub use metadata::{DeclarationMetadata, MetadataKeys, MetadataValue};

// Typed call tree (pre-TmpL)
pub mod tree;
pub use tree::{CallTree, GET_STATIC_BUILTIN, NameLeaf, Tree, ValueLeaf};

// TmpL nodes
pub mod tmpl;
pub use tmpl::{
    BlockStatement, Declaration, Expression, Formal, FunctionDeclaration, Statement, SupportCode,
    SupportCodeDeclaration, SupportCodeKind, SupportCodeRef, SupportCodeRequirement,
    SupportCodeWrapper, TopLevel,
};

pub mod operators;
pub use operators::{Associativity, Fixity, OperatorDefinition, TmplOperator, join};
