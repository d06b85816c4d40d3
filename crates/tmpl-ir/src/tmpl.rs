//! TmpL: the statement-level IR handed to target emitters.
//!
//! This module defines the subset of TmpL nodes the strategy layer builds or
//! inspects: expressions, statements, blocks, and module top-levels, plus
//! references to shared support code.
//!
//! # Structure
//!
//! ```text
//! TopLevel ─┬─ ModuleLevelDeclaration(Declaration)
//!           ├─ SupportCodeDeclaration ── SupportCodeWrapper ── SupportCodeRef
//!           ├─ TypeDeclaration
//!           ├─ FunctionDeclaration ── BlockStatement ── Statement*
//!           ├─ ModuleInitBlock ── BlockStatement
//!           └─ Test ── BlockStatement
//! ```
//!
//! Builder helpers (`Expression::reference`, `Statement::expr`, ...) keep test
//! and strategy code short.

use crate::metadata::DeclarationMetadata;
use crate::operators::TmplOperator;
use crate::types::{DefId, Signature, Type};
use crate::values::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tmpl_common::{Position, Positioned, ResolvedName};

// =============================================================================
// Support code
// =============================================================================

/// Helper code generated once per module set and shared by reference.
#[derive(Debug)]
pub struct SupportCode {
    pub kind: SupportCodeKind,
    /// Other support code that must be in scope wherever this is used.
    pub requires: Vec<SupportCodeRequirement>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SupportCodeKind {
    /// Support code with a preferred name in output.
    Named { base_name: Arc<str> },
    /// Support code compiled separately and referenced by a stable key.
    SeparatelyCompiled { stable_key: Arc<str> },
    /// Code spliced in at the use site.
    Inline,
}

#[derive(Clone, Debug)]
pub enum SupportCodeRequirement {
    Other {
        required: SupportCodeRef,
        descriptor: Signature,
        metadata: DeclarationMetadata,
    },
    /// A library dependency, resolved by the build rather than the pool.
    Library { name: Arc<str> },
}

/// A shared reference to [`SupportCode`].
///
/// Identity is by pointer: two references are equal only if they point at
/// the same support code, even if the code itself is structurally equal.
#[derive(Clone, Debug)]
pub struct SupportCodeRef(Arc<SupportCode>);

impl SupportCodeRef {
    pub fn new(support_code: SupportCode) -> Self {
        SupportCodeRef(Arc::new(support_code))
    }

    pub fn named(base_name: impl Into<Arc<str>>) -> Self {
        SupportCodeRef::new(SupportCode {
            kind: SupportCodeKind::Named {
                base_name: base_name.into(),
            },
            requires: Vec::new(),
        })
    }

    /// The preferred base name for a binding of this support code.
    pub fn base_name(&self) -> Option<&str> {
        match &self.0.kind {
            SupportCodeKind::Named { base_name } => Some(base_name),
            SupportCodeKind::SeparatelyCompiled { stable_key } => Some(stable_key),
            SupportCodeKind::Inline => None,
        }
    }

    pub fn requires(&self) -> &[SupportCodeRequirement] {
        &self.0.requires
    }

    pub fn kind(&self) -> &SupportCodeKind {
        &self.0.kind
    }
}

impl PartialEq for SupportCodeRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SupportCodeRef {}

impl Hash for SupportCodeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Display for SupportCodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base_name() {
            Some(name) => write!(f, "SupportCode({name})"),
            None => write!(f, "SupportCode({:p})", Arc::as_ptr(&self.0)),
        }
    }
}

/// Support code in the position of an initializer, with its descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct SupportCodeWrapper {
    pub pos: Position,
    pub support_code: SupportCodeRef,
    pub descriptor: Signature,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Reference {
        pos: Position,
        name: ResolvedName,
        ty: Type,
    },
    Value {
        pos: Position,
        value: Value,
        ty: Type,
    },
    Call {
        pos: Position,
        callee: Box<Expression>,
        args: Vec<Expression>,
        ty: Type,
    },
    Infix {
        pos: Position,
        left: Box<Expression>,
        op: TmplOperator,
        right: Box<Expression>,
    },
    Prefix {
        pos: Position,
        op: TmplOperator,
        operand: Box<Expression>,
    },
    /// The value stored into a module result when initialization failed.
    BubbleSentinel { pos: Position },
}

impl Expression {
    pub fn reference(pos: Position, name: ResolvedName, ty: Type) -> Self {
        Expression::Reference { pos, name, ty }
    }

    pub fn value(pos: Position, value: Value) -> Self {
        let ty = value.natural_type();
        Expression::Value { pos, value, ty }
    }

    pub fn call(pos: Position, callee: Expression, args: Vec<Expression>, ty: Type) -> Self {
        Expression::Call {
            pos,
            callee: Box::new(callee),
            args,
            ty,
        }
    }

    pub fn infix(pos: Position, left: Expression, op: TmplOperator, right: Expression) -> Self {
        Expression::Infix {
            pos,
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn prefix(pos: Position, op: TmplOperator, operand: Expression) -> Self {
        Expression::Prefix {
            pos,
            op,
            operand: Box::new(operand),
        }
    }

    pub fn ty(&self) -> Type {
        match self {
            Expression::Reference { ty, .. }
            | Expression::Value { ty, .. }
            | Expression::Call { ty, .. } => ty.clone(),
            Expression::Infix { op, .. } | Expression::Prefix { op, .. } => op.result_type(),
            Expression::BubbleSentinel { .. } => Type::Invalid,
        }
    }
}

impl Positioned for Expression {
    fn pos(&self) -> Position {
        match self {
            Expression::Reference { pos, .. }
            | Expression::Value { pos, .. }
            | Expression::Call { pos, .. }
            | Expression::Infix { pos, .. }
            | Expression::Prefix { pos, .. }
            | Expression::BubbleSentinel { pos } => *pos,
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// A named declaration, at module level or as a local.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub pos: Position,
    pub metadata: DeclarationMetadata,
    pub name: ResolvedName,
    pub ty: Type,
    pub init: Option<Expression>,
    pub assign_once: bool,
}

impl Declaration {
    pub fn new(pos: Position, name: ResolvedName, ty: Type, init: Option<Expression>) -> Self {
        Declaration {
            pos,
            metadata: DeclarationMetadata::new(),
            name,
            ty,
            init,
            assign_once: true,
        }
    }

    pub fn with_metadata(mut self, metadata: DeclarationMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A function formal parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Formal {
    pub pos: Position,
    pub name: ResolvedName,
    pub ty: Type,
    pub metadata: DeclarationMetadata,
}

impl Formal {
    pub fn new(pos: Position, name: ResolvedName, ty: Type) -> Self {
        Formal {
            pos,
            name,
            ty,
            metadata: DeclarationMetadata::new(),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct BlockStatement {
    pub pos: Position,
    pub body: Vec<Statement>,
}

impl BlockStatement {
    pub fn new(pos: Position, body: Vec<Statement>) -> Self {
        BlockStatement { pos, body }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Expression {
        pos: Position,
        expr: Expression,
    },
    Block(BlockStatement),
    Assignment {
        pos: Position,
        name: ResolvedName,
        value: Expression,
    },
    LocalDeclaration(Declaration),
    Return {
        pos: Position,
        value: Option<Expression>,
    },
    If {
        pos: Position,
        test: Expression,
        consequent: BlockStatement,
        alternate: Option<Box<Statement>>,
    },
    /// Raises a bubble as an exception.
    Throw { pos: Position },
    /// Signals that module initialization failed.
    ModuleInitFailed { pos: Position },
}

impl Statement {
    /// Wrap an expression as an expression statement.
    pub fn expr(expr: Expression) -> Self {
        Statement::Expression {
            pos: expr.pos(),
            expr,
        }
    }

    pub fn block(pos: Position, body: Vec<Statement>) -> Self {
        Statement::Block(BlockStatement::new(pos, body))
    }

    pub fn assign(pos: Position, name: ResolvedName, value: Expression) -> Self {
        Statement::Assignment { pos, name, value }
    }

    pub fn ret(pos: Position, value: Option<Expression>) -> Self {
        Statement::Return { pos, value }
    }
}

impl Positioned for Statement {
    fn pos(&self) -> Position {
        match self {
            Statement::Block(block) => block.pos,
            Statement::LocalDeclaration(decl) => decl.pos,
            Statement::Expression { pos, .. }
            | Statement::Assignment { pos, .. }
            | Statement::Return { pos, .. }
            | Statement::If { pos, .. }
            | Statement::Throw { pos }
            | Statement::ModuleInitFailed { pos } => *pos,
        }
    }
}

// =============================================================================
// Top levels
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDeclaration {
    pub pos: Position,
    pub metadata: DeclarationMetadata,
    pub name: ResolvedName,
    pub params: Vec<Formal>,
    pub return_type: Type,
    pub body: BlockStatement,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SupportCodeDeclaration {
    pub pos: Position,
    pub metadata: DeclarationMetadata,
    pub name: ResolvedName,
    pub init: SupportCodeWrapper,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TopLevel {
    ModuleLevelDeclaration(Declaration),
    SupportCodeDeclaration(SupportCodeDeclaration),
    TypeDeclaration {
        pos: Position,
        metadata: DeclarationMetadata,
        name: ResolvedName,
        def: DefId,
    },
    FunctionDeclaration(FunctionDeclaration),
    ModuleInitBlock(BlockStatement),
    Test {
        pos: Position,
        name: Arc<str>,
        body: BlockStatement,
    },
}

impl TopLevel {
    pub fn support_code_declaration(
        pos: Position,
        name: ResolvedName,
        support_code: SupportCodeRef,
        descriptor: Signature,
    ) -> Self {
        TopLevel::SupportCodeDeclaration(SupportCodeDeclaration {
            pos,
            metadata: DeclarationMetadata::new(),
            name,
            init: SupportCodeWrapper {
                pos,
                support_code,
                descriptor,
            },
        })
    }

    /// The support code and name this top-level binds, if it is a
    /// support-code declaration.
    pub fn bound_support_code(&self) -> Option<(&SupportCodeRef, &ResolvedName)> {
        match self {
            TopLevel::SupportCodeDeclaration(decl) => Some((&decl.init.support_code, &decl.name)),
            _ => None,
        }
    }

    /// The name this top-level declares, if any.
    pub fn declared_name(&self) -> Option<&ResolvedName> {
        match self {
            TopLevel::ModuleLevelDeclaration(decl) => Some(&decl.name),
            TopLevel::SupportCodeDeclaration(decl) => Some(&decl.name),
            TopLevel::TypeDeclaration { name, .. } => Some(name),
            TopLevel::FunctionDeclaration(decl) => Some(&decl.name),
            TopLevel::ModuleInitBlock(_) | TopLevel::Test { .. } => None,
        }
    }
}

impl Positioned for TopLevel {
    fn pos(&self) -> Position {
        match self {
            TopLevel::ModuleLevelDeclaration(decl) => decl.pos,
            TopLevel::SupportCodeDeclaration(decl) => decl.pos,
            TopLevel::FunctionDeclaration(decl) => decl.pos,
            TopLevel::ModuleInitBlock(block) => block.pos,
            TopLevel::TypeDeclaration { pos, .. } | TopLevel::Test { pos, .. } => *pos,
        }
    }
}

#[cfg(test)]
#[path = "../tests/tmpl_tests.rs"]
mod tmpl_tests;
