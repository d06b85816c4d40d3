//! Target-capability strategy choices.
//!
//! Each axis is a closed enum, picked once per compilation and never changed
//! during it. Matches over them are exhaustive so that a new strategy is a
//! compile error at every consumption site.

use crate::stmt_or_expr::Stmt;
use serde::Deserialize;
use tmpl_common::{Position, ResolvedName};
use tmpl_ir::{DefId, Expression, Signature, Statement, Type};
use tracing::trace;

/// How operations that may bubble are translated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BubbleBranchStrategy {
    /// A companion boolean flag is tested with an `if`.
    IfHandlerScopeVar,
    /// A bubble is raised as an exception and handled in a catch.
    CatchBubble,
}

/// Whether "no value" can be stored like any other value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepresentationOfVoid {
    ReifyVoid,
    /// Void-typed locals and call results are elided at each use.
    DoNotReifyVoid,
}

/// How function-valued expressions are typed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionTypeStrategy {
    ToFunctionType,
    /// A single-method interface type stands in for the function type.
    ToFunctionalInterface,
}

/// What a function type becomes under a [`FunctionTypeStrategy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionTypeForm {
    /// A dedicated structural function type.
    Structural(Signature),
    /// A nominal interface type, parameterized by the inputs and the result.
    Nominal(Type),
}

impl FunctionTypeStrategy {
    pub fn function_type_form(self, sig: &Signature) -> FunctionTypeForm {
        match self {
            FunctionTypeStrategy::ToFunctionType => FunctionTypeForm::Structural(sig.clone()),
            FunctionTypeStrategy::ToFunctionalInterface => {
                let mut args: Vec<Type> = sig
                    .required_inputs
                    .iter()
                    .chain(&sig.optional_inputs)
                    .cloned()
                    .collect();
                if let Some(rest) = &sig.rest_input {
                    args.push(Type::generic(DefId::LIST, vec![(**rest).clone()]));
                }
                args.push((*sig.return_type).clone());
                FunctionTypeForm::Nominal(Type::generic(DefId::FUNCTION, args))
            }
        }
    }

    /// Whether declarations of functional-interface types are emitted. With
    /// structural function types they are redundant.
    pub fn emits_functional_interfaces(self) -> bool {
        match self {
            FunctionTypeStrategy::ToFunctionType => false,
            FunctionTypeStrategy::ToFunctionalInterface => true,
        }
    }
}

/// Control-flow options fixed for one compilation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CfOptions {
    pub bubble_strategy: BubbleBranchStrategy,
    pub representation_of_void: RepresentationOfVoid,
}

impl CfOptions {
    pub const fn new(
        bubble_strategy: BubbleBranchStrategy,
        representation_of_void: RepresentationOfVoid,
    ) -> Self {
        CfOptions {
            bubble_strategy,
            representation_of_void,
        }
    }

    /// Statements for a failure that escapes module initialization.
    ///
    /// With exceptions this is a throw. Otherwise the module result, if there
    /// is one, is set to the bubble sentinel and initialization is marked
    /// failed.
    pub fn free_failure(&self, pos: Position, output_name: Option<&ResolvedName>) -> Stmt {
        trace!(strategy = ?self.bubble_strategy, "free failure");
        match self.bubble_strategy {
            BubbleBranchStrategy::CatchBubble => Stmt::One(Statement::Throw { pos }),
            BubbleBranchStrategy::IfHandlerScopeVar => {
                let mut stmts = Vec::with_capacity(2);
                if let Some(name) = output_name {
                    stmts.push(Statement::assign(
                        pos,
                        name.clone(),
                        Expression::BubbleSentinel { pos },
                    ));
                }
                stmts.push(Statement::ModuleInitFailed { pos });
                Stmt::many(pos, stmts)
            }
        }
    }

    /// Whether a module's result is exported. A void result is exported only
    /// when void is a real value.
    pub fn exports_module_result(&self, output_type_is_void: bool) -> bool {
        match self.representation_of_void {
            RepresentationOfVoid::ReifyVoid => true,
            RepresentationOfVoid::DoNotReifyVoid => !output_type_is_void,
        }
    }

    /// Whether a value of `ty` can be stored in a local.
    pub fn can_store(&self, ty: &Type) -> bool {
        match self.representation_of_void {
            RepresentationOfVoid::ReifyVoid => true,
            RepresentationOfVoid::DoNotReifyVoid => !ty.is_void_like(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/strategy_tests.rs"]
mod strategy_tests;
