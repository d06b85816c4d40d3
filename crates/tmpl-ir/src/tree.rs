//! The typed call tree, as produced by type inference.
//!
//! Only the node kinds the strategy layer pattern-matches on are modelled:
//! calls, constant leaves, and name leaves. Each carries its inferred type
//! when inference attached one.

use crate::types::Type;
use crate::values::{FunctionValue, Value};
use tmpl_common::{Position, Positioned, ResolvedName};

/// Name of the builtin that reads a static member: `getStatic(Type, \member)`.
pub const GET_STATIC_BUILTIN: &str = "getStatic";

#[derive(Clone, Debug, PartialEq)]
pub enum Tree {
    Call(CallTree),
    Value(ValueLeaf),
    Name(NameLeaf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallTree {
    pub pos: Position,
    pub callee: Box<Tree>,
    pub args: Vec<Tree>,
    pub ty: Option<Type>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueLeaf {
    pub pos: Position,
    pub value: Value,
    pub ty: Option<Type>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NameLeaf {
    pub pos: Position,
    pub name: ResolvedName,
    pub ty: Option<Type>,
}

impl Tree {
    pub fn call(pos: Position, callee: Tree, args: Vec<Tree>) -> Self {
        Tree::Call(CallTree {
            pos,
            callee: Box::new(callee),
            args,
            ty: None,
        })
    }

    pub fn value(pos: Position, value: Value) -> Self {
        Tree::Value(ValueLeaf {
            pos,
            value,
            ty: None,
        })
    }

    pub fn name(pos: Position, name: ResolvedName) -> Self {
        Tree::Name(NameLeaf {
            pos,
            name,
            ty: None,
        })
    }

    /// The `getStatic` builtin as a callee leaf.
    pub fn get_static(pos: Position) -> Self {
        Tree::value(
            pos,
            Value::Function(FunctionValue::named_builtin(GET_STATIC_BUILTIN)),
        )
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        match &mut self {
            Tree::Call(call) => call.ty = Some(ty),
            Tree::Value(leaf) => leaf.ty = Some(ty),
            Tree::Name(leaf) => leaf.ty = Some(ty),
        }
        self
    }

    pub fn ty(&self) -> Option<&Type> {
        match self {
            Tree::Call(call) => call.ty.as_ref(),
            Tree::Value(leaf) => leaf.ty.as_ref(),
            Tree::Name(leaf) => leaf.ty.as_ref(),
        }
    }

    /// The constant value of a value leaf.
    pub fn value_or_none(&self) -> Option<&Value> {
        match self {
            Tree::Value(leaf) => Some(&leaf.value),
            Tree::Call(_) | Tree::Name(_) => None,
        }
    }

    /// The builtin function name if this is a leaf holding a named builtin.
    pub fn builtin_function_name(&self) -> Option<&str> {
        match self.value_or_none()?.as_function()? {
            FunctionValue::NamedBuiltin(name) => Some(name),
            FunctionValue::Cover(_) | FunctionValue::Opaque(_) => None,
        }
    }
}

impl Positioned for Tree {
    fn pos(&self) -> Position {
        match self {
            Tree::Call(call) => call.pos,
            Tree::Value(leaf) => leaf.pos,
            Tree::Name(leaf) => leaf.pos,
        }
    }
}
