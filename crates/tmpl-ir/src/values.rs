//! Constant values.
//!
//! Values appear as IR leaves, in declaration metadata, and as constant-pool
//! keys. Equality and hashing are total: `Float64` compares by bit pattern so
//! that `NaN` can be pooled and `0.0` and `-0.0` stay distinct.

use crate::types::{DefId, Type};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tmpl_common::Symbol;

// =============================================================================
// TypeTag
// =============================================================================

/// Runtime category of a [`Value`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Null,
    Void,
    Boolean,
    Int,
    Float64,
    String,
    Symbol,
    Type,
    Function,
    List,
}

impl TypeTag {
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "Null",
            TypeTag::Void => "Void",
            TypeTag::Boolean => "Boolean",
            TypeTag::Int => "Int",
            TypeTag::Float64 => "Float64",
            TypeTag::String => "String",
            TypeTag::Symbol => "Symbol",
            TypeTag::Type => "Type",
            TypeTag::Function => "Function",
            TypeTag::List => "List",
        }
    }
}

// =============================================================================
// FunctionValue
// =============================================================================

/// A function known at compile time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionValue {
    /// A builtin identified by name, e.g. `getStatic`.
    NamedBuiltin(Arc<str>),
    /// An overload set covering several functions.
    Cover(Vec<FunctionValue>),
    /// Any other function, identified by a stable id.
    Opaque(u32),
}

impl FunctionValue {
    pub fn named_builtin(name: impl Into<Arc<str>>) -> Self {
        FunctionValue::NamedBuiltin(name.into())
    }

    /// The builtin name if this is a named builtin, or a cover whose members
    /// are all named builtins sharing one name.
    pub fn common_builtin_name(&self) -> Option<&str> {
        match self {
            FunctionValue::NamedBuiltin(name) => Some(name),
            FunctionValue::Cover(covered) => {
                let mut names = covered.iter().map(|f| match f {
                    FunctionValue::NamedBuiltin(name) => Some(&**name),
                    _ => None,
                });
                let first = names.next()??;
                names.all(|n| n == Some(first)).then_some(first)
            }
            FunctionValue::Opaque(_) => None,
        }
    }
}

// =============================================================================
// Value
// =============================================================================

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Void,
    Bool(bool),
    Int(i64),
    Float64(f64),
    String(Arc<str>),
    Symbol(Symbol),
    /// A reified type.
    Type(Type),
    Function(FunctionValue),
    List(Arc<[Value]>),
}

impl Value {
    pub fn string(text: impl Into<Arc<str>>) -> Self {
        Value::String(text.into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Void => TypeTag::Void,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Int(_) => TypeTag::Int,
            Value::Float64(_) => TypeTag::Float64,
            Value::String(_) => TypeTag::String,
            Value::Symbol(_) => TypeTag::Symbol,
            Value::Type(_) => TypeTag::Type,
            Value::Function(_) => TypeTag::Function,
            Value::List(_) => TypeTag::List,
        }
    }

    /// The static type a literal of this value has, where that is fixed.
    pub fn natural_type(&self) -> Type {
        match self {
            Value::Null => Type::null(),
            Value::Void => Type::void(),
            Value::Bool(_) => Type::boolean(),
            Value::Int(_) => Type::int(),
            Value::Float64(_) => Type::simple(DefId::FLOAT64),
            Value::String(_) => Type::string(),
            Value::Type(_) => Type::simple(DefId::TYPE),
            Value::Function(_) => Type::simple(DefId::FUNCTION),
            Value::List(_) => Type::generic(DefId::LIST, vec![Type::Top]),
            Value::Symbol(_) => Type::Top,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Void, Value::Void) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_tag().hash(state);
        match self {
            Value::Null | Value::Void => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float64(f) => f.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::Symbol(s) => s.hash(state),
            Value::Type(t) => t.hash(state),
            Value::Function(f) => f.hash(state),
            Value::List(items) => items.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Void => f.write_str("void"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float64(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Type(t) => write!(f, "type ({t})"),
            Value::Function(FunctionValue::NamedBuiltin(name)) => write!(f, "fn {name}"),
            Value::Function(_) => f.write_str("fn"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/values_tests.rs"]
mod values_tests;
