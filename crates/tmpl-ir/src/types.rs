//! Types as inferred for IR nodes.
//!
//! A [`Type`] is either a reference to a definition in the
//! [`DefinitionStore`](crate::def::DefinitionStore), a structural function
//! type, or one of the two extremes (`Top`, `Invalid`). Nullability is a flag
//! on the nominal forms rather than a union, which is all the strategy layer
//! needs to widen a type for a null default.

use std::fmt;

// =============================================================================
// DefId - Definition Identifier
// =============================================================================

/// Identifies a type definition in a [`DefinitionStore`](crate::def::DefinitionStore).
///
/// The built-in definitions occupy fixed ids so that code can refer to them
/// without a store in hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    pub const INT: Self = Self(1);
    pub const FLOAT64: Self = Self(2);
    pub const BOOLEAN: Self = Self(3);
    pub const VOID: Self = Self(4);
    pub const STRING: Self = Self(5);
    pub const NULL: Self = Self(6);
    /// The type of types.
    pub const TYPE: Self = Self(7);
    pub const FUNCTION: Self = Self(8);
    pub const LIST: Self = Self(9);

    /// First id handed out for user definitions.
    pub const FIRST_USER: u32 = 10;

    /// Built-in definitions with their keys, in id order.
    pub const BUILTINS: [(Self, &'static str); 9] = [
        (Self::INT, "int"),
        (Self::FLOAT64, "float64"),
        (Self::BOOLEAN, "boolean"),
        (Self::VOID, "void"),
        (Self::STRING, "string"),
        (Self::NULL, "null"),
        (Self::TYPE, "type"),
        (Self::FUNCTION, "function"),
        (Self::LIST, "list"),
    ];

    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }

    pub const fn is_builtin(self) -> bool {
        self.0 >= Self::INT.0 && self.0 < Self::FIRST_USER
    }

    /// The key of a built-in definition, e.g. `"int"`.
    pub fn builtin_key(self) -> Option<&'static str> {
        Self::BUILTINS
            .iter()
            .find(|(id, _)| *id == self)
            .map(|(_, key)| *key)
    }
}

// =============================================================================
// Type
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// A nominal type, possibly parameterized.
    Defined {
        def: DefId,
        args: Vec<Type>,
        nullable: bool,
    },
    /// A reference to a type formal (type parameter).
    Formal { def: DefId, nullable: bool },
    /// A structural function type.
    Function(Signature),
    /// The top type. Already admits null.
    Top,
    /// Marks a type that inference could not settle.
    Invalid,
}

impl Type {
    /// A non-nullable, unparameterized nominal type.
    pub fn simple(def: DefId) -> Self {
        Type::Defined {
            def,
            args: Vec::new(),
            nullable: false,
        }
    }

    pub fn generic(def: DefId, args: Vec<Type>) -> Self {
        Type::Defined {
            def,
            args,
            nullable: false,
        }
    }

    pub fn formal(def: DefId) -> Self {
        Type::Formal {
            def,
            nullable: false,
        }
    }

    pub fn int() -> Self {
        Type::simple(DefId::INT)
    }

    pub fn boolean() -> Self {
        Type::simple(DefId::BOOLEAN)
    }

    pub fn string() -> Self {
        Type::simple(DefId::STRING)
    }

    pub fn void() -> Self {
        Type::simple(DefId::VOID)
    }

    pub fn null() -> Self {
        Type::Defined {
            def: DefId::NULL,
            args: Vec::new(),
            nullable: true,
        }
    }

    /// Whether a value of this type may be null.
    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Defined { def, nullable, .. } => *nullable || *def == DefId::NULL,
            Type::Formal { nullable, .. } => *nullable,
            Type::Top => true,
            Type::Function(_) | Type::Invalid => false,
        }
    }

    /// This type with its nullability set. Forms without a nullability flag
    /// are returned unchanged.
    pub fn with_nullable(&self, nullable: bool) -> Self {
        match self {
            Type::Defined { def, args, .. } => Type::Defined {
                def: *def,
                args: args.clone(),
                nullable,
            },
            Type::Formal { def, .. } => Type::Formal {
                def: *def,
                nullable,
            },
            Type::Function(_) | Type::Top | Type::Invalid => self.clone(),
        }
    }

    /// The definition this type refers to, if any.
    pub fn definition(&self) -> Option<DefId> {
        match self {
            Type::Defined { def, .. } | Type::Formal { def, .. } => Some(*def),
            Type::Function(_) => Some(DefId::FUNCTION),
            Type::Top | Type::Invalid => None,
        }
    }

    /// True for the type of types, the inferred type of a declaration that
    /// only names a type.
    pub fn is_type_type(&self) -> bool {
        matches!(self, Type::Defined { def, .. } if *def == DefId::TYPE)
    }

    /// True for `void` and for types that cannot produce a value.
    pub fn is_void_like(&self) -> bool {
        matches!(self, Type::Defined { def, nullable: false, .. } if *def == DefId::VOID)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let question = |nullable: bool| if nullable { "?" } else { "" };
        match self {
            Type::Defined {
                def,
                args,
                nullable,
            } => {
                match def.builtin_key() {
                    Some(key) => write!(f, "{key}")?,
                    None => write!(f, "#{}", def.0)?,
                }
                if !args.is_empty() {
                    f.write_str("<")?;
                    write_list(f, args)?;
                    f.write_str(">")?;
                }
                f.write_str(question(*nullable))
            }
            Type::Formal { def, nullable } => write!(f, "'{}{}", def.0, question(*nullable)),
            Type::Function(sig) => write!(f, "{sig}"),
            Type::Top => f.write_str("top"),
            Type::Invalid => f.write_str("invalid"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[Type]) -> fmt::Result {
    for (i, t) in types.iter().enumerate() {
        if i != 0 {
            f.write_str(", ")?;
        }
        write!(f, "{t}")?;
    }
    Ok(())
}

// =============================================================================
// Signature
// =============================================================================

/// A function signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub type_formals: Vec<DefId>,
    pub required_inputs: Vec<Type>,
    pub optional_inputs: Vec<Type>,
    pub rest_input: Option<Box<Type>>,
    pub return_type: Box<Type>,
}

impl Signature {
    pub fn new(required_inputs: Vec<Type>, return_type: Type) -> Self {
        Signature {
            type_formals: Vec::new(),
            required_inputs,
            optional_inputs: Vec::new(),
            rest_input: None,
            return_type: Box::new(return_type),
        }
    }

    /// Signature used where a descriptor is required but none could be
    /// inferred.
    pub fn invalid() -> Self {
        Signature::new(Vec::new(), Type::Invalid)
    }

    /// Number of fixed (required plus optional) inputs.
    pub fn arity(&self) -> usize {
        self.required_inputs.len() + self.optional_inputs.len()
    }

    pub fn returns_void(&self) -> bool {
        self.return_type.is_void_like()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn (")?;
        write_list(f, &self.required_inputs)?;
        for (i, t) in self.optional_inputs.iter().enumerate() {
            if i != 0 || !self.required_inputs.is_empty() {
                f.write_str(", ")?;
            }
            write!(f, "{t}?")?;
        }
        if let Some(rest) = &self.rest_input {
            if self.arity() != 0 {
                f.write_str(", ")?;
            }
            write!(f, "...{rest}")?;
        }
        write!(f, "): {}", self.return_type)
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
