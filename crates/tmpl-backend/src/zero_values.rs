//! Default values for declarations that need explicit initialization.

use tmpl_common::limits::MAX_UPPER_BOUND_DEPTH;
use tmpl_ir::{DefId, DefinitionStore, Type, Value};
use tracing::{trace, warn};

/// The default chosen for a declaration of some type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZeroValueRecord {
    pub value: Value,
    /// True when no natural default exists and the declaration must be
    /// widened to admit null.
    pub needs_null_adjustment: bool,
    /// The declaration's effective type.
    pub adjusted_type: Type,
}

impl ZeroValueRecord {
    fn natural(value: Value, ty: Type) -> Self {
        ZeroValueRecord {
            value,
            needs_null_adjustment: false,
            adjusted_type: ty,
        }
    }
}

pub struct ZeroValues;

impl ZeroValues {
    /// Choose a zero value for `ty`.
    ///
    /// Checks run in a fixed order: a nullable type gets null; a formal
    /// defers to its upper bound; `int`, `boolean`, `void` and `string` get
    /// their canonical zero; anything else gets null and a widened type.
    pub fn for_type(store: &DefinitionStore, ty: &Type) -> ZeroValueRecord {
        let record = Self::for_type_at_depth(store, ty, 0);
        trace!(%ty, value = %record.value, adjusted = record.needs_null_adjustment, "zero value");
        record
    }

    fn for_type_at_depth(store: &DefinitionStore, ty: &Type, depth: u32) -> ZeroValueRecord {
        if ty.is_nullable() {
            return ZeroValueRecord::natural(Value::Null, ty.clone());
        }
        if let Type::Formal { def, .. } = ty {
            let bound = store.formal(*def).and_then(|f| f.upper_bounds.first());
            if let Some(bound) = bound {
                if depth < MAX_UPPER_BOUND_DEPTH {
                    return Self::for_type_at_depth(store, bound, depth + 1);
                }
                warn!(def = def.0, depth, "upper bounds too deep; using null");
            }
        }
        let builtin_zero = match ty {
            Type::Defined { def, .. } => match *def {
                DefId::INT => Some(Value::Int(0)),
                DefId::BOOLEAN => Some(Value::Bool(false)),
                DefId::VOID => Some(Value::Void),
                DefId::STRING => Some(Value::string("")),
                _ => None,
            },
            _ => None,
        };
        match builtin_zero {
            Some(value) => ZeroValueRecord::natural(value, ty.clone()),
            None => ZeroValueRecord {
                value: Value::Null,
                needs_null_adjustment: true,
                adjusted_type: ty.with_nullable(true),
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/zero_values_tests.rs"]
mod zero_values_tests;
