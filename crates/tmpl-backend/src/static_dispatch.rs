//! Recognizing statically dispatched method calls.
//!
//! A call like `Math.max(a, b)` reaches the backend as a call whose callee is
//! itself a call of the `getStatic` builtin:
//!
//! ```text
//! Call
//! ├── callee: Call
//! │   ├── callee: Value(fn getStatic)
//! │   ├── Value(type Math)
//! │   └── Value(\max)
//! └── args...
//! ```
//!
//! When the type resolves to a shape with a static function member of that
//! name, the target can emit a direct static call instead of a dynamic one.

use std::sync::Arc;
use tmpl_common::Symbol;
use tmpl_ir::{
    DefId, DefinitionStore, MetadataKeys, StaticProperty, Tree, TypeShape, Value,
    GET_STATIC_BUILTIN,
};
use tracing::trace;

/// A statically resolvable method reference.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticMethodCallee<'a> {
    pub type_id: DefId,
    pub type_shape: &'a TypeShape,
    pub method_name: Arc<str>,
    pub member: &'a StaticProperty,
}

/// Recognize `callee` as a static method of a known type shape.
///
/// Anything that is not exactly a two-argument `getStatic` over a resolved
/// shape and a declared static function yields `None`, and the caller emits a
/// dynamic call instead.
pub fn unpack_static_method_callee<'a>(
    store: &'a DefinitionStore,
    keys: &MetadataKeys,
    callee: &Tree,
) -> Option<StaticMethodCallee<'a>> {
    let Tree::Call(get_static) = callee else {
        return None;
    };
    if get_static.callee.builtin_function_name() != Some(GET_STATIC_BUILTIN) {
        return None;
    }
    let [subject, property] = get_static.args.as_slice() else {
        return None;
    };

    let type_id = match subject.value_or_none()? {
        Value::Type(ty) => ty.definition()?,
        _ => return None,
    };
    let type_shape = store.shape(type_id)?;

    let symbol: &Symbol = match property.value_or_none()? {
        Value::Symbol(symbol) => symbol,
        _ => return None,
    };
    let member = type_shape.static_property(symbol)?;
    if !member.metadata.contains(&keys.fn_) {
        trace!(shape = %type_shape.name, member = %symbol, "static member is not a function");
        return None;
    }

    trace!(shape = %type_shape.name, member = %symbol, "static method callee");
    Some(StaticMethodCallee {
        type_id,
        type_shape,
        method_name: symbol.0.clone(),
        member,
    })
}

#[cfg(test)]
#[path = "../tests/static_dispatch_tests.rs"]
mod static_dispatch_tests;
