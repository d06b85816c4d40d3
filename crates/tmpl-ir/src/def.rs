//! Type definitions and their storage.
//!
//! The [`DefinitionStore`] is the explicit lookup table that resolves a
//! [`DefId`] to its shape or formal. Built-in definitions are registered at
//! construction time under their fixed ids; user definitions get sequential
//! ids starting at [`DefId::FIRST_USER`].

use crate::metadata::DeclarationMetadata;
use crate::types::{DefId, Type};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tmpl_common::Symbol;
use tracing::trace;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// A static member of a type shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticProperty {
    pub symbol: Symbol,
    pub visibility: Visibility,
    pub metadata: DeclarationMetadata,
}

impl StaticProperty {
    pub fn new(symbol: Symbol, visibility: Visibility, metadata: DeclarationMetadata) -> Self {
        StaticProperty {
            symbol,
            visibility,
            metadata,
        }
    }
}

/// Structural description of a nominal type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeShape {
    pub name: Arc<str>,
    pub metadata: DeclarationMetadata,
    pub static_properties: Vec<StaticProperty>,
}

impl TypeShape {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        TypeShape {
            name: name.into(),
            metadata: DeclarationMetadata::new(),
            static_properties: Vec::new(),
        }
    }

    pub fn with_static(mut self, property: StaticProperty) -> Self {
        self.static_properties.push(property);
        self
    }

    pub fn static_property(&self, symbol: &Symbol) -> Option<&StaticProperty> {
        self.static_properties.iter().find(|p| &p.symbol == symbol)
    }
}

/// A type parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeFormal {
    pub name: Arc<str>,
    pub upper_bounds: Vec<Type>,
}

impl TypeFormal {
    pub fn new(name: impl Into<Arc<str>>, upper_bounds: Vec<Type>) -> Self {
        TypeFormal {
            name: name.into(),
            upper_bounds,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Definition {
    Shape(TypeShape),
    Formal(TypeFormal),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Shape(shape) => &shape.name,
            Definition::Formal(formal) => &formal.name,
        }
    }
}

/// Maps [`DefId`]s to definitions.
#[derive(Debug)]
pub struct DefinitionStore {
    definitions: FxHashMap<DefId, Definition>,
    next_id: u32,
}

impl Default for DefinitionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionStore {
    pub fn new() -> Self {
        let mut definitions = FxHashMap::default();
        for (id, key) in DefId::BUILTINS {
            let mut name = String::with_capacity(key.len());
            let mut chars = key.chars();
            if let Some(first) = chars.next() {
                name.push(first.to_ascii_uppercase());
            }
            name.extend(chars);
            definitions.insert(id, Definition::Shape(TypeShape::new(name)));
        }
        DefinitionStore {
            definitions,
            next_id: DefId::FIRST_USER,
        }
    }

    pub fn register(&mut self, definition: Definition) -> DefId {
        let id = DefId(self.next_id);
        self.next_id += 1;
        trace!(def_id = id.0, name = definition.name(), "register definition");
        self.definitions.insert(id, definition);
        id
    }

    pub fn register_shape(&mut self, shape: TypeShape) -> DefId {
        self.register(Definition::Shape(shape))
    }

    pub fn register_formal(&mut self, formal: TypeFormal) -> DefId {
        self.register(Definition::Formal(formal))
    }

    pub fn get(&self, id: DefId) -> Option<&Definition> {
        self.definitions.get(&id)
    }

    pub fn shape(&self, id: DefId) -> Option<&TypeShape> {
        match self.get(id)? {
            Definition::Shape(shape) => Some(shape),
            Definition::Formal(_) => None,
        }
    }

    pub fn formal(&self, id: DefId) -> Option<&TypeFormal> {
        match self.get(id)? {
            Definition::Formal(formal) => Some(formal),
            Definition::Shape(_) => None,
        }
    }

    /// Mutable access, for attaching members after registration.
    pub fn shape_mut(&mut self, id: DefId) -> Option<&mut TypeShape> {
        match self.definitions.get_mut(&id)? {
            Definition::Shape(shape) => Some(shape),
            Definition::Formal(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod def_tests;
