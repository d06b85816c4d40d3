//! Declaration metadata and the reserved keys the backend understands.

use crate::values::Value;
use tmpl_common::{ResolvedName, Symbol};

/// A metadata entry's value: either a name or a constant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetadataValue {
    Name(ResolvedName),
    Value(Value),
}

impl MetadataValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            MetadataValue::Value(v) => Some(v),
            MetadataValue::Name(_) => None,
        }
    }
}

/// Metadata attached to a declaration, in declaration order.
///
/// A key may appear more than once; lookups return the first entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DeclarationMetadata {
    entries: Vec<(Symbol, MetadataValue)>,
}

impl DeclarationMetadata {
    pub fn new() -> Self {
        DeclarationMetadata::default()
    }

    pub fn push(&mut self, key: Symbol, value: MetadataValue) {
        self.entries.push((key, value));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, key: &Symbol, value: MetadataValue) -> Self {
        self.push(key.clone(), value);
        self
    }

    pub fn with_value(self, key: &Symbol, value: Value) -> Self {
        self.with(key, MetadataValue::Value(value))
    }

    pub fn get(&self, key: &Symbol) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &Symbol) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Symbol, MetadataValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Symbol, MetadataValue)> for DeclarationMetadata {
    fn from_iter<I: IntoIterator<Item = (Symbol, MetadataValue)>>(iter: I) -> Self {
        DeclarationMetadata {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The reserved metadata keys, threaded explicitly to every decision that
/// consults metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataKeys {
    /// `(short, long)` help text.
    pub doc_string: Symbol,
    /// Marks a declaration that introduces a type.
    pub type_decl: Symbol,
    pub type_placeholder: Symbol,
    /// Marks a declaration binding a type formal.
    pub type_formal: Symbol,
    /// Marks a member or declaration as a function.
    pub fn_: Symbol,
    /// Names a target-side type or function that a declaration maps onto.
    pub connected: Symbol,
    /// Marks a type shape as a functional interface.
    pub functional_interface: Symbol,
}

impl Default for MetadataKeys {
    fn default() -> Self {
        MetadataKeys {
            doc_string: Symbol::new("docString"),
            type_decl: Symbol::new("typeDecl"),
            type_placeholder: Symbol::new("typePlaceholder"),
            type_formal: Symbol::new("typeFormal"),
            fn_: Symbol::new("fn"),
            connected: Symbol::new("connected"),
            functional_interface: Symbol::new("functionalInterface"),
        }
    }
}

impl MetadataKeys {
    /// Keys whose presence marks a declaration of type `Type` as a real
    /// construct rather than an inference artifact.
    pub fn type_markers(&self) -> [&Symbol; 3] {
        [&self.type_decl, &self.type_placeholder, &self.type_formal]
    }
}
