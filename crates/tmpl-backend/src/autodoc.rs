//! Help text extracted from declaration metadata.
//!
//! Documentation is attached under the reserved `docString` key as a
//! two-element list `[short, long]`. Anything else under that key is treated
//! as no documentation.

use std::fmt::Write as _;
use std::sync::Arc;
use tmpl_common::{Position, ResolvedName};
use tmpl_ir::{DeclarationMetadata, FunctionDeclaration, MetadataKeys, MetadataValue, Type, Value};

/// Indentation for nested parameter descriptions.
const PARAM_INDENT: &str = "  ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Autodoc {
    pub pos: Position,
    /// One-line summary.
    pub short: Arc<str>,
    /// Full description.
    pub long: Arc<str>,
}

/// Look up documentation in `metadata`.
pub fn autodoc_for(
    pos: Position,
    metadata: &DeclarationMetadata,
    keys: &MetadataKeys,
) -> Option<Autodoc> {
    metadata
        .iter()
        .filter(|(key, _)| key == &keys.doc_string)
        .find_map(|(_, value)| match value {
            MetadataValue::Value(value) => unpack_doc_pair(pos, value),
            MetadataValue::Name(_) => None,
        })
}

fn unpack_doc_pair(pos: Position, value: &Value) -> Option<Autodoc> {
    let [short, long] = value.as_list()? else {
        return None;
    };
    Some(Autodoc {
        pos,
        short: short.as_str()?.into(),
        long: long.as_str()?.into(),
    })
}

/// Documentation for one declared parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamAutodoc {
    pub name: ResolvedName,
    pub ty: Type,
    pub autodoc: Option<Autodoc>,
}

/// Documentation for a function and each of its parameters, in declaration
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FnAutodoc {
    pub autodoc: Option<Autodoc>,
    pub params: Vec<ParamAutodoc>,
}

impl FnAutodoc {
    pub fn for_function(function: &FunctionDeclaration, keys: &MetadataKeys) -> Self {
        FnAutodoc {
            autodoc: autodoc_for(function.pos, &function.metadata, keys),
            params: function
                .params
                .iter()
                .map(|param| ParamAutodoc {
                    name: param.name.clone(),
                    ty: param.ty.clone(),
                    autodoc: autodoc_for(param.pos, &param.metadata, keys),
                })
                .collect(),
        }
    }

    /// True when neither the function nor any parameter is documented.
    pub fn is_empty(&self) -> bool {
        self.autodoc.is_none() && self.params.iter().all(|p| p.autodoc.is_none())
    }

    pub fn short_help(&self) -> Option<&str> {
        self.autodoc.as_ref().map(|doc| &*doc.short)
    }

    /// The function's full description followed, for each parameter, by a
    /// blank line, a `name: Type` header, and the parameter's description
    /// indented beneath it.
    pub fn render_long_help(&self) -> String {
        let mut out = String::new();
        if let Some(doc) = &self.autodoc {
            out.push_str(&doc.long);
        }
        for param in &self.params {
            let _ = write!(out, "\n\n{}: {}", param.name.base_text(), param.ty);
            if let Some(doc) = &param.autodoc {
                for line in doc.long.lines() {
                    out.push('\n');
                    if !line.is_empty() {
                        out.push_str(PARAM_INDENT);
                        out.push_str(line);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/autodoc_tests.rs"]
mod autodoc_tests;
