//! Resolved names, symbols, and output names.

use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;

/// A symbol as used for metadata keys and member names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub Arc<str>);

impl Symbol {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Symbol(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\{}", self.0)
    }
}

/// A name after name resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedName {
    /// A name that appeared in source, disambiguated by `uid`.
    Source { base: Arc<str>, uid: u32 },
    /// A name exported from its module. Stable across compilations.
    Exported { base: Arc<str> },
    /// A name provided by the language.
    Builtin(Arc<str>),
    /// A compiler-internal temporary.
    Temporary { hint: Arc<str>, uid: u32 },
}

impl ResolvedName {
    pub fn source(base: impl Into<Arc<str>>, uid: u32) -> Self {
        ResolvedName::Source {
            base: base.into(),
            uid,
        }
    }

    pub fn exported(base: impl Into<Arc<str>>) -> Self {
        ResolvedName::Exported { base: base.into() }
    }

    pub fn builtin(text: impl Into<Arc<str>>) -> Self {
        ResolvedName::Builtin(text.into())
    }

    /// The text a human would recognize, ignoring disambiguation.
    pub fn base_text(&self) -> &str {
        match self {
            ResolvedName::Source { base, .. } | ResolvedName::Exported { base } => base,
            ResolvedName::Builtin(text) => text,
            ResolvedName::Temporary { hint, .. } => hint,
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, ResolvedName::Temporary { .. })
    }
}

impl fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedName::Source { base, uid } => write!(f, "{base}__{uid}"),
            ResolvedName::Exported { base } => write!(f, "{base}"),
            ResolvedName::Builtin(text) => write!(f, "{text}"),
            ResolvedName::Temporary { hint, uid } => write!(f, "{hint}#{uid}"),
        }
    }
}

/// A surface identifier derived from a resolved name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutName {
    pub text: Arc<str>,
    pub source_name: Option<ResolvedName>,
}

impl OutName {
    pub fn new(text: impl Into<Arc<str>>, source_name: Option<ResolvedName>) -> Self {
        OutName {
            text: text.into(),
            source_name,
        }
    }

    /// Derive the output name for `name`.
    ///
    /// Temporaries have no stable external representation so yield `None`;
    /// the emitter must invent a local spelling for them.
    pub fn for_name(name: &ResolvedName) -> Option<Self> {
        match name {
            ResolvedName::Temporary { .. } => None,
            ResolvedName::Source { base, .. }
            | ResolvedName::Exported { base }
            | ResolvedName::Builtin(base) => Some(OutName::new(base.clone(), Some(name.clone()))),
        }
    }
}

impl fmt::Display for OutName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Mints temporary names that do not collide with names already in use.
#[derive(Debug, Default)]
pub struct NameMaker {
    next_uid: u32,
    used: FxHashSet<ResolvedName>,
}

impl NameMaker {
    pub fn new() -> Self {
        NameMaker::default()
    }

    /// Record a name minted elsewhere so it is never handed out again.
    pub fn reserve(&mut self, name: ResolvedName) {
        if let ResolvedName::Temporary { uid, .. } | ResolvedName::Source { uid, .. } = &name {
            self.next_uid = self.next_uid.max(uid.saturating_add(1));
        }
        self.used.insert(name);
    }

    pub fn is_used(&self, name: &ResolvedName) -> bool {
        self.used.contains(name)
    }

    pub fn unused_temporary_name(&mut self, hint: &str) -> ResolvedName {
        loop {
            let candidate = ResolvedName::Temporary {
                hint: Arc::from(hint),
                uid: self.next_uid,
            };
            self.next_uid += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// A source-like name based on `base`, used for names the emitter should
    /// render recognizably (pooled constants, support code bindings).
    pub fn unused_source_name(&mut self, base: &str) -> ResolvedName {
        loop {
            let candidate = ResolvedName::source(base, self.next_uid);
            self.next_uid += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/names_tests.rs"]
mod names_tests;
