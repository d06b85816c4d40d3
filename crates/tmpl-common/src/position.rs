//! Source positions for IR nodes.
//!
//! Every node the strategy layer produces carries a [`Position`] so that the
//! emitter can build source maps and diagnostics. Positions are byte spans
//! within a file identified by a [`FileId`].

use serde::{Deserialize, Serialize};

/// Identifies a source file within one module set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl FileId {
    /// Sentinel for synthesized nodes that have no real source.
    pub const UNKNOWN: Self = Self(u32::MAX);
}

/// A byte span within a source file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: FileId,
    pub start: u32,
    pub end: u32,
}

impl Position {
    /// Position used for synthesized nodes.
    pub const UNKNOWN: Self = Self {
        file: FileId::UNKNOWN,
        start: 0,
        end: 0,
    };

    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "inverted span {start}..{end}");
        Position { file, start, end }
    }

    /// Zero-width position at the start of this one.
    pub fn left_edge(self) -> Self {
        Position {
            end: self.start,
            ..self
        }
    }

    /// Zero-width position at the end of this one.
    pub fn right_edge(self) -> Self {
        Position {
            start: self.end,
            ..self
        }
    }

    pub fn is_unknown(self) -> bool {
        self.file == FileId::UNKNOWN
    }

    /// The smallest position covering both `self` and `other`.
    ///
    /// Positions in different files do not combine; `self` wins.
    pub fn spanning(self, other: Self) -> Self {
        if self.is_unknown() {
            return other;
        }
        if other.is_unknown() || other.file != self.file {
            return self;
        }
        Position {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Span of a run of positions, or `fallback` when the run is empty.
    pub fn spanning_all(positions: impl IntoIterator<Item = Self>, fallback: Self) -> Self {
        let mut iter = positions.into_iter();
        match iter.next() {
            None => fallback,
            Some(first) => iter.fold(first, Position::spanning),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::UNKNOWN
    }
}

/// Anything with a source position.
pub trait Positioned {
    fn pos(&self) -> Position;
}

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod position_tests;
