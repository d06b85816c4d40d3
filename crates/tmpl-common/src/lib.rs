//! Common types and utilities for the TmpL backend strategy layer.
//!
//! This crate provides the foundational types used across all tmpl crates:
//! - Source positions (`Position`, `Positioned`, `FileId`)
//! - File paths and module names (`FilePath`, `ModuleName`)
//! - Resolved names and their surface forms (`ResolvedName`, `OutName`, `NameMaker`)
//! - Output token classification (`OutputToken`, `OutputTokenType`)
//! - Comment escaping and limits

// Position - Source location tracking (byte spans)
pub mod position;
pub use position::{FileId, Position, Positioned};

// Paths and module names
pub mod path;
pub use path::{FilePath, LIBRARY_CONFIG_FILE_NAME, ModuleName};

// Names after resolution
pub mod names;
pub use names::{NameMaker, OutName, ResolvedName, Symbol};

// Output token classification
pub mod tokens;
pub use tokens::{OutputToken, OutputTokenType, is_identifier};

// Centralized limits and thresholds
pub mod limits;

// Comment escaping
pub mod comments;
pub use comments::comment_safe;

