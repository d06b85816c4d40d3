//! File paths and module names.
//!
//! A [`ModuleName`] identifies one source unit entering translation: the path
//! of its source file, how many leading segments of that path name the library
//! root, and whether the unit is the preface of its module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// File name of a library's configuration file. Such files configure the
/// library and never have a counterpart in translated output.
pub const LIBRARY_CONFIG_FILE_NAME: &str = "config.temper.md";

/// A slash-separated path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilePath {
    pub segments: Vec<Arc<str>>,
    pub is_dir: bool,
}

impl FilePath {
    pub fn new(segments: impl IntoIterator<Item = impl Into<Arc<str>>>, is_dir: bool) -> Self {
        FilePath {
            segments: segments.into_iter().map(Into::into).collect(),
            is_dir,
        }
    }

    /// Parse a `/`-separated path. A trailing `/` marks a directory.
    pub fn parse(text: &str) -> Self {
        let is_dir = text.ends_with('/');
        FilePath::new(text.split('/').filter(|s| !s.is_empty()), is_dir)
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(|s| &**s)
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i != 0 {
                f.write_str("/")?;
            }
            f.write_str(segment)?;
        }
        if self.is_dir {
            f.write_str("/")?;
        }
        Ok(())
    }
}

/// Identifies a module: its source file plus whether it is the preface.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleName {
    pub source_file: FilePath,
    /// Number of leading segments of `source_file` that name the library root.
    pub library_root_segment_count: usize,
    pub is_preface: bool,
}

impl ModuleName {
    pub fn new(source_file: FilePath, library_root_segment_count: usize, is_preface: bool) -> Self {
        assert!(
            library_root_segment_count <= source_file.segments.len(),
            "{library_root_segment_count} !in {source_file}"
        );
        ModuleName {
            source_file,
            library_root_segment_count,
            is_preface,
        }
    }

    pub fn library_root(&self) -> FilePath {
        FilePath::new(
            self.source_file.segments[..self.library_root_segment_count]
                .iter()
                .cloned(),
            true,
        )
    }

    /// Path relative to the library root.
    pub fn relative_path(&self) -> FilePath {
        FilePath::new(
            self.source_file.segments[self.library_root_segment_count..]
                .iter()
                .cloned(),
            self.source_file.is_dir,
        )
    }

    pub fn is_library_config_file(&self) -> bool {
        !self.source_file.is_dir && self.source_file.last_segment() == Some(LIBRARY_CONFIG_FILE_NAME)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The root prints with its directory `/`, so the separator makes `//`
        // at the root boundary: `work/mylib//main.temper`.
        write!(f, "{}/{}", self.library_root(), self.relative_path())?;
        if self.is_preface {
            f.write_str(":preface")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/path_tests.rs"]
mod path_tests;
