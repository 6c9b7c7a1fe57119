//! Handles to the files that move through the pipeline

use std::path::{Path, PathBuf};

/// A source artifact found by the collector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    /// Absolute path to the source file
    pub path: PathBuf,
}

impl SourceArtifact {
    /// Wrap a source path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Display name of the source file
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

/// A compiled artifact, either a baseline or a transformed variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    /// Path to the compiled file
    pub path: PathBuf,
}

impl CompiledArtifact {
    /// Wrap a compiled artifact path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Display name of the compiled file
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Final path component, or the whole path when it has none
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
