//! Recursive source collection

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{AdapterError, Collector};
use crate::artifact::SourceArtifact;
use crate::infra::{FileSystem, RealFileSystem};

/// Walks a directory tree and keeps files with a given extension
///
/// # Examples
///
/// ```no_run
/// use obfuscation_impact::adapters::{Collector, FolderCollector};
/// use std::path::Path;
///
/// let sources = FolderCollector::new().collect(Path::new("src"), "java")?;
/// for path in sources.keys() {
///     println!("{}", path.display());
/// }
/// # Ok::<(), obfuscation_impact::adapters::AdapterError>(())
/// ```
pub struct FolderCollector<FS: FileSystem = RealFileSystem> {
    fs: FS,
}

impl FolderCollector<RealFileSystem> {
    /// Collector over the real filesystem
    pub fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl Default for FolderCollector<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<FS: FileSystem> FolderCollector<FS> {
    /// Collector over a custom filesystem
    pub fn with_fs(fs: FS) -> Self {
        Self { fs }
    }

    fn walk(
        &self,
        dir: &Path,
        extension: &str,
        found: &mut BTreeMap<PathBuf, SourceArtifact>,
    ) -> Result<(), AdapterError> {
        for entry in self.fs.read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type()?.is_dir() {
                self.walk(&path, extension, found)?;
            } else if path.extension().and_then(|e| e.to_str()) == Some(extension) {
                found.insert(path.clone(), SourceArtifact::new(path));
            }
        }
        Ok(())
    }
}

impl<FS: FileSystem> Collector for FolderCollector<FS> {
    fn collect(
        &self,
        root: &Path,
        extension: &str,
    ) -> Result<BTreeMap<PathBuf, SourceArtifact>, AdapterError> {
        let root = std::path::absolute(root)?;
        let mut found = BTreeMap::new();

        if self.fs.is_file(&root) {
            if root.extension().and_then(|e| e.to_str()) == Some(extension) {
                found.insert(root.clone(), SourceArtifact::new(root));
            }
            return Ok(found);
        }

        self.walk(&root, extension, &mut found)?;
        log::debug!(
            "collected {} .{} file(s) under {}",
            found.len(),
            extension,
            root.display()
        );
        Ok(found)
    }
}
