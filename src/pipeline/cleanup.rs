//! Removal of the baselines a run compiled next to the sources

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use crate::analysis::AnalyzedPair;
use crate::infra::{FileSystem, RealFileSystem};

/// What a cleanup pass did
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Files that were deleted
    pub removed: Vec<PathBuf>,
    /// Files that could not be deleted, with the reason
    pub failures: Vec<(PathBuf, io::Error)>,
}

/// Deletes compiled baselines of every origin in a pair set
///
/// Only origins that produced at least one pair are touched. A compiled
/// file that is already gone is not a failure.
pub struct Cleanup<FS: FileSystem = RealFileSystem> {
    compiled_extension: String,
    fs: FS,
}

impl Cleanup<RealFileSystem> {
    /// Cleanup over the real filesystem
    pub fn new(compiled_extension: impl Into<String>) -> Self {
        Self::with_fs(compiled_extension, RealFileSystem)
    }
}

impl<FS: FileSystem> Cleanup<FS> {
    /// Cleanup over a custom filesystem
    pub fn with_fs(compiled_extension: impl Into<String>, fs: FS) -> Self {
        Self {
            compiled_extension: compiled_extension.into(),
            fs,
        }
    }

    /// Compiled sibling of a source origin
    pub fn compiled_path_for(&self, origin: &Path) -> PathBuf {
        origin.with_extension(&self.compiled_extension)
    }

    /// Delete the compiled baselines of the paired origins
    pub fn run(&self, pairs: &[AnalyzedPair<'_>]) -> CleanupReport {
        let origins: BTreeSet<&Path> = pairs.iter().map(|p| p.origin_path()).collect();
        let mut report = CleanupReport::default();

        for origin in origins {
            let target = self.compiled_path_for(origin);
            match self.fs.remove_file(&target) {
                Ok(()) => {
                    log::debug!("removed {}", target.display());
                    report.removed.push(target);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    log::warn!("could not remove {}: {}", target.display(), e);
                    report.failures.push((target, e));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalyzedFile, CallTrace, TransformationKind};
    use std::fs;
    use tempfile::TempDir;

    fn record(origin: &Path, kind: TransformationKind) -> AnalyzedFile {
        AnalyzedFile {
            origin_path: origin.to_path_buf(),
            file_name: "A.class".to_string(),
            kind,
            num_methods: 1,
            num_fields: 0,
            file_size: 10,
            cpool_size: 3,
            call_depth: 0,
            call_flow: CallTrace::default(),
        }
    }

    #[test]
    fn test_removes_compiled_sibling_once_per_origin() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("A.java");
        fs::write(&origin, "class A {}").unwrap();
        fs::write(temp.path().join("A.class"), b"\xCA\xFE").unwrap();

        let baseline = record(&origin, TransformationKind::None);
        let jshrink = record(&origin, TransformationKind::JShrink);
        let proguard = record(&origin, TransformationKind::ProGuard);
        let pairs = vec![
            AnalyzedPair::new(&baseline, &jshrink),
            AnalyzedPair::new(&baseline, &proguard),
        ];

        let report = Cleanup::new("class").run(&pairs);

        assert_eq!(report.removed, vec![temp.path().join("A.class")]);
        assert!(report.failures.is_empty());
        assert!(origin.exists());
        assert!(!temp.path().join("A.class").exists());
    }

    #[test]
    fn test_missing_compiled_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("Gone.java");
        let baseline = record(&origin, TransformationKind::None);
        let variant = record(&origin, TransformationKind::JShrink);

        let report = Cleanup::new("class").run(&[AnalyzedPair::new(&baseline, &variant)]);

        assert!(report.removed.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_unpaired_origins_are_untouched() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Lonely.class"), b"x").unwrap();

        let report = Cleanup::new("class").run(&[]);

        assert!(report.removed.is_empty());
        assert!(temp.path().join("Lonely.class").exists());
    }

    #[test]
    fn test_removal_error_is_collected() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("Dir.java");
        // A directory where the compiled file should be cannot be removed as a file
        fs::create_dir(temp.path().join("Dir.class")).unwrap();
        let baseline = record(&origin, TransformationKind::None);
        let variant = record(&origin, TransformationKind::ProGuard);

        let report = Cleanup::new("class").run(&[AnalyzedPair::new(&baseline, &variant)]);

        assert!(report.removed.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, temp.path().join("Dir.class"));
    }

    #[test]
    fn test_compiled_path_for_replaces_extension() {
        let cleanup = Cleanup::new("class");
        assert_eq!(
            cleanup.compiled_path_for(Path::new("/w/pkg/B.java")),
            Path::new("/w/pkg/B.class")
        );
    }
}
