//! Rating engine: extractor results to [`AnalyzedFile`] records

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::call_flow::CallTrace;
use super::types::{AnalyzedFile, TransformationKind};
use crate::artifact::{display_name, CompiledArtifact};

/// Raw structural counts reported by the analyzer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralCounts {
    /// Declared methods
    pub methods: u32,
    /// Declared fields
    pub fields: u32,
    /// Constant-pool entries
    pub constant_pool: u32,
}

/// Everything extracted from one compiled artifact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Structural counts, `None` when the artifact has no analyzable structure
    pub structure: Option<StructuralCounts>,
    /// Size of the compiled artifact in bytes
    pub byte_size: u64,
    /// Depth of the deepest observed call chain
    pub call_depth: u32,
    /// Observed call flow
    pub call_trace: CallTrace,
}

/// Rate one compiled artifact
///
/// `origin` is the source artifact the compiled file descends from; it is
/// recorded unchanged so variants correlate with their baseline. When the
/// extraction carries no structure the record gets zeroed metrics instead of
/// an error. Whether that is worth reporting is up to the caller.
///
/// # Examples
///
/// ```
/// use obfuscation_impact::analysis::{rate, Extraction, TransformationKind};
/// use obfuscation_impact::artifact::CompiledArtifact;
/// use std::path::Path;
///
/// let compiled = CompiledArtifact::new("/work/Util.class");
/// let record = rate(
///     &compiled,
///     Extraction::default(),
///     TransformationKind::None,
///     Path::new("/work/Util.java"),
/// );
///
/// assert_eq!(record.num_methods, 0);
/// assert!(record.call_flow.is_empty());
/// ```
pub fn rate(
    compiled: &CompiledArtifact,
    extraction: Extraction,
    kind: TransformationKind,
    origin: &Path,
) -> AnalyzedFile {
    let file_name = match compiled.path.file_name() {
        Some(_) => compiled.file_name(),
        None => display_name(origin),
    };

    let (counts, file_size, call_depth) = match extraction.structure {
        Some(counts) => (counts, extraction.byte_size, extraction.call_depth),
        None => (StructuralCounts::default(), 0, 0),
    };

    AnalyzedFile {
        origin_path: origin.to_path_buf(),
        file_name,
        kind,
        num_methods: counts.methods,
        num_fields: counts.fields,
        file_size,
        cpool_size: counts.constant_pool,
        call_depth,
        call_flow: extraction.call_trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extraction() -> Extraction {
        Extraction {
            structure: Some(StructuralCounts {
                methods: 6,
                fields: 2,
                constant_pool: 48,
            }),
            byte_size: 1337,
            call_depth: 4,
            call_trace: CallTrace::parse("[main, run, log]"),
        }
    }

    #[test]
    fn test_rate_copies_metrics() {
        let compiled = CompiledArtifact::new("/work/App.class");
        let record = rate(
            &compiled,
            extraction(),
            TransformationKind::None,
            Path::new("/work/App.java"),
        );

        assert_eq!(record.file_name, "App.class");
        assert_eq!(record.kind, TransformationKind::None);
        assert_eq!(record.num_methods, 6);
        assert_eq!(record.num_fields, 2);
        assert_eq!(record.cpool_size, 48);
        assert_eq!(record.file_size, 1337);
        assert_eq!(record.call_depth, 4);
        assert_eq!(record.call_flow.sites(), ["main", "run", "log"]);
    }

    #[test]
    fn test_rate_keeps_origin_for_variants() {
        let compiled = CompiledArtifact::new("/tmp/out/proguard/App.class");
        let record = rate(
            &compiled,
            extraction(),
            TransformationKind::ProGuard,
            Path::new("/work/App.java"),
        );

        assert_eq!(record.origin_path, Path::new("/work/App.java"));
        assert_eq!(record.kind, TransformationKind::ProGuard);
    }

    #[test]
    fn test_rate_without_structure_zeroes_metrics() {
        let compiled = CompiledArtifact::new("/work/Empty.class");
        let record = rate(
            &compiled,
            Extraction {
                structure: None,
                byte_size: 512,
                call_depth: 9,
                call_trace: CallTrace::default(),
            },
            TransformationKind::JShrink,
            Path::new("/work/Empty.java"),
        );

        assert_eq!(record.num_methods, 0);
        assert_eq!(record.num_fields, 0);
        assert_eq!(record.cpool_size, 0);
        assert_eq!(record.file_size, 0);
        assert_eq!(record.call_depth, 0);
        assert!(!record.call_flow.is_traceable());
    }

    #[test]
    fn test_rate_falls_back_to_origin_name() {
        let compiled = CompiledArtifact::new("/");
        let record = rate(
            &compiled,
            extraction(),
            TransformationKind::None,
            Path::new("/work/App.java"),
        );

        assert_eq!(record.file_name, "App.java");
    }
}
