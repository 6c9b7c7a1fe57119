//! Accumulated results of one run

use std::fmt;
use std::path::{Path, PathBuf};

use crate::analysis::{
    build_pairs, AnalyzedFile, AnalyzedPair, BaselineMap, TransformationKind, VariantMap,
};

/// Pipeline stage in which a per-artifact failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Producing the baseline from source
    Compile,
    /// Running a transformation tool on the baseline
    Transform(TransformationKind),
    /// Extracting metrics from the baseline or a variant
    Extract(TransformationKind),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile => f.write_str("compile"),
            Self::Transform(kind) => write!(f, "transform ({})", kind),
            Self::Extract(kind) => write!(f, "extract ({})", kind),
        }
    }
}

/// A recorded, non-fatal failure for one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    /// Origin the failure belongs to
    pub origin: PathBuf,
    /// Stage that failed
    pub stage: Stage,
    /// Human-readable cause
    pub reason: String,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed for {}: {}",
            self.stage,
            self.origin.display(),
            self.reason
        )
    }
}

/// Everything one run produced
///
/// Owned by the orchestrator while it runs, then handed to pairing,
/// reporting and cleanup. At most one baseline is kept per origin; variants
/// keep the order in which their transformations were attempted.
#[derive(Debug, Default)]
pub struct RunState {
    baselines: BaselineMap,
    variants: VariantMap,
    failures: Vec<StageFailure>,
}

impl RunState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the baseline of an origin, replacing any earlier one
    pub fn record_baseline(&mut self, file: AnalyzedFile) {
        debug_assert!(file.kind.is_baseline());
        self.baselines.insert(file.origin_path.clone(), file);
    }

    /// Append a variant to its origin's list
    pub fn record_variant(&mut self, file: AnalyzedFile) {
        debug_assert!(!file.kind.is_baseline());
        self.variants
            .entry(file.origin_path.clone())
            .or_default()
            .push(file);
    }

    /// Record a per-artifact failure
    pub fn record_failure(&mut self, failure: StageFailure) {
        self.failures.push(failure);
    }

    /// Baselines keyed by origin
    pub fn baselines(&self) -> &BaselineMap {
        &self.baselines
    }

    /// Variants keyed by origin
    pub fn variants(&self) -> &VariantMap {
        &self.variants
    }

    /// Failures in the order they happened
    pub fn failures(&self) -> &[StageFailure] {
        &self.failures
    }

    /// Baseline of one origin
    pub fn baseline(&self, origin: &Path) -> Option<&AnalyzedFile> {
        self.baselines.get(origin)
    }

    /// Variants of one origin, `None` when no transformation succeeded
    pub fn variants_for(&self, origin: &Path) -> Option<&[AnalyzedFile]> {
        self.variants.get(origin).map(Vec::as_slice)
    }

    /// Pair every baseline with its variants
    pub fn pairs(&self) -> Vec<AnalyzedPair<'_>> {
        build_pairs(&self.baselines, &self.variants)
    }

    /// True when no baseline was produced
    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }
}
