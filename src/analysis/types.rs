//! Analysis records: per-artifact snapshots and baseline/variant comparisons

use std::fmt;
use std::path::{Path, PathBuf};

use super::call_flow::CallTrace;

/// Which transformation, if any, produced a compiled artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransformationKind {
    /// Baseline compiled straight from source
    None,
    /// JShrink bytecode debloater
    JShrink,
    /// ProGuard shrinker/obfuscator
    ProGuard,
}

impl TransformationKind {
    /// Transformation kinds in the order they are attempted for each artifact
    pub const ATTEMPT_ORDER: [TransformationKind; 2] = [Self::JShrink, Self::ProGuard];

    /// Label used in report rows
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Original",
            Self::JShrink => "JShrink",
            Self::ProGuard => "ProGuard",
        }
    }

    /// Stable lowercase identifier, used for config keys and output directories
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::JShrink => "jshrink",
            Self::ProGuard => "proguard",
        }
    }

    /// True for the untransformed baseline
    pub fn is_baseline(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for TransformationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural snapshot of one compiled artifact under one transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedFile {
    /// Absolute path of the original source artifact, shared by the
    /// baseline and every variant; the correlation key
    pub origin_path: PathBuf,
    /// Display name of the artifact
    pub file_name: String,
    /// Transformation that produced the artifact
    pub kind: TransformationKind,
    /// Number of declared methods
    pub num_methods: u32,
    /// Number of declared fields
    pub num_fields: u32,
    /// Size of the compiled artifact in bytes
    pub file_size: u64,
    /// Number of constant-pool entries
    pub cpool_size: u32,
    /// Depth of the deepest observed call chain
    pub call_depth: u32,
    /// Observed call flow; empty for artifacts without an entry point
    pub call_flow: CallTrace,
}

/// One comparison between a baseline and a variant of the same origin
///
/// Deltas are computed once in [`AnalyzedPair::new`] and cannot change
/// afterwards. `cpool_size` is deliberately *not* a delta: it carries the
/// variant's absolute constant-pool size, unlike the other three values.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzedPair<'a> {
    baseline: &'a AnalyzedFile,
    variant: &'a AnalyzedFile,
    methods_changed: i64,
    fields_changed: i64,
    size_change: i64,
    cpool_size: u32,
}

impl<'a> AnalyzedPair<'a> {
    /// Pair a baseline with one of its variants and compute the deltas
    pub fn new(baseline: &'a AnalyzedFile, variant: &'a AnalyzedFile) -> Self {
        debug_assert_eq!(baseline.origin_path, variant.origin_path);
        debug_assert!(baseline.kind.is_baseline());

        Self {
            baseline,
            variant,
            methods_changed: i64::from(variant.num_methods) - i64::from(baseline.num_methods),
            fields_changed: i64::from(variant.num_fields) - i64::from(baseline.num_fields),
            size_change: variant.file_size as i64 - baseline.file_size as i64,
            cpool_size: variant.cpool_size,
        }
    }

    /// Baseline side of the comparison
    pub fn baseline(&self) -> &'a AnalyzedFile {
        self.baseline
    }

    /// Transformed side of the comparison
    pub fn variant(&self) -> &'a AnalyzedFile {
        self.variant
    }

    /// Origin shared by both sides
    pub fn origin_path(&self) -> &'a Path {
        &self.baseline.origin_path
    }

    /// Display name of the variant
    pub fn file_name(&self) -> &'a str {
        &self.variant.file_name
    }

    /// Transformation that produced the variant
    pub fn kind(&self) -> TransformationKind {
        self.variant.kind
    }

    /// `variant.num_methods - baseline.num_methods`
    pub fn methods_changed(&self) -> i64 {
        self.methods_changed
    }

    /// `variant.num_fields - baseline.num_fields`
    pub fn fields_changed(&self) -> i64 {
        self.fields_changed
    }

    /// `variant.file_size - baseline.file_size`
    pub fn size_change(&self) -> i64 {
        self.size_change
    }

    /// The variant's absolute constant-pool size
    pub fn cpool_size(&self) -> u32 {
        self.cpool_size
    }
}
