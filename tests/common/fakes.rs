//! In-memory adapters
//!
//! Compiled and transformed artifacts are only paths; nothing is written.
//! The extractor answers from a table keyed by artifact path.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use obfuscation_impact::adapters::{AdapterError, Compiler, Extractor, Transformer};
use obfuscation_impact::analysis::{CallTrace, Extraction, StructuralCounts, TransformationKind};
use obfuscation_impact::artifact::{CompiledArtifact, SourceArtifact};

/// Build an extraction result
pub fn extraction(methods: u32, fields: u32, size: u64, cpool: u32, flow: &str) -> Extraction {
    Extraction {
        structure: Some(StructuralCounts {
            methods,
            fields,
            constant_pool: cpool,
        }),
        byte_size: size,
        call_depth: CallTrace::parse(flow).len() as u32,
        call_trace: CallTrace::parse(flow),
    }
}

fn failed(program: &str) -> AdapterError {
    AdapterError::CommandFailed {
        program: program.to_string(),
        code: 1,
        summary: "scripted failure".to_string(),
    }
}

/// Compiles `X.java` to a sibling `X.class` unless the file name is listed as failing
#[derive(Default)]
pub struct FakeCompiler {
    failing: Vec<String>,
}

impl FakeCompiler {
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing.push(file_name.to_string());
        self
    }
}

impl Compiler for FakeCompiler {
    fn compile(&self, source: &SourceArtifact) -> Result<Option<CompiledArtifact>, AdapterError> {
        if self.failing.contains(&source.file_name()) {
            return Err(failed("javac"));
        }
        Ok(Some(CompiledArtifact::new(
            source.path.with_extension("class"),
        )))
    }
}

/// Writes variants to `<baseline dir>/<kind>/<name>` unless the baseline is listed as failing
pub struct FakeTransformer {
    kind: TransformationKind,
    failing: Vec<String>,
    fail_all: bool,
}

impl FakeTransformer {
    pub fn new(kind: TransformationKind) -> Self {
        Self {
            kind,
            failing: Vec::new(),
            fail_all: false,
        }
    }

    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing.push(file_name.to_string());
        self
    }

    pub fn always_failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Path a variant of `baseline` gets
    pub fn variant_path(kind: TransformationKind, baseline: &Path) -> PathBuf {
        let dir = baseline.parent().unwrap_or(Path::new("/"));
        dir.join(kind.as_str())
            .join(baseline.file_name().unwrap_or_default())
    }
}

impl Transformer for FakeTransformer {
    fn kind(&self) -> TransformationKind {
        self.kind
    }

    fn transform(
        &self,
        baseline: &CompiledArtifact,
    ) -> Result<Option<CompiledArtifact>, AdapterError> {
        if self.fail_all || self.failing.contains(&baseline.file_name()) {
            return Err(failed(self.kind.as_str()));
        }
        Ok(Some(CompiledArtifact::new(Self::variant_path(
            self.kind,
            &baseline.path,
        ))))
    }
}

/// Answers from a table; unknown paths are I/O errors
#[derive(Default)]
pub struct FakeExtractor {
    results: HashMap<PathBuf, Extraction>,
}

impl FakeExtractor {
    pub fn with(mut self, path: impl Into<PathBuf>, extraction: Extraction) -> Self {
        self.results.insert(path.into(), extraction);
        self
    }
}

impl Extractor for FakeExtractor {
    fn extract(&self, compiled: &CompiledArtifact) -> Result<Extraction, AdapterError> {
        self.results.get(&compiled.path).cloned().ok_or_else(|| {
            AdapterError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no metrics for {}", compiled.path.display()),
            ))
        })
    }
}
