//! Per-artifact pipeline: compile, rate, transform, rate again
//!
//! Every artifact moves through
//! `collected -> compiled -> baseline rated -> variants transformed -> variants rated`.
//! A failing stage ends that artifact (compile, baseline extraction) or only
//! that transformation kind (transform, variant extraction). No per-artifact
//! fault escapes [`Orchestrator::analyze`].

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use super::error::PipelineError;
use super::state::{RunState, Stage, StageFailure};
use crate::adapters::{Collector, Compiler, Extractor, Transformer};
use crate::analysis::{rate, TransformationKind};
use crate::artifact::{CompiledArtifact, SourceArtifact};

/// Result of a complete run
#[derive(Debug)]
pub enum RunOutcome {
    /// The collector found nothing to analyze
    NoArtifacts {
        /// Root that was searched
        root: PathBuf,
        /// Extension that was searched for
        extension: String,
    },
    /// At least one artifact was attempted
    Analyzed(RunState),
}

/// Drives the adapters over every collected artifact
pub struct Orchestrator<C: Compiler, X: Extractor> {
    compiler: C,
    extractor: X,
    transformers: Vec<Box<dyn Transformer>>,
    source_extension: String,
}

impl<C: Compiler, X: Extractor> Orchestrator<C, X> {
    /// Create an orchestrator without transformers
    pub fn new(compiler: C, extractor: X, source_extension: impl Into<String>) -> Self {
        Self {
            compiler,
            extractor,
            transformers: Vec::new(),
            source_extension: source_extension.into(),
        }
    }

    /// Register a transformer
    ///
    /// A transformer of the same kind is replaced. Transformers always run in
    /// [`TransformationKind::ATTEMPT_ORDER`], whatever the registration order.
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        let kind = transformer.kind();
        self.transformers.retain(|t| t.kind() != kind);
        self.transformers.push(Box::new(transformer));
        self.transformers.sort_by_key(|t| attempt_rank(t.kind()));
        self
    }

    /// Kinds that will be attempted, in order
    pub fn transformation_kinds(&self) -> Vec<TransformationKind> {
        self.transformers.iter().map(|t| t.kind()).collect()
    }

    /// Collect source artifacts under `root`
    pub fn collect(
        &self,
        collector: &impl Collector,
        root: &Path,
    ) -> Result<BTreeMap<PathBuf, SourceArtifact>, PipelineError> {
        collector
            .collect(root, &self.source_extension)
            .map_err(|source| PipelineError::Collection {
                root: root.to_path_buf(),
                source,
            })
    }

    /// Collect and analyze everything under `root`
    pub fn run(&self, collector: &impl Collector, root: &Path) -> Result<RunOutcome, PipelineError> {
        let sources = self.collect(collector, root)?;
        if sources.is_empty() {
            return Ok(RunOutcome::NoArtifacts {
                root: root.to_path_buf(),
                extension: self.source_extension.clone(),
            });
        }
        Ok(RunOutcome::Analyzed(self.analyze(&sources)))
    }

    /// Analyze already collected artifacts, in key order
    pub fn analyze(&self, sources: &BTreeMap<PathBuf, SourceArtifact>) -> RunState {
        let mut state = RunState::new();
        for (origin, source) in sources {
            self.analyze_one(origin, source, &mut state);
        }
        log::info!(
            "analyzed {} of {} artifact(s), {} failure(s)",
            state.baselines().len(),
            sources.len(),
            state.failures().len()
        );
        state
    }

    fn analyze_one(&self, origin: &Path, source: &SourceArtifact, state: &mut RunState) {
        log::info!("analyzing {}", origin.display());

        let baseline = match self.compiler.compile(source) {
            Ok(Some(compiled)) => compiled,
            Ok(None) => {
                return fail(state, origin, Stage::Compile, "compiler produced no output");
            }
            Err(e) => return fail(state, origin, Stage::Compile, e.chain_message()),
        };

        let kind = TransformationKind::None;
        match self.extractor.extract(&baseline) {
            Ok(extraction) => state.record_baseline(rate(&baseline, extraction, kind, origin)),
            Err(e) => return fail(state, origin, Stage::Extract(kind), e.chain_message()),
        }

        for transformer in &self.transformers {
            let kind = transformer.kind();
            let variant: CompiledArtifact = match transformer.transform(&baseline) {
                Ok(Some(variant)) => variant,
                Ok(None) => {
                    fail(state, origin, Stage::Transform(kind), "tool produced no output");
                    continue;
                }
                Err(e) => {
                    fail(state, origin, Stage::Transform(kind), e.chain_message());
                    continue;
                }
            };

            match self.extractor.extract(&variant) {
                Ok(extraction) => state.record_variant(rate(&variant, extraction, kind, origin)),
                Err(e) => fail(state, origin, Stage::Extract(kind), e.chain_message()),
            }
        }
    }
}

fn attempt_rank(kind: TransformationKind) -> usize {
    TransformationKind::ATTEMPT_ORDER
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(usize::MAX)
}

fn fail(state: &mut RunState, origin: &Path, stage: Stage, reason: impl Display) {
    let failure = StageFailure {
        origin: origin.to_path_buf(),
        stage,
        reason: reason.to_string(),
    };
    log::warn!("{}", failure);
    state.record_failure(failure);
}
