//! Seams to the external tools
//!
//! Every interaction with the outside world during a run goes through one
//! of four traits:
//! - [`Collector`]: find the source artifacts under a root
//! - [`Compiler`]: turn a source artifact into a baseline
//! - [`Transformer`]: turn a baseline into a variant
//! - [`Extractor`]: read structural metrics and the call trace
//!
//! The command-line implementations shell out through
//! [`CommandExecutor`](crate::infra::CommandExecutor); tests plug in fakes.
//!
//! A returned `Ok(None)` from a compiler or transformer means the tool ran
//! cleanly but produced nothing. The orchestrator records that the same way
//! as an `Err`.

pub mod collector;
pub mod compiler;
pub mod error;
pub mod extractor;
pub mod transformer;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::analysis::{Extraction, TransformationKind};
use crate::artifact::{CompiledArtifact, SourceArtifact};

pub use collector::FolderCollector;
pub use compiler::CommandCompiler;
pub use error::AdapterError;
pub use extractor::{CommandExtractor, ExtractorReport};
pub use transformer::CommandTransformer;

/// Finds source artifacts
pub trait Collector {
    /// Collect every file under `root` whose extension is `extension`
    ///
    /// Keys are absolute paths; an empty map is not an error.
    fn collect(
        &self,
        root: &Path,
        extension: &str,
    ) -> Result<BTreeMap<PathBuf, SourceArtifact>, AdapterError>;
}

/// Produces baselines from source artifacts
pub trait Compiler {
    /// Compile one source artifact
    fn compile(&self, source: &SourceArtifact) -> Result<Option<CompiledArtifact>, AdapterError>;
}

/// Produces variants from baselines
pub trait Transformer {
    /// Kind of variant this transformer produces
    fn kind(&self) -> TransformationKind;

    /// Transform one baseline
    fn transform(
        &self,
        baseline: &CompiledArtifact,
    ) -> Result<Option<CompiledArtifact>, AdapterError>;
}

/// Reads metrics from compiled artifacts
pub trait Extractor {
    /// Extract structural metrics and the call trace of one artifact
    fn extract(&self, compiled: &CompiledArtifact) -> Result<Extraction, AdapterError>;
}
