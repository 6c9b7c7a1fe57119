//! Structural and call-trace extraction through an external analyzer

use serde::Deserialize;

use super::{AdapterError, Extractor};
use crate::analysis::{CallTrace, Extraction, StructuralCounts};
use crate::artifact::CompiledArtifact;
use crate::config::ToolCommand;
use crate::infra::{CommandExecutor, FileSystem, RealCommandExecutor, RealFileSystem};

/// JSON document an analyzer prints on stdout
///
/// ```json
/// {"structure": {"methods": 4, "fields": 2, "constant_pool": 40},
///  "call_depth": 3, "call_flow": "[main, greet, print]"}
/// ```
///
/// `structure` is `null` for artifacts without analyzable structure; the
/// other keys default to zero and an empty trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractorReport {
    /// Structural counts
    #[serde(default)]
    pub structure: Option<StructuralCounts>,
    /// Depth of the deepest call chain
    #[serde(default)]
    pub call_depth: u32,
    /// Bracketed call flow, e.g. `[a, b]`
    #[serde(default)]
    pub call_flow: String,
}

impl ExtractorReport {
    /// Parse an analyzer's stdout
    pub fn parse(program: &str, stdout: &str) -> Result<Self, AdapterError> {
        serde_json::from_str(stdout).map_err(|source| AdapterError::MalformedOutput {
            program: program.to_string(),
            source,
        })
    }

    /// Combine with the artifact's size into an [`Extraction`]
    pub fn into_extraction(self, byte_size: u64) -> Extraction {
        Extraction {
            structure: self.structure,
            byte_size,
            call_depth: self.call_depth,
            call_trace: CallTrace::parse(&self.call_flow),
        }
    }
}

/// Runs a configured analyzer and reads its JSON report
pub struct CommandExtractor<FS: FileSystem = RealFileSystem, CE: CommandExecutor = RealCommandExecutor>
{
    command: ToolCommand,
    fs: FS,
    executor: CE,
}

impl CommandExtractor<RealFileSystem, RealCommandExecutor> {
    /// Extractor using the real filesystem and processes
    pub fn new(command: ToolCommand) -> Self {
        Self::with_deps(command, RealFileSystem, RealCommandExecutor)
    }
}

impl<FS: FileSystem, CE: CommandExecutor> CommandExtractor<FS, CE> {
    /// Extractor with injected dependencies
    pub fn with_deps(command: ToolCommand, fs: FS, executor: CE) -> Self {
        Self {
            command,
            fs,
            executor,
        }
    }
}

impl<FS: FileSystem, CE: CommandExecutor> Extractor for CommandExtractor<FS, CE> {
    fn extract(&self, compiled: &CompiledArtifact) -> Result<Extraction, AdapterError> {
        let byte_size = self.fs.metadata(&compiled.path)?.len();
        let args = self.command.expand_args(&compiled.path, None);

        log::debug!("extracting metrics from {}", compiled.path.display());
        let output = self
            .executor
            .execute(|cmd| cmd.args(&args), &self.command.program)
            .map_err(|e| AdapterError::spawn(&self.command.program, e))?;

        if !output.status.success() {
            return Err(AdapterError::command_failed(&self.command.program, &output));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = ExtractorReport::parse(&self.command.program, &stdout)?;
        Ok(report.into_extraction(byte_size))
    }
}
