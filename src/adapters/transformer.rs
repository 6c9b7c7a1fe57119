//! Variant production through an external obfuscator

use std::io;
use std::path::{Path, PathBuf};

use super::{AdapterError, Transformer};
use crate::analysis::TransformationKind;
use crate::artifact::CompiledArtifact;
use crate::config::ToolCommand;
use crate::infra::{CommandExecutor, FileSystem, RealCommandExecutor, RealFileSystem};

/// Runs one configured obfuscator on a baseline
///
/// Variants are written to `<output_dir>/<kind>/<baseline file name>`, so
/// the kinds never overwrite each other or the baseline.
pub struct CommandTransformer<
    FS: FileSystem = RealFileSystem,
    CE: CommandExecutor = RealCommandExecutor,
> {
    kind: TransformationKind,
    command: ToolCommand,
    output_dir: PathBuf,
    fs: FS,
    executor: CE,
}

impl CommandTransformer<RealFileSystem, RealCommandExecutor> {
    /// Transformer using the real filesystem and processes
    pub fn new(kind: TransformationKind, command: ToolCommand, output_dir: impl Into<PathBuf>) -> Self {
        Self::with_deps(
            kind,
            command,
            output_dir,
            RealFileSystem,
            RealCommandExecutor,
        )
    }
}

impl<FS: FileSystem, CE: CommandExecutor> CommandTransformer<FS, CE> {
    /// Transformer with injected dependencies
    pub fn with_deps(
        kind: TransformationKind,
        command: ToolCommand,
        output_dir: impl Into<PathBuf>,
        fs: FS,
        executor: CE,
    ) -> Self {
        Self {
            kind,
            command,
            output_dir: output_dir.into(),
            fs,
            executor,
        }
    }

    /// Where the variant of `baseline` is written
    pub fn output_path(&self, baseline: &Path) -> PathBuf {
        let name = baseline.file_name().unwrap_or(baseline.as_os_str());
        self.output_dir.join(self.kind.as_str()).join(name)
    }

    fn remove_stale(&self, path: &Path) -> io::Result<()> {
        match self.fs.remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl<FS: FileSystem, CE: CommandExecutor> Transformer for CommandTransformer<FS, CE> {
    fn kind(&self) -> TransformationKind {
        self.kind
    }

    fn transform(
        &self,
        baseline: &CompiledArtifact,
    ) -> Result<Option<CompiledArtifact>, AdapterError> {
        let output = self.output_path(&baseline.path);
        if let Some(parent) = output.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.remove_stale(&output)?;

        let args = self.command.expand_args(&baseline.path, Some(&output));
        log::debug!(
            "{} transforming {} into {}",
            self.kind,
            baseline.path.display(),
            output.display()
        );
        let result = self
            .executor
            .execute(|cmd| cmd.args(&args), &self.command.program)
            .map_err(|e| AdapterError::spawn(&self.command.program, e))?;

        if !result.status.success() {
            return Err(AdapterError::command_failed(&self.command.program, &result));
        }

        if !self.fs.is_file(&output) {
            return Ok(None);
        }

        Ok(Some(CompiledArtifact::new(output)))
    }
}
