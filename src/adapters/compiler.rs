//! Baseline compilation through an external compiler

use std::io;

use super::{AdapterError, Compiler};
use crate::artifact::{CompiledArtifact, SourceArtifact};
use crate::config::ToolCommand;
use crate::infra::{CommandExecutor, FileSystem, RealCommandExecutor, RealFileSystem};

/// Runs a configured compiler on one source artifact at a time
///
/// The compiled file is expected beside the source, with the source
/// extension replaced by the compiled extension.
pub struct CommandCompiler<FS: FileSystem = RealFileSystem, CE: CommandExecutor = RealCommandExecutor>
{
    command: ToolCommand,
    compiled_extension: String,
    fs: FS,
    executor: CE,
}

impl CommandCompiler<RealFileSystem, RealCommandExecutor> {
    /// Compiler using the real filesystem and processes
    pub fn new(command: ToolCommand, compiled_extension: impl Into<String>) -> Self {
        Self::with_deps(
            command,
            compiled_extension,
            RealFileSystem,
            RealCommandExecutor,
        )
    }
}

impl<FS: FileSystem, CE: CommandExecutor> CommandCompiler<FS, CE> {
    /// Compiler with injected dependencies
    pub fn with_deps(
        command: ToolCommand,
        compiled_extension: impl Into<String>,
        fs: FS,
        executor: CE,
    ) -> Self {
        Self {
            command,
            compiled_extension: compiled_extension.into(),
            fs,
            executor,
        }
    }
}

impl<FS: FileSystem, CE: CommandExecutor> Compiler for CommandCompiler<FS, CE> {
    fn compile(&self, source: &SourceArtifact) -> Result<Option<CompiledArtifact>, AdapterError> {
        let expected = source.path.with_extension(&self.compiled_extension);
        match self.fs.remove_file(&expected) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        let args = self.command.expand_args(&source.path, Some(&expected));

        log::debug!("compiling {}", source.path.display());
        let output = self
            .executor
            .execute(|cmd| cmd.args(&args), &self.command.program)
            .map_err(|e| AdapterError::spawn(&self.command.program, e))?;

        if !output.status.success() {
            return Err(AdapterError::command_failed(&self.command.program, &output));
        }

        if !self.fs.is_file(&expected) {
            return Ok(None);
        }

        Ok(Some(CompiledArtifact::new(expected)))
    }
}
