//! Filesystem and process seams
//!
//! The collector, the command-line adapters and the cleanup step reach the
//! outside world only through these traits, so tests can substitute
//! in-memory or scripted implementations.

use std::fs::{Metadata, ReadDir};
use std::io;
use std::path::Path;
use std::process::{Command, Output};

/// Filesystem operations used by the pipeline
pub trait FileSystem {
    /// Read the entries of a directory
    fn read_dir(&self, path: &Path) -> io::Result<ReadDir>;

    /// Get metadata for a file or directory
    fn metadata(&self, path: &Path) -> io::Result<Metadata>;

    /// Read a whole file into a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write bytes to a file, replacing it
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;

    /// Create a directory and any missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// True when `path` names an existing regular file
    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<ReadDir> {
        std::fs::read_dir(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        std::fs::metadata(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Blocking execution of external programs
///
/// Calls have no timeout: a hung tool hangs the run.
pub trait CommandExecutor {
    /// Run a command to completion and capture its output
    fn output(&self, cmd: &mut Command) -> io::Result<Output>;

    /// Build a command with a closure, run it and capture its output
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use obfuscation_impact::infra::{CommandExecutor, RealCommandExecutor};
    ///
    /// let executor = RealCommandExecutor;
    /// let output = executor.execute(|cmd| cmd.arg("-version"), "javac")?;
    /// println!("javac exited with {}", output.status);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn execute<F>(&self, builder: F, program: &str) -> io::Result<Output>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.output(&mut cmd)
    }
}

/// [`CommandExecutor`] backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct RealCommandExecutor;

impl CommandExecutor for RealCommandExecutor {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        log::debug!("running {:?}", cmd);
        cmd.output()
    }
}

/// Create an ExitStatus with the given exit code for use in test mocks.
///
/// This avoids spawning actual processes in tests.
#[cfg(all(test, unix))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

#[cfg(all(test, windows))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code as u32)
}

/// Canned process output for test mocks
#[cfg(test)]
pub fn mock_output(code: i32, stdout: &str, stderr: &str) -> Output {
    Output {
        status: mock_exit_status(code),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Executor that answers every command with a closure
#[cfg(test)]
pub struct FnExecutor<F>(pub F);

#[cfg(test)]
impl<F> CommandExecutor for FnExecutor<F>
where
    F: Fn(&Command) -> io::Result<Output>,
{
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        (self.0)(cmd)
    }
}

/// Arguments of a command as strings, for assertions in mocks
#[cfg(test)]
pub fn command_args(cmd: &Command) -> Vec<String> {
    cmd.get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}
