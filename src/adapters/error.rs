//! Error types for the external-tool adapters

use std::process::Output;
use thiserror::Error;

/// Errors raised while talking to the filesystem or an external tool
#[derive(Error, Debug)]
pub enum AdapterError {
    /// I/O error
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// The program could not be started at all
    #[error("Failed to run {program}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("{program} exited with status {code}: {summary}")]
    CommandFailed {
        /// Program that was invoked
        program: String,
        /// Exit code, -1 when terminated by a signal
        code: i32,
        /// Last non-empty stderr line
        summary: String,
    },

    /// The program's stdout was not the expected JSON document
    #[error("Unreadable output from {program}")]
    MalformedOutput {
        /// Program that was invoked
        program: String,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl AdapterError {
    /// Build a [`AdapterError::CommandFailed`] from a finished process
    pub fn command_failed(program: &str, output: &Output) -> Self {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let summary = stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("no diagnostic output")
            .to_string();

        Self::CommandFailed {
            program: program.to_string(),
            code: output.status.code().unwrap_or(-1),
            summary,
        }
    }

    /// This error followed by every underlying cause, joined with `: `
    ///
    /// # Examples
    ///
    /// ```
    /// use obfuscation_impact::adapters::AdapterError;
    /// use std::io;
    ///
    /// let missing = io::Error::new(io::ErrorKind::NotFound, "no such file");
    /// let err = AdapterError::spawn("javac", missing);
    /// assert_eq!(err.chain_message(), "Failed to run javac: no such file");
    /// ```
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = std::error::Error::source(err);
        }
        message
    }

    /// Wrap a spawn failure with the program name
    pub fn spawn(program: &str, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.to_string(),
            source,
        }
    }
}
