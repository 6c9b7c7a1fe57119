//! Top-level error types with contextual suggestions
//!
//! Provides structured errors that include:
//! - Actionable error messages
//! - Suggested fixes
//! - Proper exit codes for scripted runs
//!
//! Per-artifact failures never surface here: the orchestrator records them
//! and the run continues. These errors end a run before or outside the
//! per-artifact loop.

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::PipelineError;

/// obfuscation-impact errors with contextual suggestions
#[derive(Error, Debug)]
pub enum ImpactError {
    /// Required external tool is not installed
    #[error("Tool not installed: {tool} ({binary})")]
    ToolMissing {
        /// Role of the tool (compiler, extractor, ...)
        tool: String,
        /// Program that could not be found
        binary: String,
    },

    /// Explicitly requested configuration file could not be read
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Configuration file parsed but failed validation
    #[error("Invalid configuration in {path}: {reason}")]
    ConfigInvalid {
        /// Path to config file
        path: PathBuf,
        /// What is wrong
        reason: String,
    },

    /// Refusing to overwrite an existing configuration file
    #[error("Configuration file already exists: {path}")]
    ConfigExists {
        /// Path to the existing file
        path: PathBuf,
    },

    /// Analysis root does not exist
    #[error("Analysis root not found: {path}")]
    RootNotFound {
        /// Path that was given
        path: PathBuf,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Pipeline error outside the per-artifact loop
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

impl ImpactError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use obfuscation_impact::error::ImpactError;
    ///
    /// let error = ImpactError::ToolMissing {
    ///     tool: "compiler".to_string(),
    ///     binary: "javac".to_string(),
    /// };
    ///
    /// let suggestion = error.suggestion().unwrap();
    /// assert!(suggestion.contains("javac"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ToolMissing { tool, binary } => Some(format!(
                "Install {} or point the {} entry of .obfuscation-impact.toml at it. \
                 Run 'obfuscation-impact tools' to check every configured tool",
                binary, tool
            )),
            Self::ConfigNotFound { path, .. } => Some(format!(
                "Check the --config path, or run 'obfuscation-impact init' to create {}",
                path.display()
            )),
            Self::ConfigInvalid { .. } => Some(
                "Fix the configuration, or regenerate it with 'obfuscation-impact init --force'"
                    .to_string(),
            ),
            Self::ConfigExists { .. } => {
                Some("Pass --force to overwrite the existing configuration".to_string())
            }
            Self::RootNotFound { path } => Some(format!(
                "Ensure {} exists and contains source files",
                path.display()
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
            Self::Pipeline(PipelineError::Collection { root, .. }) => Some(format!(
                "Check that {} is a readable directory",
                root.display()
            )),
            Self::Pipeline(PipelineError::Report(_)) => {
                Some("Check that standard output is writable (e.g. not a closed pipe)".to_string())
            }
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use obfuscation_impact::error::ImpactError;
    /// use std::path::PathBuf;
    ///
    /// let error = ImpactError::RootNotFound { path: PathBuf::from("missing") };
    /// assert_eq!(error.exit_code(), 66);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolMissing { .. } => 127, // Command not found (Unix convention)
            Self::ConfigNotFound { .. } => 66, // EX_NOINPUT
            Self::ConfigInvalid { .. } => 78, // EX_CONFIG
            Self::ConfigExists { .. } => 73, // EX_CANTCREAT
            Self::RootNotFound { .. } => 66, // EX_NOINPUT
            Self::Io { .. } => 74,           // EX_IOERR
            Self::Pipeline(_) => 74,         // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and a suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(impact_error) = error.downcast_ref::<ImpactError>() {
            if let Some(suggestion) = impact_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(impact_error) = error.downcast_ref::<ImpactError>() {
            impact_error.exit_code()
        } else {
            1
        }
    }
}
