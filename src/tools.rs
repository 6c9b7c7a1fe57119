//! Detection of the configured external tools
//!
//! The compiler and the analyzer are required for any run. Transformers are
//! optional: a missing one is reported and left out of the run.

use console::style;
use std::path::PathBuf;

use crate::analysis::TransformationKind;
use crate::config::ConfigFile;
use crate::error::ImpactError;
use crate::fmt::{CHECKMARK, CROSSMARK, WARNING, WRENCH};

/// One configured program
///
/// # Examples
///
/// ```
/// use obfuscation_impact::tools::Tool;
///
/// let tool = Tool::new("compiler", "definitely-not-installed-xyz", true);
/// assert!(!tool.is_installed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Role in the pipeline, e.g. `compiler`
    pub role: String,
    /// Program name or path
    pub binary: String,
    /// Whether a run can proceed without it
    pub required: bool,
}

/// Result of looking a tool up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Found at this path
    Available(PathBuf),
    /// Not on `PATH` and not an executable path
    Missing,
}

impl Tool {
    /// Describe a tool
    pub fn new(role: impl Into<String>, binary: impl Into<String>, required: bool) -> Self {
        Self {
            role: role.into(),
            binary: binary.into(),
            required,
        }
    }

    /// Look the program up on `PATH` (or as a path)
    pub fn check(&self) -> ToolStatus {
        match which::which(&self.binary) {
            Ok(path) => ToolStatus::Available(path),
            Err(_) => ToolStatus::Missing,
        }
    }

    /// True when the program can be found
    pub fn is_installed(&self) -> bool {
        matches!(self.check(), ToolStatus::Available(_))
    }

    fn missing_error(&self) -> ImpactError {
        ImpactError::ToolMissing {
            tool: self.role.clone(),
            binary: self.binary.clone(),
        }
    }
}

/// Every tool a configuration names
pub struct ToolChain {
    /// Baseline compiler
    pub compiler: Tool,
    /// Structural/trace analyzer
    pub extractor: Tool,
    /// Enabled transformers, in attempt order
    pub transformers: Vec<(TransformationKind, Tool)>,
}

impl ToolChain {
    /// Tools named by a configuration; disabled transformers are left out
    pub fn from_config(config: &ConfigFile) -> Self {
        Self {
            compiler: Tool::new("compiler", &config.compiler.program, true),
            extractor: Tool::new("extractor", &config.extractor.program, true),
            transformers: config
                .enabled_transformers()
                .into_iter()
                .map(|(kind, t)| {
                    (
                        kind,
                        Tool::new(format!("{} transformer", kind), &t.command.program, false),
                    )
                })
                .collect(),
        }
    }

    fn all(&self) -> impl Iterator<Item = &Tool> {
        [&self.compiler, &self.extractor]
            .into_iter()
            .chain(self.transformers.iter().map(|(_, tool)| tool))
    }

    /// Fail with [`ImpactError::ToolMissing`] for the first missing required tool
    pub fn check_required(&self) -> Result<(), ImpactError> {
        match self.all().find(|t| t.required && !t.is_installed()) {
            Some(tool) => Err(tool.missing_error()),
            None => Ok(()),
        }
    }

    /// Enabled transformation kinds whose program is installed
    pub fn available_transformers(&self) -> Vec<TransformationKind> {
        self.transformers
            .iter()
            .filter(|(_, tool)| tool.is_installed())
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Print the status of every tool, failing if a required one is missing
    pub fn check_all(&self) -> Result<(), ImpactError> {
        println!("\n{} Checking configured tools...", WRENCH);

        let mut first_missing: Option<&Tool> = None;
        for tool in self.all() {
            match tool.check() {
                ToolStatus::Available(path) => println!(
                    "   {} {} - {}",
                    style("✓").green(),
                    style(&tool.role).bold(),
                    style(path.display()).dim()
                ),
                ToolStatus::Missing if tool.required => {
                    println!(
                        "   {} {} - {} {}",
                        style("✗").red(),
                        style(&tool.role).bold(),
                        style(&tool.binary).red(),
                        style("NOT FOUND").red()
                    );
                    if first_missing.is_none() {
                        first_missing = Some(tool);
                    }
                }
                ToolStatus::Missing => println!(
                    "   {} {} - {} {} {}",
                    style("○").yellow(),
                    style(&tool.role).bold(),
                    style(&tool.binary).yellow(),
                    style("NOT FOUND").yellow(),
                    style("(skipped during analysis)").dim()
                ),
            }
        }

        if let Some(tool) = first_missing {
            println!("\n{} Required tools are missing", CROSSMARK);
            return Err(tool.missing_error());
        }

        if self.available_transformers().is_empty() {
            println!(
                "\n{} No transformer is available; runs will report baselines only",
                WARNING
            );
        } else {
            println!("\n{} All required tools found", CHECKMARK);
        }
        Ok(())
    }
}
