//! Analyze command implementation
//!
//! Handles `obfuscation-impact analyze <ROOT>`: collect, compile, transform,
//! extract, report, clean up. The report goes to stdout; progress and
//! diagnostics go to stderr.

use anyhow::{Context, Result};
use console::style;
use std::io::{self, Write};
use std::path::Path;

use crate::adapters::{CommandCompiler, CommandExtractor, CommandTransformer, FolderCollector};
use crate::config::{ConfigFile, ConfigLoader};
use crate::error::ImpactError;
use crate::fmt::{INFO, MICROSCOPE, WARNING};
use crate::pipeline::{Cleanup, Orchestrator, PipelineError};
use crate::report;
use crate::tools::ToolChain;

/// Options of one analyze invocation
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeOptions<'a> {
    /// Directory (or single file) to analyze
    pub root: &'a Path,
    /// Explicit configuration file, instead of the working directory's
    pub config: Option<&'a Path>,
    /// Leave compiled baselines next to their sources
    pub keep_artifacts: bool,
}

/// Run a full analysis and print the report
///
/// # Examples
///
/// ```no_run
/// use obfuscation_impact::cmd::analyze::{cmd_analyze, AnalyzeOptions};
/// use std::path::Path;
///
/// cmd_analyze(AnalyzeOptions {
///     root: Path::new("testFiles/src"),
///     config: None,
///     keep_artifacts: false,
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_analyze(options: AnalyzeOptions<'_>) -> Result<()> {
    if !options.root.exists() {
        return Err(ImpactError::RootNotFound {
            path: options.root.to_path_buf(),
        }
        .into());
    }

    let config = load_config(options.config)?;
    let toolchain = ToolChain::from_config(&config);
    let orchestrator = build_orchestrator(&config, &toolchain);

    let sources = orchestrator
        .collect(&FolderCollector::new(), options.root)
        .map_err(ImpactError::from)?;
    if sources.is_empty() {
        eprintln!(
            "{} No files of type {} found!",
            INFO,
            style(&config.source_extension).cyan()
        );
        return Ok(());
    }

    toolchain.check_required()?;
    for (kind, tool) in &toolchain.transformers {
        if !tool.is_installed() {
            eprintln!(
                "{} {} not found, skipping {} variants",
                WARNING,
                style(&tool.binary).yellow(),
                kind
            );
        }
    }

    eprintln!(
        "{} {} {} file(s) under {}",
        MICROSCOPE,
        style("Analyzing").bold(),
        sources.len(),
        style(options.root.display()).cyan()
    );

    let state = orchestrator.analyze(&sources);
    let pairs = state.pairs();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &state, &pairs)
        .map_err(|e| ImpactError::from(PipelineError::Report(e)))?;

    let stderr = io::stderr();
    let mut err = stderr.lock();
    report::write_diagnostics(&mut err, &state).context("Failed to write diagnostics")?;

    if options.keep_artifacts {
        log::info!("keeping compiled artifacts");
    } else {
        let cleanup = Cleanup::new(&config.compiled_extension).run(&pairs);
        report::write_cleanup_warnings(&mut err, &cleanup)
            .context("Failed to write diagnostics")?;
    }
    err.flush().context("Failed to write diagnostics")?;

    Ok(())
}

/// Load the explicit config file, or the working directory's (defaults if absent)
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => ConfigLoader::load_file(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            ConfigLoader::load(&cwd)
        }
    }
}

fn build_orchestrator(
    config: &ConfigFile,
    toolchain: &ToolChain,
) -> Orchestrator<CommandCompiler, CommandExtractor> {
    let compiler = CommandCompiler::new(config.compiler.clone(), &config.compiled_extension);
    let extractor = CommandExtractor::new(config.extractor.clone());
    let mut orchestrator = Orchestrator::new(compiler, extractor, &config.source_extension);

    for kind in toolchain.available_transformers() {
        if let Some(transformer) = config.transformer(kind) {
            orchestrator = orchestrator.with_transformer(CommandTransformer::new(
                kind,
                transformer.command.clone(),
                &config.output_dir,
            ));
        }
    }
    orchestrator
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_root_not_found() {
        let temp = TempDir::new().unwrap();
        let err = cmd_analyze(AnalyzeOptions {
            root: &temp.path().join("missing"),
            config: None,
            keep_artifacts: false,
        })
        .unwrap_err();

        let impact = err.downcast_ref::<ImpactError>().unwrap();
        assert_eq!(impact.exit_code(), 66);
    }

    #[test]
    fn test_empty_root_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let result = cmd_analyze(AnalyzeOptions {
            root: temp.path(),
            config: None,
            keep_artifacts: false,
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_explicit_missing_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = load_config(Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ImpactError>(),
            Some(ImpactError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_orchestrator_skips_disabled_transformers() {
        let mut config = ConfigFile::default();
        config.transformers.jshrink.enabled = false;
        config.transformers.proguard.enabled = false;

        let orchestrator = build_orchestrator(&config, &ToolChain::from_config(&config));
        assert!(orchestrator.transformation_kinds().is_empty());
    }
}
