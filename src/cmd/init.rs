//! Init command implementation
//!
//! Handles `obfuscation-impact init`, which writes the default
//! `.obfuscation-impact.toml` into the working directory.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::config::{ConfigFile, ConfigLoader, CONFIG_FILE_NAME};
use crate::error::ImpactError;
use crate::fmt::{CHECKMARK, INFO};

/// Write the default configuration to the working directory
///
/// # Examples
///
/// ```no_run
/// use obfuscation_impact::cmd::init::cmd_init;
///
/// // Refuses to overwrite an existing file
/// cmd_init(false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(force: bool) -> Result<()> {
    let dir = std::env::current_dir().context("Failed to get current directory")?;
    init_in(&dir, force)
}

/// Write the default configuration into `dir`
pub fn init_in(dir: &Path, force: bool) -> Result<()> {
    if ConfigLoader::exists(dir) && !force {
        return Err(ImpactError::ConfigExists {
            path: dir.join(CONFIG_FILE_NAME),
        }
        .into());
    }

    let config = ConfigFile::default();
    ConfigLoader::save(&config, dir)?;

    println!(
        "{} Created {}",
        CHECKMARK,
        style(CONFIG_FILE_NAME).cyan()
    );
    println!(
        "{} Compiler: {}, analyzer: {}, transformers: {}",
        INFO,
        style(&config.compiler.program).bold(),
        style(&config.extractor.program).bold(),
        config
            .enabled_transformers()
            .iter()
            .map(|(_, t)| t.command.program.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("   Run 'obfuscation-impact tools' to check they are installed.");
    Ok(())
}
