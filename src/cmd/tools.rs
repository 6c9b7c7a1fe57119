//! Tools command implementation
//!
//! Handles `obfuscation-impact tools`, which reports whether every program
//! the configuration names can be found.

use anyhow::Result;
use std::path::Path;

use super::analyze::load_config;
use crate::tools::ToolChain;

/// Print the status of every configured tool
///
/// Fails with a tool-missing error when the compiler or analyzer is absent.
pub fn cmd_tools(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    ToolChain::from_config(&config).check_all()?;
    Ok(())
}
