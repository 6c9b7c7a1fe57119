//! Configuration for obfuscation-impact
//!
//! This module provides:
//! - `.obfuscation-impact.toml` data structures
//! - Loading (with defaults for a missing file) and saving
//! - Validation of tool commands and extensions

pub mod file;
pub mod loader;

pub use file::{
    ConfigFile, ToolCommand, TransformerCommand, TransformerSettings, CONFIG_FILE_NAME,
    INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER,
};
pub use loader::ConfigLoader;
