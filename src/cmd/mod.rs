//! Command handlers for the obfuscation-impact CLI
//!
//! Each submodule handles one CLI command.

pub mod analyze;
pub mod completions;
pub mod init;
pub mod tools;

pub use analyze::{cmd_analyze, AnalyzeOptions};
pub use completions::cmd_completions;
pub use init::cmd_init;
pub use tools::cmd_tools;
