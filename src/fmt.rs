//! Shared console symbols
//!
//! Each symbol falls back to plain ASCII when the terminal cannot render
//! emoji or when `--no-emoji` is given.

use console::Emoji;

/// Wrench emoji for tool checks
pub const WRENCH: Emoji = Emoji("🔧", "*");

/// Microscope emoji for analysis runs
pub const MICROSCOPE: Emoji = Emoji("🔍", ">>");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Warning emoji for recorded failures
pub const WARNING: Emoji = Emoji("⚠️", "!");
