//! Plain-text report of a run
//!
//! The report has two sections, written to any [`Write`]:
//! 1. the metrics table, one baseline row per origin followed by its pairs
//! 2. the call-flow comparison of every traceable origin with variants
//!
//! Diagnostics (summary and failures) are written separately so the CLI can
//! send them to stderr.

pub mod call_flow;
pub mod summary;
pub mod table;

use std::io::{self, Write};

use crate::analysis::AnalyzedPair;
use crate::pipeline::RunState;

pub use call_flow::{write_call_flow, CALL_FLOW_TITLE};
pub use summary::{write_cleanup_warnings, write_diagnostics, RunSummary};
pub use table::{baseline_row, header_row, pair_row, write_table, TABLE_TITLE};

/// Write both report sections
///
/// # Examples
///
/// ```
/// use obfuscation_impact::pipeline::RunState;
/// use obfuscation_impact::report::write_report;
///
/// let state = RunState::new();
/// let mut out = Vec::new();
/// write_report(&mut out, &state, &state.pairs())?;
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.starts_with("---File Analysis---"));
/// assert!(text.contains("--- Call Flow Analysis ---"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_report<W: Write>(
    out: &mut W,
    state: &RunState,
    pairs: &[AnalyzedPair<'_>],
) -> io::Result<()> {
    write_table(out, pairs)?;
    writeln!(out)?;
    write_call_flow(out, state)?;
    out.flush()
}
