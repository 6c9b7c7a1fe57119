//! Run summary and per-failure diagnostics

use console::style;
use std::io::{self, Write};

use crate::fmt::{CHECKMARK, WARNING};
use crate::pipeline::{CleanupReport, RunState};

/// Counts describing a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Artifacts with a baseline
    pub analyzed: usize,
    /// Baseline/variant comparisons
    pub pairs: usize,
    /// Recorded stage failures
    pub failures: usize,
}

impl RunSummary {
    /// Summarize a run state
    pub fn of(state: &RunState) -> Self {
        Self {
            analyzed: state.baselines().len(),
            pairs: state.variants().values().map(Vec::len).sum(),
            failures: state.failures().len(),
        }
    }
}

/// Write the summary line and one warning per recorded failure
pub fn write_diagnostics<W: Write>(err: &mut W, state: &RunState) -> io::Result<()> {
    let summary = RunSummary::of(state);

    writeln!(
        err,
        "\n{} Analyzed {} artifact(s), {} comparison(s)",
        CHECKMARK,
        style(summary.analyzed).bold(),
        style(summary.pairs).bold()
    )?;

    if summary.failures > 0 {
        writeln!(
            err,
            "{} {} stage failure(s):",
            WARNING,
            style(summary.failures).yellow().bold()
        )?;
        for failure in state.failures() {
            writeln!(err, "   {} {}", style("warning:").yellow(), failure)?;
        }
    }
    Ok(())
}

/// Write one warning per compiled file cleanup could not remove
pub fn write_cleanup_warnings<W: Write>(err: &mut W, report: &CleanupReport) -> io::Result<()> {
    for (path, e) in &report.failures {
        writeln!(
            err,
            "{} Could not delete {} during cleanup: {}",
            WARNING,
            path.display(),
            e
        )?;
    }
    Ok(())
}
