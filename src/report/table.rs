//! Fixed-width metrics table

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::{AnalyzedFile, AnalyzedPair, TransformationKind};

/// Title printed above the table
pub const TABLE_TITLE: &str = "---File Analysis---";

const KIND_WIDTH: usize = 20;
const NAME_WIDTH: usize = 25;
const VALUE_WIDTH: usize = 20;

/// Column headers, right-aligned
pub fn header_row() -> String {
    format!(
        "{:>kw$}{:>nw$}{:>vw$}{:>vw$}{:>vw$}{:>vw$}",
        "Obfuscator",
        "File Name",
        "Methods",
        "Size",
        "Fields",
        "Constant Pool",
        kw = KIND_WIDTH,
        nw = NAME_WIDTH,
        vw = VALUE_WIDTH,
    )
}

/// Absolute values of a baseline
pub fn baseline_row(baseline: &AnalyzedFile) -> String {
    format!(
        "{:>kw$}{:>nw$}{:>vw$}{:>vw$}{:>vw$}{:>vw$}",
        TransformationKind::None.label(),
        baseline.file_name,
        baseline.num_methods,
        baseline.file_size,
        baseline.num_fields,
        baseline.cpool_size,
        kw = KIND_WIDTH,
        nw = NAME_WIDTH,
        vw = VALUE_WIDTH,
    )
}

/// Deltas of a variant against its baseline
///
/// The constant-pool column is the variant's absolute size, not a delta.
pub fn pair_row(pair: &AnalyzedPair<'_>) -> String {
    format!(
        "{:>kw$}{:>nw$}{:>vw$}{:>vw$}{:>vw$}{:>vw$}",
        pair.kind().label(),
        pair.file_name(),
        pair.methods_changed(),
        pair.size_change(),
        pair.fields_changed(),
        pair.cpool_size(),
        kw = KIND_WIDTH,
        nw = NAME_WIDTH,
        vw = VALUE_WIDTH,
    )
}

/// Write the table: each origin's baseline row precedes its first pair row
pub fn write_table<W: Write>(out: &mut W, pairs: &[AnalyzedPair<'_>]) -> io::Result<()> {
    writeln!(out, "{}", TABLE_TITLE)?;
    writeln!(out, "{}", header_row())?;

    let mut seen: HashSet<&Path> = HashSet::new();
    for pair in pairs {
        if seen.insert(pair.origin_path()) {
            writeln!(out, "{}", baseline_row(pair.baseline()))?;
        }
        writeln!(out, "{}", pair_row(pair))?;
    }
    Ok(())
}
