//! Pairing & delta engine

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::types::{AnalyzedFile, AnalyzedPair};

/// Baseline records keyed by origin path
pub type BaselineMap = BTreeMap<PathBuf, AnalyzedFile>;

/// Variant records keyed by origin path, in the order they were attempted
pub type VariantMap = BTreeMap<PathBuf, Vec<AnalyzedFile>>;

/// Cross-join every baseline with the variants recorded for its origin
///
/// Pairs come out in origin order, then in variant order within an origin.
/// An origin without a variants entry contributes no pairs. Structurally
/// identical variants still get one pair each.
pub fn build_pairs<'a>(baselines: &'a BaselineMap, variants: &'a VariantMap) -> Vec<AnalyzedPair<'a>> {
    baselines
        .iter()
        .flat_map(|(origin, baseline)| {
            let recorded: &[AnalyzedFile] = variants.get(origin).map(Vec::as_slice).unwrap_or_default();
            recorded
                .iter()
                .map(move |variant| AnalyzedPair::new(baseline, variant))
        })
        .collect()
}
