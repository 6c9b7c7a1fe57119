//! Pure analysis core
//!
//! Everything in this module is free of I/O:
//! - [`call_flow`]: parsing and rendering of call traces
//! - [`rating`]: turning an extractor result into an [`AnalyzedFile`]
//! - [`pairing`]: correlating baselines with their variants and computing deltas

pub mod call_flow;
pub mod pairing;
pub mod rating;
pub mod types;

pub use call_flow::{normalize, CallTrace};
pub use pairing::{build_pairs, BaselineMap, VariantMap};
pub use rating::{rate, Extraction, StructuralCounts};
pub use types::{AnalyzedFile, AnalyzedPair, TransformationKind};
