#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! obfuscation-impact library
//!
//! Measures how code-transformation tools ("obfuscators") change compiled
//! artifacts. Every source artifact is compiled into a baseline, each
//! configured obfuscator produces a variant from that baseline, and the
//! structural metrics and call traces of every variant are compared against
//! the baseline.
//!
//! The external tools (compiler, obfuscators, structural analyzer) sit behind
//! the traits in [`adapters`], so the rating, pairing and reporting logic can
//! be driven with in-memory fakes.
//!
//! # Basic Example
//!
//! Pairing a baseline with one variant and reading the deltas:
//!
//! ```
//! use obfuscation_impact::analysis::{AnalyzedFile, CallTrace, TransformationKind};
//! use obfuscation_impact::pipeline::RunState;
//! use std::path::PathBuf;
//!
//! let origin = PathBuf::from("/work/src/Greeter.java");
//! let baseline = AnalyzedFile {
//!     origin_path: origin.clone(),
//!     file_name: "Greeter.class".to_string(),
//!     kind: TransformationKind::None,
//!     num_methods: 4,
//!     num_fields: 2,
//!     file_size: 900,
//!     cpool_size: 40,
//!     call_depth: 3,
//!     call_flow: CallTrace::parse("[main, greet, print]"),
//! };
//! let variant = AnalyzedFile {
//!     kind: TransformationKind::ProGuard,
//!     num_methods: 3,
//!     file_size: 700,
//!     cpool_size: 31,
//!     ..baseline.clone()
//! };
//!
//! let mut state = RunState::new();
//! state.record_baseline(baseline);
//! state.record_variant(variant);
//!
//! let pairs = state.pairs();
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].methods_changed(), -1);
//! assert_eq!(pairs[0].size_change(), -200);
//! // Constant pool is reported as the variant's absolute size
//! assert_eq!(pairs[0].cpool_size(), 31);
//! ```
//!
//! # Call-Trace Normalization
//!
//! ```
//! use obfuscation_impact::analysis::normalize;
//!
//! assert_eq!(normalize("[alpha, beta,  gamma]"), "alpha\nbeta\ngamma\n");
//! assert_eq!(normalize("[]"), "");
//! ```

pub mod adapters;
pub mod analysis;
pub mod artifact;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fmt;
pub mod infra;
pub mod pipeline;
pub mod report;
pub mod tools;
