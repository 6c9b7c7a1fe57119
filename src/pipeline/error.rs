//! Error types for the analysis pipeline

use std::path::PathBuf;
use thiserror::Error;

use crate::adapters::AdapterError;

/// Errors that stop a run outside the per-artifact loop
///
/// Compile, transform and extraction faults are not represented here; they
/// are recorded as [`StageFailure`](super::StageFailure)s and the run goes on.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The collector could not walk the analysis root
    #[error("Failed to collect source artifacts under {root}")]
    Collection {
        /// Root directory of the run
        root: PathBuf,
        /// Underlying collector error
        #[source]
        source: AdapterError,
    },

    /// The report could not be written
    #[error("Failed to write report")]
    Report(#[source] std::io::Error),
}
