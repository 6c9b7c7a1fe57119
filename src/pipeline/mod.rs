//! Analysis pipeline
//!
//! Runs every collected artifact through:
//! 1. compilation into a baseline
//! 2. extraction and rating of the baseline
//! 3. each configured transformation, then extraction and rating of the variant
//!
//! Results accumulate in a [`RunState`] that is handed on to pairing,
//! reporting and [`Cleanup`].

pub mod cleanup;
pub mod error;
pub mod orchestrator;
pub mod state;

pub use cleanup::{Cleanup, CleanupReport};
pub use error::PipelineError;
pub use orchestrator::{Orchestrator, RunOutcome};
pub use state::{RunState, Stage, StageFailure};
