//! Common test utilities and helpers
//!
//! - `fakes`: in-memory adapters for driving the pipeline without tools
//! - `fixtures`: temp directories with sources and scripted fake tools

pub mod fakes;
pub mod fixtures;
