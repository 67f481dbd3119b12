//! Core logic including the run poll loop, tool execution, etc.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod runner;
pub mod tool;

pub use runner::{
    Error, InteractionRequest, RunOutcome, Runner, RunnerBuilder, Sleeper,
    TokioSleeper,
};
