//! An out-of-the-box client for hosted agents that assembles the
//! service connection, local tools and run orchestration.
//!
//! The crate includes a CLI tool for using in the terminal. And you can
//! also use it as a library to bring the same agents into your own host
//! apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod agents;
pub mod config;
pub mod tools;
mod transcript;

pub use transcript::print_thread_messages;

/// Re-exports of [`hosted_agent_core`] crate.
pub mod core {
    pub use hosted_agent_core::*;
}
