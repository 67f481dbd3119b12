//! An abstraction layer for hosted agent services.
//!
//! This crate establishes an unified protocol for interacting with a
//! remote agents service (the kind that owns agent definitions, threads
//! and runs on the server side), so that the run orchestration can work
//! against any conforming backend without modification.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.
//!
//! Users of this crate may add some extra functionalities or wrappers,
//! depending on their own use cases. Those extra code should be placed
//! in their own crate.

#![deny(missing_docs)]

mod agent;
mod error;
mod message;
mod run;
mod service;

pub use agent::*;
pub use error::*;
pub use message::*;
pub use run::*;
pub use service::*;
