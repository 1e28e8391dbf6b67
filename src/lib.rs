//! vtquery - run SQL on remote tablets through vtctld.
//!
//! This library exposes the core modules for use by the binary and in
//! integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;
pub mod sqltypes;
pub mod topo;
pub mod vtctld;
