//! Query commands: request construction and the execution pipeline.
//!
//! This module isolates the per-command sequence from argument parsing and
//! transport so each piece can be tested on its own.

pub mod command;
pub mod executor;
pub mod request;

pub use command::{Operation, QueryCommand, ReplyShape, Tier};
pub use executor::{ParseCheckpoint, QueryExecutor, Stage};
pub use request::{
    AppFetchOptions, DbaFetchOptions, QueryDefaults, RequestBuilder, VtctldRequest,
    DEFAULT_MAX_ROWS,
};
