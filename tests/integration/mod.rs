//! Integration tests for vtquery.

pub mod binary_test;
pub mod common;
pub mod query_commands_test;
