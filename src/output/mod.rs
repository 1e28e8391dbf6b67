//! Rendering of command replies.
//!
//! Provides the two output modes: bordered text tables and pretty-printed
//! JSON documents. Rendering is pure; the caller writes the finished text
//! with a single write.

pub mod table;

pub use table::ResultTable;

use std::io::Write;

use serde::Serialize;

use crate::error::{Result, VtqueryError};
use crate::sqltypes::QueryResult;
use crate::vtctld::TransactionMetadata;

/// Output mode, selected once per invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable tables.
    #[default]
    Table,
    /// One JSON document.
    Json,
}

impl OutputMode {
    /// Maps the `--json` flag to a mode.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// A decoded reply, shaped by the command that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// One result from a single-statement fetch.
    Single(QueryResult),
    /// One result per statement, in submission order.
    Batch(Vec<QueryResult>),
    /// Unresolved transactions. Only renderable as JSON.
    Transactions(Vec<TransactionMetadata>),
}

impl Payload {
    /// Number of results or transactions carried.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(results) => results.len(),
            Self::Transactions(txns) => txns.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Renders `payload` in `mode` to the exact text to be written.
pub fn render(payload: &Payload, mode: OutputMode) -> Result<String> {
    match (mode, payload) {
        (OutputMode::Json, Payload::Single(result)) => render_json(result),
        (OutputMode::Json, Payload::Batch(results)) => render_json(results),
        (OutputMode::Json, Payload::Transactions(txns)) => render_json(txns),
        (OutputMode::Table, Payload::Single(result)) => Ok(ResultTable::new(result).render()),
        (OutputMode::Table, Payload::Batch(results)) => Ok(results
            .iter()
            .map(|result| ResultTable::new(result).render())
            .collect()),
        (OutputMode::Table, Payload::Transactions(_)) => Err(VtqueryError::internal(
            "unresolved transactions can only be rendered as JSON",
        )),
    }
}

/// Encodes `value` as one pretty-printed JSON document terminated by a newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut data = serde_json::to_string_pretty(value)?;
    data.push('\n');
    Ok(data)
}

/// Writes rendered output in one write and flushes.
pub fn write_rendered(out: &mut dyn Write, rendered: &str) -> Result<()> {
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}
