//! Tablet identity.
//!
//! A tablet is addressed by its alias: the cell it lives in plus a numeric uid,
//! written on the command line as `<cell>-<uid>`.

use crate::error::{Result, VtqueryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Expected shape of a tablet alias, used in error messages.
const TABLET_ALIAS_FORMAT: &str = "<cell>-<uid>";

/// Identifies a single tablet in the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabletAlias {
    /// Cell the tablet belongs to (e.g., "zone1").
    pub cell: String,
    /// Tablet uid within the cell.
    pub uid: u32,
}

impl TabletAlias {
    /// Creates an alias from its parts.
    pub fn new(cell: impl Into<String>, uid: u32) -> Self {
        Self {
            cell: cell.into(),
            uid,
        }
    }

    /// Parses a `<cell>-<uid>` token.
    ///
    /// The token must contain exactly one `-`, a non-empty cell, and a uid that
    /// fits in a `u32`. Leading zeros in the uid are accepted.
    pub fn parse(token: &str) -> Result<Self> {
        let parts: Vec<&str> = token.split('-').collect();
        if parts.len() != 2 {
            return Err(VtqueryError::malformed_alias(format!(
                "invalid tablet alias: '{token}', expecting format: '{TABLET_ALIAS_FORMAT}'"
            )));
        }

        let (cell, uid) = (parts[0], parts[1]);
        if cell.is_empty() {
            return Err(VtqueryError::malformed_alias(format!(
                "invalid tablet alias: '{token}', cell must not be empty"
            )));
        }

        if uid.is_empty() || !uid.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VtqueryError::malformed_alias(format!(
                "invalid tablet uid in alias '{token}': expected decimal digits"
            )));
        }

        let uid = uid.parse::<u32>().map_err(|e| {
            VtqueryError::malformed_alias(format!("invalid tablet uid in alias '{token}': {e}"))
        })?;

        Ok(Self::new(cell, uid))
    }
}

impl FromStr for TabletAlias {
    type Err = VtqueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TabletAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:010}", self.cell, self.uid)
    }
}
