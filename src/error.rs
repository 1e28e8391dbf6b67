//! Error types for vtquery.
//!
//! Defines the main error enum used throughout the client.

use thiserror::Error;

/// Main error type for vtquery operations.
#[derive(Error, Debug)]
pub enum VtqueryError {
    /// The tablet alias token could not be parsed. Raised before any network access.
    #[error("Malformed tablet alias: {0}")]
    MalformedAlias(String),

    /// Transport or server-side failures reported by the vtctld call, verbatim.
    #[error("{0}")]
    Rpc(String),

    /// A reply value could not be represented in the output document.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration errors (invalid config file, bad server address, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing rendered output failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VtqueryError {
    /// Creates a malformed alias error with the given message.
    pub fn malformed_alias(msg: impl Into<String>) -> Self {
        Self::MalformedAlias(msg.into())
    }

    /// Creates a remote call error with the given message.
    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }

    /// Creates an encoding error with the given message.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MalformedAlias(_) => "Argument Error",
            Self::Rpc(_) => "RPC Error",
            Self::Encoding(_) => "Encoding Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

impl From<std::io::Error> for VtqueryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for VtqueryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}

/// Result type alias using VtqueryError.
pub type Result<T> = std::result::Result<T, VtqueryError>;
