//! Configuration management for vtquery.
//!
//! Handles loading configuration from a TOML file and resolving the final
//! connection settings with command-line and environment overrides.

use crate::cli::Cli;
use crate::error::{Result, VtqueryError};
use crate::query::QueryDefaults;
use crate::vtctld::HttpVtctldConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Default vtctld gateway address.
pub const DEFAULT_SERVER: &str = "http://localhost:15000";

/// Main configuration structure for vtquery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address of the vtctld gateway.
    #[serde(default)]
    pub server: Option<String>,

    /// Deadline for each remote call, in seconds.
    #[serde(default = "default_action_timeout")]
    pub action_timeout_secs: u64,

    /// Defaults for query options.
    #[serde(default)]
    pub query: QueryDefaults,
}

fn default_action_timeout() -> u64 {
    crate::vtctld::DEFAULT_ACTION_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            action_timeout_secs: default_action_timeout(),
            query: QueryDefaults::default(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vtquery")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| VtqueryError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            VtqueryError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Resolves the transport settings.
    ///
    /// Precedence: command line (including its environment fallbacks), then
    /// the config file, then built-in defaults.
    pub fn transport(&self, cli: &Cli) -> Result<HttpVtctldConfig> {
        let server = cli
            .server
            .as_deref()
            .or(self.server.as_deref())
            .unwrap_or(DEFAULT_SERVER);
        let timeout = cli.action_timeout.unwrap_or(self.action_timeout_secs);
        if timeout == 0 {
            return Err(VtqueryError::config(
                "Action timeout must be at least one second",
            ));
        }

        Ok(HttpVtctldConfig::new(parse_server_address(server)?).with_timeout(timeout))
    }
}

/// Parses a server address into a base URL.
///
/// Bare `host:port` addresses get an `http://` scheme. The path always ends
/// in `/` so method names join beneath it.
pub fn parse_server_address(addr: &str) -> Result<Url> {
    let addr = addr.trim();
    if addr.is_empty() {
        return Err(VtqueryError::config("Server address must not be empty"));
    }

    let with_scheme = if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    };

    let mut url = Url::parse(&with_scheme)
        .map_err(|e| VtqueryError::config(format!("Invalid server address '{addr}': {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(VtqueryError::config(format!(
            "Invalid scheme '{}'. Expected 'http' or 'https'",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
