//! Request construction.
//!
//! Turns a parsed command and its options into the typed vtctld request,
//! filling unset options from [`QueryDefaults`]. Construction is pure.

use serde::{Deserialize, Serialize};

use super::command::QueryCommand;
use crate::error::{Result, VtqueryError};
use crate::topo::TabletAlias;
use crate::vtctld::{
    ExecuteFetchAsAppRequest, ExecuteFetchAsDbaRequest, ExecuteMultiFetchAsDbaRequest,
    GetUnresolvedTransactionsRequest,
};

/// Row cap forwarded when neither the command line nor the config sets one.
pub const DEFAULT_MAX_ROWS: i64 = 10_000;

/// Defaults applied to options the caller left unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDefaults {
    /// Maximum number of rows a tablet may return.
    #[serde(default = "default_max_rows")]
    pub max_rows: i64,
}

fn default_max_rows() -> i64 {
    DEFAULT_MAX_ROWS
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

/// Options for application-user fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppFetchOptions {
    pub max_rows: Option<i64>,
    pub use_pool: bool,
}

/// Options for DBA-user fetches, single or multi-statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbaFetchOptions {
    pub max_rows: Option<i64>,
    pub disable_binlogs: bool,
    pub reload_schema: bool,
}

/// A request ready to be dispatched, tagged with its remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VtctldRequest {
    FetchAsApp(ExecuteFetchAsAppRequest),
    FetchAsDba(ExecuteFetchAsDbaRequest),
    MultiFetchAsDba(ExecuteMultiFetchAsDbaRequest),
    UnresolvedTransactions(GetUnresolvedTransactionsRequest),
}

/// Builds vtctld requests from commands.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    defaults: QueryDefaults,
}

impl RequestBuilder {
    /// Creates a builder applying `defaults` to unset options.
    pub fn new(defaults: QueryDefaults) -> Self {
        Self { defaults }
    }

    /// Builds the request for `command`.
    ///
    /// `tablet_alias` is the alias already parsed from the command; commands
    /// that target a tablet fail without one.
    pub fn build(
        &self,
        command: &QueryCommand,
        tablet_alias: Option<TabletAlias>,
    ) -> Result<VtctldRequest> {
        let request = match command {
            QueryCommand::ExecuteFetchAsApp { query, options, .. } => {
                VtctldRequest::FetchAsApp(ExecuteFetchAsAppRequest {
                    tablet_alias: require_alias(command, tablet_alias)?,
                    query: query.clone(),
                    max_rows: self.max_rows(options.max_rows),
                    use_pool: options.use_pool,
                })
            }
            QueryCommand::ExecuteFetchAsDba { query, options, .. } => {
                VtctldRequest::FetchAsDba(ExecuteFetchAsDbaRequest {
                    tablet_alias: require_alias(command, tablet_alias)?,
                    query: query.clone(),
                    max_rows: self.max_rows(options.max_rows),
                    disable_binlogs: options.disable_binlogs,
                    reload_schema: options.reload_schema,
                })
            }
            QueryCommand::ExecuteMultiFetchAsDba { sql, options, .. } => {
                VtctldRequest::MultiFetchAsDba(ExecuteMultiFetchAsDbaRequest {
                    tablet_alias: require_alias(command, tablet_alias)?,
                    sql: sql.clone(),
                    max_rows: self.max_rows(options.max_rows),
                    disable_binlogs: options.disable_binlogs,
                    reload_schema: options.reload_schema,
                })
            }
            QueryCommand::GetUnresolvedTransactions { keyspace } => {
                VtctldRequest::UnresolvedTransactions(GetUnresolvedTransactionsRequest {
                    keyspace: keyspace.clone(),
                })
            }
        };

        Ok(request)
    }

    fn max_rows(&self, requested: Option<i64>) -> i64 {
        requested.unwrap_or(self.defaults.max_rows)
    }
}

fn require_alias(command: &QueryCommand, alias: Option<TabletAlias>) -> Result<TabletAlias> {
    alias.ok_or_else(|| {
        VtqueryError::internal(format!(
            "{} requires a parsed tablet alias",
            command.operation().rpc_name()
        ))
    })
}
