//! Command variants and the operations they map to.

use super::request::{AppFetchOptions, DbaFetchOptions};
use crate::error::Result;
use crate::output::OutputMode;
use crate::topo::TabletAlias;
use crate::vtctld::method;

/// One query command as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryCommand {
    /// Run `query` as the application user.
    ExecuteFetchAsApp {
        tablet_alias: String,
        query: String,
        options: AppFetchOptions,
        json: bool,
    },
    /// Run `query` as the DBA user.
    ExecuteFetchAsDba {
        tablet_alias: String,
        query: String,
        options: DbaFetchOptions,
        json: bool,
    },
    /// Run a batch of statements as the DBA user.
    ExecuteMultiFetchAsDba {
        tablet_alias: String,
        sql: String,
        options: DbaFetchOptions,
        json: bool,
    },
    /// List unresolved distributed transactions of a keyspace.
    GetUnresolvedTransactions { keyspace: String },
}

impl QueryCommand {
    /// The remote operation this command invokes.
    pub fn operation(&self) -> Operation {
        match self {
            Self::ExecuteFetchAsApp { .. } => Operation::ExecuteFetchAsApp,
            Self::ExecuteFetchAsDba { .. } => Operation::ExecuteFetchAsDba,
            Self::ExecuteMultiFetchAsDba { .. } => Operation::ExecuteMultiFetchAsDba,
            Self::GetUnresolvedTransactions { .. } => Operation::GetUnresolvedTransactions,
        }
    }

    /// Raw alias token, for commands that target a tablet.
    pub fn tablet_alias_token(&self) -> Option<&str> {
        match self {
            Self::ExecuteFetchAsApp { tablet_alias, .. }
            | Self::ExecuteFetchAsDba { tablet_alias, .. }
            | Self::ExecuteMultiFetchAsDba { tablet_alias, .. } => Some(tablet_alias),
            Self::GetUnresolvedTransactions { .. } => None,
        }
    }

    /// Parses the tablet alias, if the command has one.
    pub fn parse_tablet_alias(&self) -> Result<Option<TabletAlias>> {
        self.tablet_alias_token()
            .map(TabletAlias::parse)
            .transpose()
    }

    /// Output mode for this invocation. Document-only operations ignore the
    /// requested mode.
    pub fn output_mode(&self) -> OutputMode {
        let json = match self {
            Self::ExecuteFetchAsApp { json, .. }
            | Self::ExecuteFetchAsDba { json, .. }
            | Self::ExecuteMultiFetchAsDba { json, .. } => *json,
            Self::GetUnresolvedTransactions { .. } => true,
        };

        if self.operation().allows_table() {
            OutputMode::from_json_flag(json)
        } else {
            OutputMode::Json
        }
    }
}

/// Shape of the reply an operation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// One tabular result.
    Single,
    /// One tabular result per statement.
    Batch,
    /// A set of unresolved transactions.
    Transactions,
}

/// Credential tier a fetch runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    App,
    Dba,
}

/// Remote operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ExecuteFetchAsApp,
    ExecuteFetchAsDba,
    ExecuteMultiFetchAsDba,
    GetUnresolvedTransactions,
}

impl Operation {
    /// All operations, in command listing order.
    pub const ALL: [Operation; 4] = [
        Operation::ExecuteFetchAsApp,
        Operation::ExecuteFetchAsDba,
        Operation::ExecuteMultiFetchAsDba,
        Operation::GetUnresolvedTransactions,
    ];

    /// Method name on the vtctld service.
    pub fn rpc_name(&self) -> &'static str {
        match self {
            Self::ExecuteFetchAsApp => method::EXECUTE_FETCH_AS_APP,
            Self::ExecuteFetchAsDba => method::EXECUTE_FETCH_AS_DBA,
            Self::ExecuteMultiFetchAsDba => method::EXECUTE_MULTI_FETCH_AS_DBA,
            Self::GetUnresolvedTransactions => method::GET_UNRESOLVED_TRANSACTIONS,
        }
    }

    pub fn reply_shape(&self) -> ReplyShape {
        match self {
            Self::ExecuteFetchAsApp | Self::ExecuteFetchAsDba => ReplyShape::Single,
            Self::ExecuteMultiFetchAsDba => ReplyShape::Batch,
            Self::GetUnresolvedTransactions => ReplyShape::Transactions,
        }
    }

    /// Whether results may be rendered as tables.
    pub fn allows_table(&self) -> bool {
        self.reply_shape() != ReplyShape::Transactions
    }

    /// Credential tier, for operations that run SQL on a tablet.
    ///
    /// The tier decides the extra request fields: the pool flag for the app
    /// user, binlog suppression and schema reload for the DBA user.
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::ExecuteFetchAsApp => Some(Tier::App),
            Self::ExecuteFetchAsDba | Self::ExecuteMultiFetchAsDba => Some(Tier::Dba),
            Self::GetUnresolvedTransactions => None,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rpc_name())
    }
}
