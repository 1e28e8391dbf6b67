//! Request and response messages exchanged with vtctld.
//!
//! Each remote operation has its own request type so that options belonging
//! to one credential tier can never leak into a request for the other.

use serde::{Deserialize, Serialize};

use crate::sqltypes::QueryResult;
use crate::topo::TabletAlias;

/// Method names on the vtctld service.
pub mod method {
    pub const EXECUTE_FETCH_AS_APP: &str = "ExecuteFetchAsApp";
    pub const EXECUTE_FETCH_AS_DBA: &str = "ExecuteFetchAsDBA";
    pub const EXECUTE_MULTI_FETCH_AS_DBA: &str = "ExecuteMultiFetchAsDBA";
    pub const GET_UNRESOLVED_TRANSACTIONS: &str = "GetUnresolvedTransactions";
}

/// Executes a query as the application user on a tablet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteFetchAsAppRequest {
    pub tablet_alias: TabletAlias,
    pub query: String,
    pub max_rows: i64,
    /// Use the tablet connection pool instead of a fresh connection.
    pub use_pool: bool,
}

/// Executes a query as the DBA user on a tablet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteFetchAsDbaRequest {
    pub tablet_alias: TabletAlias,
    pub query: String,
    pub max_rows: i64,
    pub disable_binlogs: bool,
    pub reload_schema: bool,
}

/// Executes a semicolon-separated batch of statements as the DBA user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteMultiFetchAsDbaRequest {
    pub tablet_alias: TabletAlias,
    pub sql: String,
    pub max_rows: i64,
    pub disable_binlogs: bool,
    pub reload_schema: bool,
}

/// Looks up unresolved distributed transactions for a keyspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUnresolvedTransactionsRequest {
    pub keyspace: String,
}

/// Reply carrying one result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteFetchResponse {
    #[serde(default)]
    pub result: QueryResult,
}

/// Reply carrying one result per submitted statement, in statement order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteMultiFetchResponse {
    #[serde(default)]
    pub results: Vec<QueryResult>,
}

/// Reply carrying the unresolved transactions of a keyspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetUnresolvedTransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<TransactionMetadata>,
}

/// A distributed transaction that has not been resolved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    /// Distributed transaction id.
    pub dtid: String,
    #[serde(default)]
    pub state: TransactionState,
    /// Creation time in nanoseconds since the epoch.
    #[serde(default)]
    pub time_created: i64,
    #[serde(default)]
    pub participants: Vec<Target>,
}

/// Two-phase commit state of a distributed transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionState {
    #[default]
    Unknown,
    Prepare,
    Rollback,
    Commit,
}

/// A shard participating in a distributed transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub keyspace: String,
    pub shard: String,
}

impl Target {
    pub fn new(keyspace: impl Into<String>, shard: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.into(),
            shard: shard.into(),
        }
    }
}
