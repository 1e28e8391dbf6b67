//! Client layer for the vtctld control service.
//!
//! Provides a trait-based interface for the remote operations, allowing the
//! HTTP transport and in-memory test clients to be used interchangeably.

mod http;
mod mock;
mod types;

pub use http::{HttpVtctldClient, HttpVtctldConfig, DEFAULT_ACTION_TIMEOUT_SECS};
pub use mock::{FailingVtctldClient, MockVtctldClient, RecordedCall};
pub use types::{
    method,
    ExecuteFetchAsAppRequest, ExecuteFetchAsDbaRequest, ExecuteFetchResponse,
    ExecuteMultiFetchAsDbaRequest, ExecuteMultiFetchResponse, GetUnresolvedTransactionsRequest,
    GetUnresolvedTransactionsResponse, Target, TransactionMetadata, TransactionState,
};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the remote operations used by the query commands.
///
/// Each method performs exactly one round trip. Errors are transport or
/// server failures and are surfaced to the user verbatim.
#[async_trait]
pub trait VtctldClient: Send + Sync {
    /// Runs a query as the application user.
    async fn execute_fetch_as_app(
        &self,
        request: ExecuteFetchAsAppRequest,
    ) -> Result<ExecuteFetchResponse>;

    /// Runs a query as the DBA user.
    async fn execute_fetch_as_dba(
        &self,
        request: ExecuteFetchAsDbaRequest,
    ) -> Result<ExecuteFetchResponse>;

    /// Runs a batch of statements as the DBA user.
    async fn execute_multi_fetch_as_dba(
        &self,
        request: ExecuteMultiFetchAsDbaRequest,
    ) -> Result<ExecuteMultiFetchResponse>;

    /// Lists unresolved distributed transactions in a keyspace.
    async fn get_unresolved_transactions(
        &self,
        request: GetUnresolvedTransactionsRequest,
    ) -> Result<GetUnresolvedTransactionsResponse>;
}
