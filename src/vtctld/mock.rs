//! In-memory vtctld clients for testing.
//!
//! `MockVtctldClient` answers queries with canned results and records every
//! request it receives; `FailingVtctldClient` rejects every call.

use std::sync::Mutex;

use async_trait::async_trait;

use super::types::{
    ExecuteFetchAsAppRequest, ExecuteFetchAsDbaRequest, ExecuteFetchResponse,
    ExecuteMultiFetchAsDbaRequest, ExecuteMultiFetchResponse, GetUnresolvedTransactionsRequest,
    GetUnresolvedTransactionsResponse, TransactionMetadata,
};
use super::VtctldClient;
use crate::error::{Result, VtqueryError};
use crate::sqltypes::{Field, QueryResult, Value};

/// A request received by a test client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    FetchAsApp(ExecuteFetchAsAppRequest),
    FetchAsDba(ExecuteFetchAsDbaRequest),
    MultiFetchAsDba(ExecuteMultiFetchAsDbaRequest),
    UnresolvedTransactions(GetUnresolvedTransactionsRequest),
}

/// A mock vtctld that returns predefined results.
///
/// Without an explicit result, `select <integer>` yields a single INT64 column
/// named after the literal, and anything else yields one text cell echoing
/// the statement. Multi-statement batches are split on `;`.
#[derive(Default)]
pub struct MockVtctldClient {
    fetch_result: Option<QueryResult>,
    transactions: Vec<TransactionMetadata>,
    failing_statement: Option<(usize, String)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockVtctldClient {
    /// Creates a mock with default query behavior and no transactions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `result` for every single-statement fetch.
    pub fn with_fetch_result(mut self, result: QueryResult) -> Self {
        self.fetch_result = Some(result);
        self
    }

    /// Returns `transactions` from `GetUnresolvedTransactions`.
    pub fn with_transactions(mut self, transactions: Vec<TransactionMetadata>) -> Self {
        self.transactions = transactions;
        self
    }

    /// Makes the statement at `index` (zero-based) of a batch fail server-side.
    ///
    /// The whole batch call fails, as vtctld reports it.
    pub fn with_failing_statement(mut self, index: usize, message: impl Into<String>) -> Self {
        self.failing_statement = Some((index, message.into()));
        self
    }

    /// Number of remote calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    /// Snapshot of the received requests, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) -> Result<()> {
        self.calls
            .lock()
            .map_err(|_| VtqueryError::internal("mock call log poisoned"))?
            .push(call);
        Ok(())
    }

    fn answer(&self, statement: &str) -> QueryResult {
        if let Some(result) = &self.fetch_result {
            return result.clone();
        }

        let statement = statement.trim();
        let is_dml = ["insert ", "update ", "delete "].iter().any(|verb| {
            statement
                .get(..verb.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(verb))
        });
        if is_dml {
            return QueryResult::default().with_rows_affected(1);
        }

        let literal = statement
            .get(..7)
            .filter(|prefix| prefix.eq_ignore_ascii_case("select "))
            .map(|_| statement[7..].trim());

        match literal.and_then(|l| l.parse::<i64>().ok().map(|n| (l, n))) {
            Some((name, n)) => {
                QueryResult::with_data(vec![Field::new(name, "INT64")], vec![vec![Value::Int(n)]])
            }
            None => QueryResult::with_data(
                vec![Field::new("result", "VARCHAR")],
                vec![vec![Value::Text(format!("Mock result for: {}", statement))]],
            ),
        }
    }
}

#[async_trait]
impl VtctldClient for MockVtctldClient {
    async fn execute_fetch_as_app(
        &self,
        request: ExecuteFetchAsAppRequest,
    ) -> Result<ExecuteFetchResponse> {
        let result = self.answer(&request.query);
        self.record(RecordedCall::FetchAsApp(request))?;
        Ok(ExecuteFetchResponse { result })
    }

    async fn execute_fetch_as_dba(
        &self,
        request: ExecuteFetchAsDbaRequest,
    ) -> Result<ExecuteFetchResponse> {
        let result = self.answer(&request.query);
        self.record(RecordedCall::FetchAsDba(request))?;
        Ok(ExecuteFetchResponse { result })
    }

    async fn execute_multi_fetch_as_dba(
        &self,
        request: ExecuteMultiFetchAsDbaRequest,
    ) -> Result<ExecuteMultiFetchResponse> {
        let statements: Vec<String> = request
            .sql
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        self.record(RecordedCall::MultiFetchAsDba(request))?;

        let mut results = Vec::with_capacity(statements.len());
        for (index, statement) in statements.iter().enumerate() {
            if let Some((failing, message)) = &self.failing_statement {
                if *failing == index {
                    return Err(VtqueryError::rpc(message.clone()));
                }
            }
            results.push(self.answer(statement));
        }

        Ok(ExecuteMultiFetchResponse { results })
    }

    async fn get_unresolved_transactions(
        &self,
        request: GetUnresolvedTransactionsRequest,
    ) -> Result<GetUnresolvedTransactionsResponse> {
        self.record(RecordedCall::UnresolvedTransactions(request))?;
        Ok(GetUnresolvedTransactionsResponse {
            transactions: self.transactions.clone(),
        })
    }
}

/// A vtctld client whose every call fails with the same server error.
pub struct FailingVtctldClient {
    message: String,
    calls: Mutex<usize>,
}

impl FailingVtctldClient {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Mutex::new(0),
        }
    }

    /// Number of remote calls attempted so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|n| *n).unwrap_or_default()
    }

    fn fail<T>(&self) -> Result<T> {
        if let Ok(mut n) = self.calls.lock() {
            *n += 1;
        }
        Err(VtqueryError::rpc(self.message.clone()))
    }
}

#[async_trait]
impl VtctldClient for FailingVtctldClient {
    async fn execute_fetch_as_app(
        &self,
        _request: ExecuteFetchAsAppRequest,
    ) -> Result<ExecuteFetchResponse> {
        self.fail()
    }

    async fn execute_fetch_as_dba(
        &self,
        _request: ExecuteFetchAsDbaRequest,
    ) -> Result<ExecuteFetchResponse> {
        self.fail()
    }

    async fn execute_multi_fetch_as_dba(
        &self,
        _request: ExecuteMultiFetchAsDbaRequest,
    ) -> Result<ExecuteMultiFetchResponse> {
        self.fail()
    }

    async fn get_unresolved_transactions(
        &self,
        _request: GetUnresolvedTransactionsRequest,
    ) -> Result<GetUnresolvedTransactionsResponse> {
        self.fail()
    }
}
