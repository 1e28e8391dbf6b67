//! HTTP/JSON transport for vtctld.
//!
//! Posts each request as JSON to `<server>/vtctld.Vtctld/<Method>` and decodes
//! the JSON reply. Calls are never retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::types::{
    method, ExecuteFetchAsAppRequest, ExecuteFetchAsDbaRequest, ExecuteFetchResponse,
    ExecuteMultiFetchAsDbaRequest, ExecuteMultiFetchResponse, GetUnresolvedTransactionsRequest,
    GetUnresolvedTransactionsResponse,
};
use super::VtctldClient;
use crate::error::{Result, VtqueryError};

/// Service prefix used in request paths.
const SERVICE_NAME: &str = "vtctld.Vtctld";

/// Default per-call deadline, matching vtctld's default action timeout.
pub const DEFAULT_ACTION_TIMEOUT_SECS: u64 = 3600;

/// HTTP transport configuration.
#[derive(Debug, Clone)]
pub struct HttpVtctldConfig {
    /// Base address of the vtctld gateway.
    pub server: Url,
    /// Deadline applied to every call, in seconds.
    pub action_timeout_secs: u64,
}

impl HttpVtctldConfig {
    /// Creates a config for the given server with the default timeout.
    pub fn new(server: Url) -> Self {
        Self {
            server,
            action_timeout_secs: DEFAULT_ACTION_TIMEOUT_SECS,
        }
    }

    /// Sets the per-call deadline.
    pub fn with_timeout(mut self, action_timeout_secs: u64) -> Self {
        self.action_timeout_secs = action_timeout_secs;
        self
    }
}

/// vtctld client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpVtctldClient {
    config: HttpVtctldConfig,
    client: Client,
}

impl HttpVtctldClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: HttpVtctldConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.action_timeout_secs))
            .build()
            .map_err(|e| VtqueryError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the endpoint URL for a method.
    fn endpoint(&self, method: &str) -> Result<Url> {
        self.config
            .server
            .join(&format!("{SERVICE_NAME}/{method}"))
            .map_err(|e| VtqueryError::config(format!("Invalid server address: {e}")))
    }

    /// Parses an error reply into the message surfaced to the user.
    fn parse_error(status: reqwest::StatusCode, body: &str) -> VtqueryError {
        if let Ok(reply) = serde_json::from_str::<ErrorReply>(body) {
            return VtqueryError::rpc(format!(
                "rpc error: code = {} desc = {}",
                reply.code, reply.message
            ));
        }

        VtqueryError::rpc(format!("rpc error: http status {}: {}", status, body.trim()))
    }

    /// Performs one round trip for `method`.
    async fn call<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(method)?;
        debug!(%url, "Sending vtctld request");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| VtqueryError::rpc(format!("rpc error: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VtqueryError::rpc(format!("rpc error: failed to read reply: {e}")))?;

        if !status.is_success() {
            return Err(Self::parse_error(status, &body));
        }

        debug!(%status, bytes = body.len(), "Received vtctld reply");
        serde_json::from_str(&body)
            .map_err(|e| VtqueryError::rpc(format!("rpc error: malformed {method} reply: {e}")))
    }
}

/// Error body returned by the gateway for failed calls.
#[derive(Debug, Deserialize)]
struct ErrorReply {
    #[serde(default)]
    code: String,
    message: String,
}

#[async_trait]
impl VtctldClient for HttpVtctldClient {
    async fn execute_fetch_as_app(
        &self,
        request: ExecuteFetchAsAppRequest,
    ) -> Result<ExecuteFetchResponse> {
        self.call(method::EXECUTE_FETCH_AS_APP, &request).await
    }

    async fn execute_fetch_as_dba(
        &self,
        request: ExecuteFetchAsDbaRequest,
    ) -> Result<ExecuteFetchResponse> {
        self.call(method::EXECUTE_FETCH_AS_DBA, &request).await
    }

    async fn execute_multi_fetch_as_dba(
        &self,
        request: ExecuteMultiFetchAsDbaRequest,
    ) -> Result<ExecuteMultiFetchResponse> {
        self.call(method::EXECUTE_MULTI_FETCH_AS_DBA, &request).await
    }

    async fn get_unresolved_transactions(
        &self,
        request: GetUnresolvedTransactionsRequest,
    ) -> Result<GetUnresolvedTransactionsResponse> {
        self.call(method::GET_UNRESOLVED_TRANSACTIONS, &request).await
    }
}
