//! Command execution pipeline.
//!
//! Every query command runs the same sequence: parse the tablet alias, pass
//! the parse checkpoint, build the request, make one remote call, render.
//! Any failure aborts the command; nothing is retried and nothing is written
//! unless rendering succeeded.

use std::fmt;
use std::io::Write;

use tracing::{debug, info_span, Instrument};

use super::command::QueryCommand;
use super::request::{QueryDefaults, RequestBuilder, VtctldRequest};
use crate::error::Result;
use crate::output::{self, Payload};
use crate::vtctld::VtctldClient;

/// Barrier passed once argument parsing is complete, before any network
/// access.
pub trait ParseCheckpoint: Send + Sync {
    fn finished_parsing(&self);
}

/// Pipeline stage, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Parsing and validating; no side effects.
    Building,
    /// The remote call is in flight.
    Dispatched,
    /// Encoding the reply for output.
    Rendering,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Building => "building",
            Stage::Dispatched => "dispatched",
            Stage::Rendering => "rendering",
        })
    }
}

/// Runs query commands against a vtctld client.
pub struct QueryExecutor<'a> {
    client: &'a dyn VtctldClient,
    checkpoint: &'a dyn ParseCheckpoint,
    builder: RequestBuilder,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new executor.
    pub fn new(
        client: &'a dyn VtctldClient,
        checkpoint: &'a dyn ParseCheckpoint,
        defaults: QueryDefaults,
    ) -> Self {
        Self {
            client,
            checkpoint,
            builder: RequestBuilder::new(defaults),
        }
    }

    /// Runs `command` and returns the rendered output.
    pub async fn execute(&self, command: &QueryCommand) -> Result<String> {
        let operation = command.operation();
        let span = info_span!("command", operation = %operation);

        async {
            debug!(stage = %Stage::Building, "Parsing arguments");
            let tablet_alias = command.parse_tablet_alias()?;

            self.checkpoint.finished_parsing();

            let request = self.builder.build(command, tablet_alias)?;
            debug!(stage = %Stage::Building, tier = ?operation.tier(), ?request, "Request built");

            debug!(stage = %Stage::Dispatched, "Calling vtctld");
            let payload = self.dispatch(request).await?;

            let mode = command.output_mode();
            debug!(stage = %Stage::Rendering, ?mode, items = payload.len(), "Rendering reply");
            output::render(&payload, mode)
        }
        .instrument(span)
        .await
    }

    /// Runs `command` and writes its output to `out` in one write.
    pub async fn run(&self, command: &QueryCommand, out: &mut dyn Write) -> Result<()> {
        let rendered = self.execute(command).await?;
        output::write_rendered(out, &rendered)
    }

    /// Makes the single remote call for `request`.
    async fn dispatch(&self, request: VtctldRequest) -> Result<Payload> {
        let payload = match request {
            VtctldRequest::FetchAsApp(req) => {
                Payload::Single(self.client.execute_fetch_as_app(req).await?.result)
            }
            VtctldRequest::FetchAsDba(req) => {
                Payload::Single(self.client.execute_fetch_as_dba(req).await?.result)
            }
            VtctldRequest::MultiFetchAsDba(req) => {
                Payload::Batch(self.client.execute_multi_fetch_as_dba(req).await?.results)
            }
            VtctldRequest::UnresolvedTransactions(req) => Payload::Transactions(
                self.client.get_unresolved_transactions(req).await?.transactions,
            ),
        };

        Ok(payload)
    }
}
