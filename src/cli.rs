//! Command-line argument parsing for vtquery.
//!
//! Uses clap to parse the global connection options and one subcommand per
//! query command.

use crate::query::{AppFetchOptions, DbaFetchOptions, ParseCheckpoint, QueryCommand};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Run SQL on remote tablets through vtctld.
#[derive(Parser, Debug)]
#[command(name = "vtquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address of the vtctld gateway (e.g., http://localhost:15000)
    #[arg(long, global = true, value_name = "ADDR", env = "VTCTLD_SERVER")]
    pub server: Option<String>,

    /// Deadline for the remote call, in seconds
    #[arg(
        long,
        global = true,
        value_name = "SECONDS",
        env = "VTCTLD_ACTION_TIMEOUT"
    )]
    pub action_timeout: Option<u64>,

    /// Config file path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Query commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Executes the given query as the App user on the remote tablet.
    #[command(name = "ExecuteFetchAsApp")]
    ExecuteFetchAsApp(FetchAsAppArgs),

    /// Executes the given query as the DBA user on the remote tablet.
    #[command(name = "ExecuteFetchAsDBA", alias = "ExecuteFetchAsDba")]
    ExecuteFetchAsDba(FetchAsDbaArgs),

    /// Executes given multiple queries as the DBA user on the remote tablet.
    #[command(name = "ExecuteMultiFetchAsDBA", alias = "ExecuteMultiFetchAsDba")]
    ExecuteMultiFetchAsDba(MultiFetchAsDbaArgs),

    /// Retrieves unresolved transactions for the given keyspace.
    #[command(name = "GetUnresolvedTransactions")]
    GetUnresolvedTransactions(UnresolvedTransactionsArgs),
}

#[derive(Args, Debug)]
pub struct FetchAsAppArgs {
    /// The maximum number of rows to fetch from the remote tablet [default: 10000]
    #[arg(long, value_name = "MAX_ROWS", allow_negative_numbers = true)]
    pub max_rows: Option<i64>,

    /// Use the tablet connection pool instead of creating a fresh connection.
    #[arg(long)]
    pub use_pool: bool,

    /// Output the results in JSON instead of a human-readable table.
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Tablet alias (<cell>-<uid>)
    #[arg(value_name = "TABLET_ALIAS")]
    pub tablet_alias: String,

    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Options shared by the DBA commands.
#[derive(Args, Debug)]
pub struct DbaOptionArgs {
    /// The maximum number of rows to fetch from the remote tablet [default: 10000]
    #[arg(long, value_name = "MAX_ROWS", allow_negative_numbers = true)]
    pub max_rows: Option<i64>,

    /// Disables binary logging during the query.
    #[arg(long)]
    pub disable_binlogs: bool,

    /// Instructs the tablet to reload its schema after executing the query.
    #[arg(long)]
    pub reload_schema: bool,

    /// Output the results in JSON instead of a human-readable table.
    #[arg(short = 'j', long)]
    pub json: bool,
}

impl DbaOptionArgs {
    fn options(&self) -> DbaFetchOptions {
        DbaFetchOptions {
            max_rows: self.max_rows,
            disable_binlogs: self.disable_binlogs,
            reload_schema: self.reload_schema,
        }
    }
}

#[derive(Args, Debug)]
pub struct FetchAsDbaArgs {
    #[command(flatten)]
    pub options: DbaOptionArgs,

    /// Tablet alias (<cell>-<uid>)
    #[arg(value_name = "TABLET_ALIAS")]
    pub tablet_alias: String,

    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Args, Debug)]
pub struct MultiFetchAsDbaArgs {
    #[command(flatten)]
    pub options: DbaOptionArgs,

    /// Tablet alias (<cell>-<uid>)
    #[arg(value_name = "TABLET_ALIAS")]
    pub tablet_alias: String,

    /// Semicolon-separated statements
    #[arg(value_name = "SQL")]
    pub sql: String,
}

#[derive(Args, Debug)]
pub struct UnresolvedTransactionsArgs {
    #[arg(value_name = "KEYSPACE")]
    pub keyspace: String,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Converts the parsed subcommand into a query command.
    pub fn query_command(&self) -> QueryCommand {
        match &self.command {
            Command::ExecuteFetchAsApp(args) => QueryCommand::ExecuteFetchAsApp {
                tablet_alias: args.tablet_alias.clone(),
                query: args.query.clone(),
                options: AppFetchOptions {
                    max_rows: args.max_rows,
                    use_pool: args.use_pool,
                },
                json: args.json,
            },
            Command::ExecuteFetchAsDba(args) => QueryCommand::ExecuteFetchAsDba {
                tablet_alias: args.tablet_alias.clone(),
                query: args.query.clone(),
                options: args.options.options(),
                json: args.options.json,
            },
            Command::ExecuteMultiFetchAsDba(args) => QueryCommand::ExecuteMultiFetchAsDba {
                tablet_alias: args.tablet_alias.clone(),
                sql: args.sql.clone(),
                options: args.options.options(),
                json: args.options.json,
            },
            Command::GetUnresolvedTransactions(args) => QueryCommand::GetUnresolvedTransactions {
                keyspace: args.keyspace.clone(),
            },
        }
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}

/// Tracks whether argument parsing has finished.
///
/// Errors raised before the checkpoint are usage mistakes and get a usage
/// hint; errors after it come from the remote side and are reported alone.
#[derive(Debug, Default)]
pub struct UsageGuard {
    finished: AtomicBool,
}

impl UsageGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the checkpoint has passed.
    pub fn usage_silenced(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

impl ParseCheckpoint for UsageGuard {
    fn finished_parsing(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }
}
