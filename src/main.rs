//! vtquery - run SQL on remote tablets through vtctld.

use tracing::{debug, info};
use vtquery::cli::{Cli, UsageGuard};
use vtquery::config::Config;
use vtquery::error::Result;
use vtquery::logging;
use vtquery::query::QueryExecutor;
use vtquery::vtctld::HttpVtctldClient;

#[tokio::main]
async fn main() {
    // .env is optional; a missing file is not an error
    let _ = dotenvy::dotenv();

    logging::init_stderr_logging();

    let guard = UsageGuard::new();
    if let Err(e) = run(&guard).await {
        debug!(category = e.category(), "Command failed");
        eprintln!("Error: {e}");
        if !guard.usage_silenced() {
            eprintln!("Run 'vtquery <COMMAND> --help' for usage.");
        }
        std::process::exit(1);
    }
}

async fn run(guard: &UsageGuard) -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let transport = config.transport(&cli)?;
    info!("vtctld server: {}", transport.server);
    let client = HttpVtctldClient::new(transport)?;

    let command = cli.query_command();
    let executor = QueryExecutor::new(&client, guard, config.query);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    executor.run(&command, &mut out).await
}
