use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use help_catalog_discovery::output::{default_output_path, write_catalog};
use help_catalog_discovery::probe::DEFAULT_HELP_TIMEOUT_SECS;
use help_catalog_discovery::walker::{
    DEFAULT_CONCURRENCY_LIMIT, DEFAULT_PROGRAM, TreeWalker, WalkConfig,
};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

const ROOT_ENTRY_NOTE: &str = "\
Command strings are the program name and path tokens joined by single spaces.
A program without sub-commands gets a root entry that is the bare program
name (e.g. \"verdi\"), with no trailing space.";

#[derive(Debug, Parser)]
#[command(name = "help-catalog")]
#[command(about = "Walk a program's --help tree and write a flat JSON catalog")]
#[command(after_help = ROOT_ENTRY_NOTE)]
struct Cli {
    /// Program whose help tree is walked.
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    program: String,
    /// Output JSON path (default: <program>_cli.json next to this executable).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Maximum number of help invocations running at once.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY_LIMIT)]
    concurrency: usize,
    /// Timeout for a single help invocation, in seconds.
    #[arg(long, default_value_t = DEFAULT_HELP_TIMEOUT_SECS)]
    timeout_secs: u64,
    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    // Ignored when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = WalkConfig {
        program: cli.program,
        concurrency: cli.concurrency,
        timeout: Duration::from_secs(cli.timeout_secs),
    };
    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&config.program));

    let walker = TreeWalker::with_process_source(config).map_err(|err| err.to_string())?;
    let outcome = walker.run().await;

    write_catalog(&output, &outcome.catalog).map_err(|err| err.to_string())?;

    info!(
        program = walker.program(),
        entries = outcome.catalog.len(),
        failed_nodes = outcome.stats.failed_nodes,
        output = %output.display(),
        "Catalog complete"
    );
    Ok(())
}
