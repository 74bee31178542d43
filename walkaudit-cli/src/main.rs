//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;
use walkaudit_cli::CliError;

fn main() -> eyre::Result<()> {
    init_logging();
    match walkaudit_cli::run() {
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        outcome => outcome.map_err(eyre::Report::from),
    }
}

/// Route `log` records from the library crates to stderr, filtered by
/// `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("walkaudit: logging disabled: {err}");
    }
}
