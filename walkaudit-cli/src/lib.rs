//! Command-line interface for verifying walk audits against town boundaries.
#![forbid(unsafe_code)]

use std::ffi::OsString;
use std::io::Write;

use clap::{Parser, Subcommand};

mod error;
mod report;
mod verify;

pub use error::CliError;
pub use report::OutputFormat;

use verify::{VerifyArgs, run_verify_with};

const ARG_DATA_DIR: &str = "data-dir";
const ARG_TOWNS: &str = "towns";
const ARG_AUDITS: &str = "audits";
const ARG_FORMAT: &str = "format";
const ARG_SAMPLE_SIZE: &str = "sample-size";

/// Run the walkaudit CLI with the current process arguments and environment,
/// writing the report to stdout.
pub fn run() -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_from(std::env::args_os(), &mut stdout)
}

/// Run the CLI with explicit arguments, writing the report to `writer`.
///
/// The first argument is the program name, as with [`std::env::args_os`].
pub fn run_from<I, T>(args: I, writer: &mut dyn Write) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Verify(args) => run_verify_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "walkaudit",
    about = "Cross-reference walk audits with municipal boundaries",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Match every audit to a town by identifier or name and report the outcome.
    Verify(VerifyArgs),
}

#[cfg(test)]
mod tests;
