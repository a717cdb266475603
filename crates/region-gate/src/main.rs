mod commands;
mod config;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::commands::{Commands, Outcome};
use crate::error::CliError;
use crate::logging::LogLevel;

/// Exit status of a negative answer requested with `--exit-code`.
const UNMATCHED_EXIT_CODE: u8 = 1;
const ERROR_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(name = "region-gate")]
#[command(bin_name = "region-gate")]
#[command(version)]
#[command(
    about = "Decide whether a change needs a build from the regions it touched",
    long_about = None
)]
struct Cli {
    /// Repository to inspect (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Configuration file (default: region-gate.toml in the repository)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity, overrides the REGION_GATE_LOG environment variable
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level);

    let start_path = match resolve_start_path(cli.path) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::from(ERROR_EXIT_CODE);
        }
    };

    match cli.command.execute(&start_path, cli.config.as_deref()) {
        Ok(Outcome::Matched) => ExitCode::SUCCESS,
        Ok(Outcome::Unmatched) => ExitCode::from(UNMATCHED_EXIT_CODE),
        Err(e) => {
            print_error(&e);
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

fn resolve_start_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
