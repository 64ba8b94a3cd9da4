//! Entry point for the `copilot-runner` CLI.
//!
//! Parses arguments, sets up logging, dispatches to the command handler, and
//! maps errors to exit codes.

use copilot_runner::cli::Cli;
use copilot_runner::{commands, exit_codes, logging};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.log_level.as_deref());

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
