//! Command implementations for copilot-runner.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod run;
mod show_config;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Config => show_config::cmd_config(),
    }
}
