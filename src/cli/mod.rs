//! CLI argument parsing for copilot-runner.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// copilot-runner: run the GitHub Copilot CLI agent in CI.
///
/// Resolves repository configuration once, spawns the agent with a fixed
/// prompt and timeout, and relays its diagnostic output.
#[derive(Parser, Debug)]
#[command(name = "copilot-runner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug", "warn").
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for copilot-runner.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the Copilot CLI agent.
    ///
    /// Creates `copilot_logs/` under the working directory, runs the agent
    /// there, and relays its stderr to stdout on success.
    Run(RunArgs),

    /// Print the resolved configuration as JSON (secrets redacted).
    Config,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory to run the agent in (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
