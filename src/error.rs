//! Error types for copilot-runner.
//!
//! Uses thiserror for derive macros. Configuration and agent failures are
//! separate types so callers can tell a broken checkout from a broken agent.
//! A timed-out agent run is not an error; see `agent::AgentOutcome`.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Problems resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The dataset schema file is missing or unreadable.
    #[error("failed to read dataset schema '{}': {source}", .path.display())]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset schema file is not valid JSON.
    #[error("failed to parse dataset schema '{}': {source}", .path.display())]
    SchemaParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A credential required by the calling code path is unset or empty.
    #[error("{0} environment variable is required")]
    MissingCredential(&'static str),

    /// A configured pattern does not compile.
    #[error("invalid {name} '{pattern}': {reason}")]
    InvalidPattern {
        name: &'static str,
        pattern: String,
        reason: String,
    },
}

/// Problems invoking the agent binary.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The agent executable is not on the search path. Nothing was spawned.
    #[error("{program} not found in PATH. Please ensure it is installed and available.")]
    ExecutableNotFound { program: String },

    /// The agent exited with a failure status.
    #[error("{program} execution failed ({}): {stderr}", describe_exit(*.code))]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Problems running git. Never fatal: callers fall back to filesystem layout.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to execute git {command}: {source} (is git installed?)")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} failed ({}): {message}", describe_exit(*.code))]
    Failed {
        command: String,
        code: Option<i32>,
        message: String,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Top-level error for a runner invocation.
///
/// `Io` carries unexpected spawn/wait/relay failures through untouched.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigurationError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunnerError::Config(_) | RunnerError::Agent(_) | RunnerError::Io(_) => {
                exit_codes::FAILURE
            }
        }
    }
}

/// Result type alias for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;
