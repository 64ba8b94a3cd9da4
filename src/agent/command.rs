//! The fixed agent invocation.
//!
//! `AgentCommand::copilot` is the single place the model, prompt and flags
//! for the Copilot CLI are defined.

use crate::config::Config;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Copilot CLI executable name.
pub const COPILOT_PROGRAM: &str = "copilot";

/// Model requested from the Copilot CLI.
pub const COPILOT_MODEL: &str = "claude-haiku-4.5";

/// Prompt sent to the Copilot CLI.
pub const COPILOT_PROMPT: &str = "What is the meaning and structure of this repository? \
     After you reply, use gh to make a hello world on the last PR";

/// Credential the Copilot CLI reads to authenticate `gh` operations.
pub const GH_TOKEN_VAR: &str = "GH_TOKEN";

/// A program, its arguments and the limits it runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentCommand {
    /// Program name looked up on `PATH`, or a path to it.
    pub program: String,
    pub args: Vec<String>,
    /// Wall-clock limit after which the child is killed.
    pub timeout: Duration,
    /// Environment variable the child needs for credentials. Its absence is
    /// logged but not fatal.
    pub credential_var: Option<String>,
}

impl AgentCommand {
    /// The Copilot CLI invocation, limited by `timeout.agent_run`.
    pub fn copilot(config: &Config) -> Self {
        Self {
            program: COPILOT_PROGRAM.to_string(),
            args: vec![
                "--allow-all-tools".to_string(),
                "--allow-all-paths".to_string(),
                "--disable-builtin-mcps".to_string(),
                format!("--model={}", COPILOT_MODEL),
                "--log-level=debug".to_string(),
                format!("--prompt={}", COPILOT_PROMPT),
                "--no-custom-instructions".to_string(),
            ],
            timeout: Duration::from_secs(config.timeout.agent_run),
            credential_var: Some(GH_TOKEN_VAR.to_string()),
        }
    }

    /// Shell-quoted rendering for logs.
    pub fn display(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }
}

/// Locate `program` on `search_path` (a `PATH`-style list).
///
/// A program containing a path separator is checked as given and not searched.
pub fn resolve_executable(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let search_path = search_path?;
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| executable_names(program).map(move |name| dir.join(name)))
        .find(|path| is_executable(path))
}

#[cfg(windows)]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    ["", ".exe", ".cmd", ".bat"]
        .into_iter()
        .map(move |ext| format!("{}{}", program, ext))
}

#[cfg(not(windows))]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(program.to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
