//! Git command runner for copilot-runner.
//!
//! Provides a wrapper around git commands with captured stdout/stderr.
//! Repository root discovery is the only git operation the runner needs, and
//! its failure is never fatal: callers fall back to a filesystem layout.

use crate::error::GitError;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On exit code 0
/// * `Err(GitError::Spawn)` - If git could not be started
/// * `Err(GitError::Failed)` - On a non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput, GitError> {
    let command = args.join(" ");

    let output = Command::new("git")
        .current_dir(cwd.as_ref())
        .args(args)
        .output()
        .map_err(|source| GitError::Spawn {
            command: command.clone(),
            source,
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let message = if git_output.stderr.is_empty() {
            git_output.stdout
        } else {
            git_output.stderr
        };
        Err(GitError::Failed {
            command,
            code: output.status.code(),
            message,
        })
    }
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
pub fn get_repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf, GitError> {
    let output = run_git(cwd, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(output.stdout))
}
