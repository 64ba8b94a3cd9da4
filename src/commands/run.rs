//! Implementation of the `copilot-runner run` command.
//!
//! 1. Creates `copilot_logs/` under the working directory
//! 2. Resolves configuration (once per process)
//! 3. Runs the Copilot CLI agent
//! 4. Relays its stderr to stdout and `copilot_logs/stderr.log` on success

use crate::agent::{AgentCommand, AgentOutcome, run_agent_with_relay};
use crate::cli::RunArgs;
use crate::config::{Config, get_config};
use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Output directory created under the working directory.
pub const LOGS_DIR_NAME: &str = "copilot_logs";

/// File receiving the relayed agent stderr.
pub const STDERR_LOG_NAME: &str = "stderr.log";

/// Execute the `copilot-runner run` command.
pub fn cmd_run(args: RunArgs) -> Result<()> {
    info!("=== GitHub Copilot CLI Agent Runner ===");

    let working_dir = match args.working_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let logs_dir = ensure_logs_dir(&working_dir)?;

    let config = get_config()?;
    let command = AgentCommand::copilot(config);

    let outcome = run_in(config, &command, &working_dir, &logs_dir)?;

    if outcome.success {
        info!("Copilot CLI execution completed successfully");
        report_artifacts(config, &working_dir);
        if let Some(metrics) = outcome.metrics.as_ref().filter(|m| !m.is_empty()) {
            info!("Metrics collected: {:?}", metrics);
        }
    } else {
        warn!("Copilot CLI execution completed with warnings");
    }

    info!("=== Run completed ===");
    Ok(())
}

/// Run `command` in `working_dir`, teeing relayed output into `logs_dir`.
pub(crate) fn run_in(
    config: &Config,
    command: &AgentCommand,
    working_dir: &Path,
    logs_dir: &Path,
) -> Result<AgentOutcome> {
    report_ignored_instructions(config, working_dir);
    debug!(command = %command.display(), timeout_secs = command.timeout.as_secs(), "Agent command");

    let stderr_log = File::create(logs_dir.join(STDERR_LOG_NAME))?;
    let stdout = std::io::stdout();
    let mut relay = Tee {
        primary: stdout.lock(),
        secondary: stderr_log,
    };

    run_agent_with_relay(command, working_dir, &mut relay)
}

/// Create the logs directory if it does not exist yet.
pub(crate) fn ensure_logs_dir(working_dir: &Path) -> Result<PathBuf> {
    let logs_dir = working_dir.join(LOGS_DIR_NAME);
    std::fs::create_dir_all(&logs_dir)?;
    Ok(logs_dir)
}

/// The agent runs with `--no-custom-instructions`; say so when the checkout
/// carries instruction files it will not see.
fn report_ignored_instructions(config: &Config, working_dir: &Path) {
    match config.file_patterns.instruction_files(working_dir) {
        Ok(files) if !files.is_empty() => {
            info!(
                count = files.len(),
                "Custom instruction files present but disabled for this run"
            );
            for file in &files {
                debug!(path = %file.display(), "Ignored instruction file");
            }
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Could not scan for instruction files"),
    }
}

/// Benchmark artifacts at the top level of `dir`, as (kind, file name) pairs.
pub(crate) fn find_artifacts(config: &Config, dir: &Path) -> Vec<(&'static str, String)> {
    let patterns = &config.file_patterns;
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut found: Vec<_> = entries
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            let kind = if patterns.is_trajectory_file(&name) {
                "trajectory"
            } else if patterns.is_patch_file(&name) {
                "patch"
            } else if patterns.is_result_file(&name) {
                "result"
            } else {
                return None;
            };
            Some((kind, name))
        })
        .collect();
    found.sort();
    found
}

fn report_artifacts(config: &Config, working_dir: &Path) {
    for (kind, name) in find_artifacts(config, working_dir) {
        info!(kind, file = %name, "Artifact present in working directory");
    }
}

/// Writes everything to both sinks.
struct Tee<A: Write, B: Write> {
    primary: A,
    secondary: B,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.primary.write_all(buf)?;
        self.secondary.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.primary.flush()?;
        self.secondary.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::schema_root;
    use std::time::Duration;

    #[test]
    fn test_ensure_logs_dir_is_idempotent() {
        let temp_dir = tempfile::TempDir::new().unwrap();

        let first = ensure_logs_dir(temp_dir.path()).unwrap();
        std::fs::write(first.join("keep.txt"), "x").unwrap();
        let second = ensure_logs_dir(temp_dir.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, temp_dir.path().join("copilot_logs"));
        assert!(second.join("keep.txt").exists());
    }

    #[test]
    fn test_tee_writes_both_sinks() {
        let mut tee = Tee {
            primary: Vec::new(),
            secondary: Vec::new(),
        };
        tee.write_all(b"tokens: 7\n").unwrap();
        tee.flush().unwrap();

        assert_eq!(tee.primary, b"tokens: 7\n");
        assert_eq!(tee.secondary, b"tokens: 7\n");
    }

    #[test]
    fn test_find_artifacts_classifies_by_suffix() {
        let (temp_dir, paths) = schema_root("{}");
        let config = Config::load(paths).unwrap();
        for name in ["run.traj.json", "fix.patch", "results.jsonl", "notes.txt"] {
            std::fs::write(temp_dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir_all(temp_dir.path().join("dir.patch")).unwrap();

        let found = find_artifacts(&config, temp_dir.path());

        assert_eq!(
            found,
            vec![
                ("patch", "fix.patch".to_string()),
                ("result", "results.jsonl".to_string()),
                ("trajectory", "run.traj.json".to_string()),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_run_in_records_stderr_log() {
        let (temp_dir, paths) = schema_root("{}");
        let config = Config::load(paths).unwrap();
        let logs_dir = ensure_logs_dir(temp_dir.path()).unwrap();
        let command = AgentCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo 'input tokens: 42' >&2".to_string()],
            timeout: Duration::from_secs(10),
            credential_var: None,
        };

        let outcome = run_in(&config, &command, temp_dir.path(), &logs_dir).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.metrics, None);
        let log = std::fs::read_to_string(logs_dir.join(STDERR_LOG_NAME)).unwrap();
        assert_eq!(log, "input tokens: 42\n");
    }
}
