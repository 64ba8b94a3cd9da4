//! Agent subprocess runner.
//!
//! Spawns the agent with a timeout, captures its stderr, and classifies the
//! outcome. Outcomes are mutually exclusive:
//!
//! | Outcome              | Result                                        |
//! |----------------------|-----------------------------------------------|
//! | executable missing   | `Err(AgentError::ExecutableNotFound)`, no spawn |
//! | timeout              | `Ok(AgentOutcome { success: false, .. })`     |
//! | non-zero exit        | `Err(AgentError::NonZeroExit)` with stderr    |
//! | success              | `Ok(AgentOutcome { success: true, .. })`      |
//! | other I/O failure    | `Err(RunnerError::Io)`, unwrapped             |

use super::command::{AgentCommand, resolve_executable};
use super::metrics::{Metrics, extract_metrics};
use crate::error::{AgentError, Result, RunnerError};
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long to wait for the stderr pipe to close once the child has exited.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Result of one agent invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutcome {
    /// Metrics scraped from the agent output. `None` when nothing was found
    /// or the agent did not complete.
    pub metrics: Option<Metrics>,
    /// Whether the agent ran to completion with exit code 0.
    pub success: bool,
    /// Wall-clock time spent on the child.
    pub duration: Duration,
}

impl AgentOutcome {
    fn timed_out(duration: Duration) -> Self {
        Self {
            metrics: None,
            success: false,
            duration,
        }
    }
}

/// Run the agent in `working_dir`, relaying its stderr to stdout on success.
pub fn run_agent(command: &AgentCommand, working_dir: &Path) -> Result<AgentOutcome> {
    let stdout = std::io::stdout();
    let mut relay = stdout.lock();
    run_agent_with_relay(command, working_dir, &mut relay)
}

/// Run the agent in `working_dir`, writing its captured stderr to `relay` on
/// success.
pub fn run_agent_with_relay<W: Write>(
    command: &AgentCommand,
    working_dir: &Path,
    relay: &mut W,
) -> Result<AgentOutcome> {
    info!(program = %command.program, "Running agent");
    info!(working_dir = %working_dir.display(), "Executing agent in directory");

    let search_path = std::env::var_os("PATH");
    let program = resolve_executable(&command.program, search_path.as_deref()).ok_or_else(
        || AgentError::ExecutableNotFound {
            program: command.program.clone(),
        },
    )?;

    if let Some(var) = command.credential_var.as_deref() {
        if std::env::var_os(var).is_none_or(|value| value.is_empty()) {
            warn!("{} not found in environment", var);
        }
    }

    let result = supervise(command, &program, working_dir, relay);
    if let Err(RunnerError::Io(e)) = &result {
        error!(error = %e, program = %command.program, "Unexpected error running agent");
    }
    result
}

fn supervise<W: Write>(
    command: &AgentCommand,
    program: &Path,
    working_dir: &Path,
    relay: &mut W,
) -> Result<AgentOutcome> {
    // The child inherits the full parent environment.
    let mut cmd = Command::new(program);
    cmd.args(&command.args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped());

    // Own process group, so a timeout can take down tools the agent started.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let start_time = Instant::now();
    let mut child = cmd.spawn()?;

    // Drain stderr concurrently so a chatty child cannot block on a full pipe.
    let (stderr_tx, stderr_rx) = mpsc::channel();
    if let Some(mut stderr) = child.stderr.take() {
        std::thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stderr_tx.send(stderr.read_to_end(&mut buffer).map(|_| buffer));
        });
    } else {
        let _ = stderr_tx.send(Ok(Vec::new()));
    }

    let status = wait_with_timeout(&mut child, command.timeout)?;
    let duration = start_time.elapsed();

    let Some(status) = status else {
        // Whatever the reader collected is discarded; it is never joined.
        error!(
            program = %command.program,
            "Agent timed out after {} seconds",
            command.timeout.as_secs()
        );
        return Ok(AgentOutcome::timed_out(duration));
    };

    // Leftover descendants may still hold the write end of the pipe.
    kill_process_group(&child);
    let captured = collect_stderr(&stderr_rx, &command.program)?;

    if !status.success() {
        let stderr = String::from_utf8_lossy(&captured).trim().to_string();
        error!(
            program = %command.program,
            "Agent execution failed with error {}",
            stderr
        );
        return Err(AgentError::NonZeroExit {
            program: command.program.clone(),
            code: status.code(),
            stderr,
        }
        .into());
    }

    if !captured.is_empty() {
        relay.write_all(&captured)?;
        relay.flush()?;
    }
    info!(duration_ms = duration.as_millis() as u64, "Agent run complete");

    let text = String::from_utf8_lossy(&captured);
    let metrics = extract_metrics(text.lines());

    Ok(AgentOutcome {
        metrics,
        success: true,
        duration,
    })
}

/// Wait for a child process with timeout.
///
/// Returns `None` if the timeout elapsed and the child was killed. The child
/// is also killed when its status cannot be queried.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    kill_process(child);
                    return Ok(None);
                }
                std::thread::sleep(POLL_INTERVAL.min(timeout.saturating_sub(start.elapsed())));
            }
            Err(e) => {
                kill_process(child);
                return Err(e.into());
            }
        }
    }
}

/// Kill a process and its group, then wait for it to terminate.
fn kill_process(child: &mut Child) {
    kill_process_group(child);
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_process_group(child: &Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    #[allow(clippy::cast_possible_wrap)]
    let pgid = Pid::from_raw(child.id() as i32);
    // ESRCH once the whole group is gone.
    let _ = killpg(pgid, Signal::SIGKILL);
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

/// Receive the reader's bytes, waiting at most `DRAIN_GRACE`.
///
/// A descendant that escaped the process group can keep the pipe open
/// forever; its output is dropped rather than waited for.
fn collect_stderr(rx: &Receiver<std::io::Result<Vec<u8>>>, program: &str) -> Result<Vec<u8>> {
    match rx.recv_timeout(DRAIN_GRACE) {
        Ok(bytes) => Ok(bytes?),
        Err(RecvTimeoutError::Timeout) => {
            warn!(
                program = %program,
                "stderr still open {}s after exit, output discarded",
                DRAIN_GRACE.as_secs()
            );
            Ok(Vec::new())
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(std::io::Error::other("stderr reader thread panicked").into())
        }
    }
}
