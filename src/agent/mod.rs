//! Agent execution for copilot-runner.
//!
//! - **Command**: the fixed Copilot CLI invocation and `PATH` lookup
//! - **Runner**: subprocess execution with timeout and stderr capture
//! - **Metrics**: telemetry scraping from captured output
//!
//! The agent is an opaque executable. Exactly one child is spawned per
//! invocation and nothing is retried.

mod command;
mod metrics;
mod runner;

// Re-export public API
pub use command::{AgentCommand, COPILOT_PROGRAM, GH_TOKEN_VAR, resolve_executable};
pub use metrics::{Metrics, extract_metrics};
pub use runner::{AgentOutcome, run_agent, run_agent_with_relay};
