//! copilot-runner: CI shim around the GitHub Copilot CLI agent.
//!
//! Resolves repository configuration once, runs the agent as a supervised
//! subprocess, and scrapes its diagnostic output for telemetry.

pub mod agent;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod logging;

#[cfg(test)]
mod test_support;
