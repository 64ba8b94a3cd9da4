//! Exit code constants for the copilot-runner CLI.
//!
//! - 0: Success (a timed-out agent run is reported, not failed)
//! - 1: Any configuration, agent or I/O error

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Failure: configuration problem, agent failure, or unexpected I/O error.
pub const FAILURE: i32 = 1;
