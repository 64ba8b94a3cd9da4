//! Config struct definition.

use super::types::*;
use serde::Serialize;

/// Resolved runner configuration.
///
/// Built once per process (see `ConfigCell`) and passed by reference to
/// everything that needs it. There is no reload and no per-call override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub paths: PathConfig,
    pub env: EnvironmentConfig,
    pub timeout: TimeoutConfig,
    pub file_patterns: FilePatternConfig,
}
