//! Configuration sections: paths, timeouts, file patterns and environment.

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Location of the dataset schema relative to the repository root.
pub const DATASET_SCHEMA_PATH: &str = "dataset/schema.json";

/// Azure DevOps credential, required only by code that talks to ADO.
pub const ADO_TOKEN_VAR: &str = "ADO_TOKEN";
pub const GITHUB_OUTPUT_VAR: &str = "GITHUB_OUTPUT";
pub const GITHUB_STEP_SUMMARY_VAR: &str = "GITHUB_STEP_SUMMARY";
pub const GITHUB_ACTIONS_VAR: &str = "GITHUB_ACTIONS";
pub const RUNNER_DEBUG_VAR: &str = "RUNNER_DEBUG";

/// Repository paths. All paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathConfig {
    /// Repository root directory.
    pub root: PathBuf,

    /// Dataset schema document (`{root}/dataset/schema.json`).
    pub dataset_schema_path: PathBuf,
}

impl PathConfig {
    /// Create path configuration from a repository root.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let dataset_schema_path = root.join(DATASET_SCHEMA_PATH);
        Self {
            root,
            dataset_schema_path,
        }
    }
}

/// Timeouts for long-running operations, in seconds.
///
/// These are fixed defaults and are not read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutConfig {
    /// BaseApp compilation.
    pub build_baseapp: u64,
    /// Application compilation.
    pub build_app: u64,
    /// Test execution.
    pub test_execution: u64,
    /// Budget for a full Copilot CLI session in the benchmark pipeline.
    pub github_copilot_cli: u64,
    /// Wall-clock ceiling enforced by `copilot-runner run`.
    ///
    /// Deliberately shorter than `github_copilot_cli`: the runner issues a
    /// single fixed prompt rather than a full task session.
    pub agent_run: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            build_baseapp: 30 * 60,
            build_app: 5 * 60,
            test_execution: 3 * 60,
            github_copilot_cli: 30 * 60,
            agent_run: 5 * 60,
        }
    }
}

/// File patterns and naming conventions for benchmark artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePatternConfig {
    pub trajectory_pattern: String,
    pub patch_pattern: String,
    /// Instance id pattern from the dataset schema, if it declares one.
    pub instance_pattern: Option<String>,
    pub result_pattern: String,
    pub copilot_instruction_naming: String,
    pub copilot_instructions_dirname: String,
    pub copilot_instructions_pattern: String,
}

impl Default for FilePatternConfig {
    fn default() -> Self {
        Self {
            trajectory_pattern: ".traj.json".to_string(),
            patch_pattern: ".patch".to_string(),
            instance_pattern: None,
            result_pattern: ".jsonl".to_string(),
            copilot_instruction_naming: "copilot-instructions.md".to_string(),
            copilot_instructions_dirname: "instructions".to_string(),
            copilot_instructions_pattern: "*.instructions.md".to_string(),
        }
    }
}

/// Snapshot of CI-related environment variables, taken once at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentConfig {
    /// Azure DevOps token. Not validated here; see `Config::resolve_ado_token`.
    #[serde(serialize_with = "redact_secret")]
    pub ado_token: Option<String>,

    /// GitHub Actions output file.
    pub github_output: Option<String>,

    /// GitHub Actions step summary file.
    pub github_step_summary: Option<String>,

    /// `GITHUB_ACTIONS == "true"`.
    pub github_actions: bool,

    /// `RUNNER_DEBUG == "1"`.
    pub runner_debug: bool,
}

impl EnvironmentConfig {
    /// Snapshot the current process environment.
    pub fn from_environment() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the snapshot from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            ado_token: lookup(ADO_TOKEN_VAR),
            github_output: lookup(GITHUB_OUTPUT_VAR),
            github_step_summary: lookup(GITHUB_STEP_SUMMARY_VAR),
            github_actions: lookup(GITHUB_ACTIONS_VAR).as_deref() == Some("true"),
            runner_debug: lookup(RUNNER_DEBUG_VAR).as_deref() == Some("1"),
        }
    }
}

fn redact_secret<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(secret) if !secret.is_empty() => serializer.serialize_str("***"),
        _ => serializer.serialize_none(),
    }
}
