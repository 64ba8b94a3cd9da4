//! Config resolution: repository root discovery, schema loading and
//! credential accessors.

use super::model::Config;
use super::types::{
    ADO_TOKEN_VAR, EnvironmentConfig, FilePatternConfig, PathConfig, TimeoutConfig,
};
use crate::error::ConfigurationError;
use crate::git;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Levels to ascend from the executable's directory when git is unavailable.
/// The runner is installed at `{root}/.github/scripts/`.
pub const FALLBACK_ASCENT: usize = 2;

/// JSON pointer to the instance id pattern inside the dataset schema.
const INSTANCE_PATTERN_POINTER: &str = "/properties/instance_id/pattern";

impl PathConfig {
    /// Discover the repository root starting from `start`.
    ///
    /// Asks git for the top-level directory. If that fails for any reason,
    /// falls back to a fixed ascent from the runner executable's directory
    /// (or from `start` when the executable location is unknown). Never fails.
    pub fn discover<P: AsRef<Path>>(start: P) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let start = start.as_ref();
        Self::discover_with_fallback(start, exe_dir.as_deref().unwrap_or(start))
    }

    pub(crate) fn discover_with_fallback(start: &Path, fallback_anchor: &Path) -> Self {
        let root = match git::get_repo_root(start) {
            Ok(root) => root,
            Err(e) => {
                let anchor = absolutize(fallback_anchor);
                let root = anchor
                    .ancestors()
                    .nth(FALLBACK_ASCENT)
                    .map(Path::to_path_buf)
                    .unwrap_or(anchor);
                debug!(error = %e, root = %root.display(), "git root discovery failed, using fallback");
                root
            }
        };

        Self::from_root(absolutize(&root))
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

impl Config {
    /// Load configuration for the repository described by `paths`.
    ///
    /// The dataset schema is a hard dependency: a missing or malformed file
    /// fails with `ConfigurationError`. A schema without an instance id
    /// pattern is fine and yields `instance_pattern: None`.
    pub fn load(paths: PathConfig) -> Result<Self, ConfigurationError> {
        let instance_pattern = read_instance_pattern(&paths.dataset_schema_path)?;
        debug!(
            root = %paths.root.display(),
            instance_pattern = ?instance_pattern,
            "loaded dataset schema"
        );

        Ok(Self {
            paths,
            env: EnvironmentConfig::from_environment(),
            timeout: TimeoutConfig::default(),
            file_patterns: FilePatternConfig::with_instance_pattern(instance_pattern),
        })
    }

    /// Discover the repository and load it.
    ///
    /// Git is asked from the current directory; if that fails, the root is a
    /// fixed ascent from the executable's directory (see `PathConfig::discover`).
    pub fn discover() -> Result<Self, ConfigurationError> {
        let start = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load(PathConfig::discover(start))
    }

    /// Return the Azure DevOps token.
    ///
    /// Only code paths that actually talk to ADO call this; everything else
    /// runs fine without the credential.
    pub fn resolve_ado_token(&self) -> Result<&str, ConfigurationError> {
        match self.env.ado_token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ConfigurationError::MissingCredential(ADO_TOKEN_VAR)),
        }
    }

    /// Serialize config to pretty JSON, with secrets redacted.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn read_instance_pattern(schema_path: &Path) -> Result<Option<String>, ConfigurationError> {
    let content =
        std::fs::read_to_string(schema_path).map_err(|source| ConfigurationError::SchemaRead {
            path: schema_path.to_path_buf(),
            source,
        })?;

    let schema: Value =
        serde_json::from_str(&content).map_err(|source| ConfigurationError::SchemaParse {
            path: schema_path.to_path_buf(),
            source,
        })?;

    Ok(schema
        .pointer(INSTANCE_PATTERN_POINTER)
        .and_then(Value::as_str)
        .map(str::to_string))
}
