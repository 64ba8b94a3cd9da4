//! Matching helpers for benchmark artifact names and Copilot instruction files.

use super::types::FilePatternConfig;
use crate::error::ConfigurationError;
use globset::Glob;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Directory holding Copilot instruction files, relative to the repository.
const GITHUB_DIR: &str = ".github";

impl FilePatternConfig {
    /// Default patterns with the schema-derived instance pattern injected.
    pub fn with_instance_pattern(instance_pattern: Option<String>) -> Self {
        Self {
            instance_pattern,
            ..Self::default()
        }
    }

    /// Compile the instance id pattern.
    ///
    /// Returns `Ok(None)` when the schema declares no pattern.
    pub fn instance_regex(&self) -> Result<Option<Regex>, ConfigurationError> {
        let Some(pattern) = self.instance_pattern.as_deref() else {
            return Ok(None);
        };

        Regex::new(pattern)
            .map(Some)
            .map_err(|e| ConfigurationError::InvalidPattern {
                name: "instance_pattern",
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn is_trajectory_file(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.trajectory_pattern)
    }

    pub fn is_patch_file(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.patch_pattern)
    }

    pub fn is_result_file(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.result_pattern)
    }

    /// List the Copilot custom instruction files present in `repo`, sorted.
    ///
    /// Covers `.github/copilot-instructions.md` and files under
    /// `.github/instructions/` matching `*.instructions.md`. Missing
    /// directories yield an empty list.
    pub fn instruction_files(&self, repo: &Path) -> Result<Vec<PathBuf>, ConfigurationError> {
        let matcher = Glob::new(&self.copilot_instructions_pattern)
            .map_err(|e| ConfigurationError::InvalidPattern {
                name: "copilot_instructions_pattern",
                pattern: self.copilot_instructions_pattern.clone(),
                reason: e.to_string(),
            })?
            .compile_matcher();

        let github_dir = repo.join(GITHUB_DIR);
        let mut files = Vec::new();

        let main_file = github_dir.join(&self.copilot_instruction_naming);
        if main_file.is_file() {
            files.push(main_file);
        }

        let instructions_dir = github_dir.join(&self.copilot_instructions_dirname);
        if let Ok(entries) = std::fs::read_dir(&instructions_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() && matcher.is_match(entry.file_name()) {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }
}
