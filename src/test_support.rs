use crate::config::{DATASET_SCHEMA_PATH, PathConfig};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Minimal dataset schema carrying an instance id pattern.
pub(crate) const SCHEMA_WITH_PATTERN: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "properties": {
    "instance_id": {
      "type": "string",
      "pattern": "^[a-zA-Z0-9_-]+__[a-zA-Z0-9_-]+-[0-9]+$"
    }
  }
}"#;

pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// Write `contents` to the dataset schema location under `root`.
pub(crate) fn write_schema(root: &Path, contents: &str) {
    let schema_path = root.join(DATASET_SCHEMA_PATH);
    std::fs::create_dir_all(schema_path.parent().unwrap()).unwrap();
    std::fs::write(schema_path, contents).unwrap();
}

/// Scratch repository root with a schema in place, plus its path config.
pub(crate) fn schema_root(contents: &str) -> (TempDir, PathConfig) {
    let temp_dir = TempDir::new().unwrap();
    write_schema(temp_dir.path(), contents);
    let paths = PathConfig::from_root(temp_dir.path());
    (temp_dir, paths)
}

fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}
