//! Configuration for copilot-runner.
//!
//! Configuration is resolved from three sources: the repository root (found
//! via git, with a filesystem fallback), a dataset schema document under that
//! root, and a snapshot of CI-related environment variables. Timeouts and
//! file-naming patterns are fixed defaults.

mod cell;
mod model;
mod operations;
mod patterns;
pub mod types;


// Re-export public API
pub use cell::{ConfigCell, get_config};
pub use model::Config;
pub use operations::FALLBACK_ASCENT;
pub use types::{
    DATASET_SCHEMA_PATH, EnvironmentConfig, FilePatternConfig, PathConfig, TimeoutConfig,
};
