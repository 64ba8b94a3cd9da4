//! Once-only configuration holder.

use super::model::Config;
use crate::error::ConfigurationError;
use std::sync::OnceLock;
use tracing::{debug, warn};

static CONFIG: ConfigCell = ConfigCell::new();

/// Holds a configuration that is resolved at most once.
///
/// A failed load stores nothing, so a later call retries. If two threads race
/// the first load, both run the loader and the first stored value wins.
#[derive(Debug, Default)]
pub struct ConfigCell {
    cell: OnceLock<Config>,
}

impl ConfigCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the cached configuration, running `load` if there is none yet.
    pub fn get_or_load<F>(&self, load: F) -> Result<&Config, ConfigurationError>
    where
        F: FnOnce() -> Result<Config, ConfigurationError>,
    {
        if let Some(config) = self.cell.get() {
            return Ok(config);
        }

        let config = load()?;
        Ok(self.cell.get_or_init(|| config))
    }

    /// Return the cached configuration without loading.
    #[cfg(test)]
    pub(crate) fn get(&self) -> Option<&Config> {
        self.cell.get()
    }
}

/// Get the process-wide configuration, resolving it on first use.
///
/// The first call loads `.env` from the current directory (if present) before
/// snapshotting the environment.
pub fn get_config() -> Result<&'static Config, ConfigurationError> {
    CONFIG.get_or_load(|| {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "failed to load .env"),
        }
        Config::discover()
    })
}
