//! Implementation of the `copilot-runner config` command.

use crate::config::{Config, get_config};
use crate::error::Result;
use tracing::info;

/// Print the resolved configuration as pretty JSON.
pub fn cmd_config() -> Result<()> {
    let config = get_config()?;
    println!("{}", render_config(config)?);
    Ok(())
}

/// Validate the schema-derived patterns and render the config as JSON.
///
/// An instance id pattern that does not compile is reported as an error, so
/// a broken dataset schema surfaces here rather than in downstream tooling.
pub(crate) fn render_config(config: &Config) -> Result<String> {
    if config.file_patterns.instance_regex()?.is_none() {
        info!("Dataset schema declares no instance id pattern");
    }

    Ok(config.to_json().map_err(std::io::Error::other)?)
}
