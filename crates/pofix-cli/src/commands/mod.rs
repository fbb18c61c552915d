//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod serve;

use std::path::{Path, PathBuf};

use tracing::debug;

use pofix_core::PofixConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pofix")
        .join("config.json")
}

/// Load the configuration named on the command line, falling back to the
/// default file and then to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PofixConfig> {
    if let Some(path) = config_path {
        return Ok(PofixConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(PofixConfig::from_file(&default_path)?)
    } else {
        Ok(PofixConfig::default())
    }
}
