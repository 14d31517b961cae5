//! Configuration loading for CLI commands

use anyhow::{Context, Result};
use greenplan_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

/// File picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "greenplan.toml";

/// Defaults, then the config file, then `GREENPLAN_*` variables
///
/// An explicit `path` must exist. Without one, `greenplan.toml` in the
/// working directory is used when present.
pub fn load_config(path: Option<&Path>) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    match config_file(path) {
        Some(file) => {
            tracing::debug!(path = %file.display(), "Loading configuration file");
            config = config
                .load_from_file(&file)
                .with_context(|| format!("Failed to load configuration from {}", file.display()))?;
        }
        None => tracing::debug!("No configuration file, using defaults"),
    }

    Ok(config.load_from_env())
}

/// Layered configuration with CLI overrides on top
pub fn load_config_with_overrides(
    path: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_config(path)?;
    config.update_from_cli(overrides);
    Ok(config)
}

fn config_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}
