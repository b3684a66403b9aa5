//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<PortalConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let config: PortalConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {:?}", path))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration, or use defaults when the file does not exist
pub fn load_config_or_default(path: &Path) -> Result<PortalConfig> {
    if !path.exists() {
        tracing::debug!("no config at {:?}, using defaults", path);
        return Ok(PortalConfig::default());
    }
    load_config(path)
}
