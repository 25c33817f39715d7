//! Session configuration loader.

use std::path::Path;

use crate::config::SessionConfig;
use crate::loaders::{LoadResult, read_file};

/// Loader for session configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Relative paths inside the file are resolved against the file's own
    /// directory. Environment overrides are not applied here; call
    /// [`SessionConfig::apply_env`] afterwards.
    pub fn load(path: &Path) -> LoadResult<SessionConfig> {
        let content = read_file(path)?;
        let mut config: SessionConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }

        Ok(config)
    }
}
