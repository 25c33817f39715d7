//! Stat base value loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skilltree_core::StatDefinition;

use crate::loaders::{LoadResult, read_file};

/// Stat file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatFile {
    pub stats: Vec<StatDefinition>,
}

/// Loader for stat definitions from RON files.
pub struct StatLoader;

impl StatLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatDefinition>> {
        let content = read_file(path)?;
        let file: StatFile = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse stat RON {}: {}", path.display(), e)
        })?;

        Ok(file.stats)
    }
}
