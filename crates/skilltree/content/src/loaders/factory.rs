//! Content factory for loading a whole skill tree from a data directory.

use std::path::{Path, PathBuf};

use skilltree_core::{ResourceCatalog, SkillDefinition, StatDefinition};

use crate::config::SessionConfig;
use crate::loaders::{ConfigLoader, LoadResult, ResourceLoader, SkillLoader, StatLoader};

/// Content factory that loads skill tree content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── session.toml
/// ├── skills.ron
/// ├── resources.ron
/// └── stats.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The bundled sample content shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load session configuration from `session.toml`.
    pub fn load_config(&self) -> LoadResult<SessionConfig> {
        ConfigLoader::load(&self.data_dir.join("session.toml"))
    }

    /// Load skill definitions from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load the resource catalog from `resources.ron`.
    pub fn load_resources(&self) -> LoadResult<ResourceCatalog> {
        ResourceLoader::load(&self.data_dir.join("resources.ron"))
    }

    /// Load stat base values from `stats.ron`.
    pub fn load_stats(&self) -> LoadResult<Vec<StatDefinition>> {
        StatLoader::load(&self.data_dir.join("stats.ron"))
    }
}
