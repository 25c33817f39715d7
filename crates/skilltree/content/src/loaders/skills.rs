//! Skill definition loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skilltree_core::SkillDefinition;

use crate::loaders::{LoadResult, read_file};

/// Skill file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillFile {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill definitions from a RON file, in authored order.
    ///
    /// The definitions are not validated here; see
    /// [`skilltree_core::SkillGraphService::new`].
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        let skills = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;

        tracing::debug!("loaded {} skills from {}", skills.len(), path.display());
        Ok(skills)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillDefinition>> {
        let file: SkillFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill RON: {}", e))?;

        Ok(file.skills)
    }
}
