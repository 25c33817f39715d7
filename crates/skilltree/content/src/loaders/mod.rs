//! Content loaders for reading skill tree data from files.
//!
//! RON is used for authored content (skills, resources, stats) and TOML for
//! session configuration.

pub mod config;
pub mod factory;
pub mod resources;
pub mod skills;
pub mod stats;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use resources::{ResourceFile, ResourceLoader};
pub use skills::{SkillFile, SkillLoader};
pub use stats::{StatFile, StatLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
