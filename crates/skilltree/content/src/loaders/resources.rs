//! Resource catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skilltree_core::{ResourceCatalog, ResourceEntry};

use crate::loaders::{LoadResult, read_file};

/// Resource catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceFile {
    pub entries: Vec<ResourceEntry>,
}

/// Loader for the resource catalog from RON files.
pub struct ResourceLoader;

impl ResourceLoader {
    /// Load a resource catalog from a RON file.
    ///
    /// Blank keys are skipped and duplicates keep their first occurrence, as
    /// in [`ResourceCatalog::new`].
    pub fn load(path: &Path) -> LoadResult<ResourceCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;

        tracing::debug!(
            "loaded {} resource entries from {}",
            catalog.entries().len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn parse(content: &str) -> LoadResult<ResourceCatalog> {
        let file: ResourceFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse resource RON: {}", e))?;

        Ok(ResourceCatalog::new(file.entries))
    }
}

#[cfg(test)]
mod tests {
    use skilltree_core::{CostCatalog, CostDefinition, ResourceType};

    use super::*;

    #[test]
    fn builds_catalog_from_entries() {
        let catalog = ResourceLoader::parse(
            r#"(
                entries: [
                    (key: "gold", resource_type: Currency, display_name: Some("Gold")),
                    (key: "GOLD", resource_type: Currency),
                    (key: "  ", resource_type: Currency),
                    (key: "rune", resource_type: Item),
                ],
            )"#,
        )
        .expect("resource file should parse");

        assert_eq!(catalog.keys(ResourceType::Currency), vec!["gold".to_string()]);
        assert!(catalog.is_defined(&CostDefinition::currency("Gold", 1)));
        assert!(catalog.is_defined(&CostDefinition::new("rune", ResourceType::Item, 1)));
        assert_eq!(catalog.display_name(ResourceType::Currency, "gold"), Some("Gold"));
    }

    #[test]
    fn rejects_unknown_resource_type() {
        assert!(
            ResourceLoader::parse(r#"(entries: [(key: "gold", resource_type: Gems)])"#).is_err()
        );
    }
}
