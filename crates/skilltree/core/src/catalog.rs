//! Registry of legal cost keys per resource type.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use strum::IntoEnumIterator;

use crate::definition::{CostDefinition, ResourceType};
use crate::key::normalize_key;

/// Answers which `(resource type, key)` pairs are defined.
pub trait CostCatalog {
    /// True when the cost's key is declared under the cost's resource type.
    fn is_defined(&self, cost: &CostDefinition) -> bool;

    /// Every key declared under `resource_type`, normalized and sorted.
    fn keys(&self, resource_type: ResourceType) -> Vec<String>;
}

/// Authored catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceEntry {
    pub key: String,
    pub resource_type: ResourceType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: Option<String>,
}

impl ResourceEntry {
    pub fn new(key: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            key: key.into(),
            resource_type,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// In-memory [`CostCatalog`] built from authored entries.
///
/// Keys are trimmed and compared case-insensitively. Blank keys are skipped
/// and duplicates keep the first occurrence.
#[derive(Clone, Debug, Default)]
pub struct ResourceCatalog {
    defined: HashSet<(ResourceType, String)>,
    keys_by_type: BTreeMap<ResourceType, BTreeSet<String>>,
    entries: Vec<ResourceEntry>,
}

impl ResourceCatalog {
    pub fn new(entries: impl IntoIterator<Item = ResourceEntry>) -> Self {
        let mut keys_by_type: BTreeMap<ResourceType, BTreeSet<String>> = ResourceType::iter()
            .map(|resource_type| (resource_type, BTreeSet::new()))
            .collect();
        let mut defined = HashSet::new();
        let mut kept = Vec::new();

        for entry in entries {
            let Some(key) = normalize_key(&entry.key) else {
                tracing::trace!("skipping catalog entry with blank key");
                continue;
            };

            if !defined.insert((entry.resource_type, key.clone())) {
                tracing::debug!(
                    "duplicate resource in catalog: {}/{}, first wins",
                    entry.resource_type,
                    key
                );
                continue;
            }

            keys_by_type
                .entry(entry.resource_type)
                .or_default()
                .insert(key);
            kept.push(entry);
        }

        Self {
            defined,
            keys_by_type,
            entries: kept,
        }
    }

    /// Entries that survived de-duplication, in authored order.
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// Display name of a key, falling back to the key itself.
    pub fn display_name(&self, resource_type: ResourceType, key: &str) -> Option<&str> {
        let wanted = normalize_key(key)?;
        self.entries
            .iter()
            .find(|entry| {
                entry.resource_type == resource_type
                    && normalize_key(&entry.key).as_deref() == Some(wanted.as_str())
            })
            .map(|entry| entry.display_name.as_deref().unwrap_or(entry.key.trim()))
    }
}

impl CostCatalog for ResourceCatalog {
    fn is_defined(&self, cost: &CostDefinition) -> bool {
        match normalize_key(&cost.key) {
            Some(key) => self.defined.contains(&(cost.resource_type, key)),
            None => false,
        }
    }

    fn keys(&self, resource_type: ResourceType) -> Vec<String> {
        self.keys_by_type
            .get(&resource_type)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }
}
