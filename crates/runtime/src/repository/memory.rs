//! In-memory ProgressionStore implementation for tests and local runs.

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use skilltree_core::{LevelMap, ProgressionStore, StoreError};

/// In-memory implementation of [`ProgressionStore`].
///
/// Counts `save_all` calls so callers can assert how often progression was
/// persisted.
#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
    levels: RwLock<LevelMap>,
    saves: AtomicUsize,
}

impl InMemoryProgressStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with previously saved levels.
    pub fn with_levels(levels: LevelMap) -> Self {
        Self {
            levels: RwLock::new(levels),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save_all` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of everything currently stored.
    pub fn snapshot(&self) -> Result<LevelMap, StoreError> {
        let levels = self
            .levels
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(levels.clone())
    }
}

impl ProgressionStore for InMemoryProgressStore {
    fn level(&self, skill_id: &str) -> Result<i32, StoreError> {
        let levels = self
            .levels
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(levels.get(skill_id).copied().unwrap_or(0))
    }

    fn load_all(&self, skill_ids: &[&str]) -> Result<LevelMap, StoreError> {
        let levels = self
            .levels
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(skill_ids
            .iter()
            .map(|id| (id.to_string(), levels.get(*id).copied().unwrap_or(0)))
            .collect())
    }

    fn save_all(&self, levels: &LevelMap) -> Result<(), StoreError> {
        let mut stored = self
            .levels
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        for (skill_id, level) in levels {
            stored.insert(skill_id.clone(), *level);
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self, skill_ids: &[&str]) -> Result<(), StoreError> {
        let mut stored = self
            .levels
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        for skill_id in skill_ids {
            stored.remove(*skill_id);
        }
        Ok(())
    }
}
