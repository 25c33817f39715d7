//! File-based ProgressionStore implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use skilltree_core::{LevelMap, ProgressionStore, StoreError};

const FORMAT_VERSION: u32 = 1;

/// On-disk layout of the save file.
#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    version: u32,
    levels: LevelMap,
}

/// File-based implementation of [`ProgressionStore`].
///
/// All levels live in a single JSON document:
///
/// ```json
/// { "version": 1, "levels": { "ember_bolt": 2, "flame_wave": 0 } }
/// ```
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write leaves the previous save intact. A missing file reads as
/// an empty save.
#[derive(Debug)]
pub struct FileProgressStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileProgressStore {
    /// Create a store backed by `path`, creating its parent directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SaveFile, StoreError> {
        if !self.path.exists() {
            return Ok(SaveFile {
                version: FORMAT_VERSION,
                levels: LevelMap::new(),
            });
        }

        let bytes = fs::read(&self.path)?;
        let file: SaveFile = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        if file.version != FORMAT_VERSION {
            return Err(StoreError::Serialization(format!(
                "unsupported save version {} in {}",
                file.version,
                self.path.display()
            )));
        }
        Ok(file)
    }

    fn write(&self, file: &SaveFile) -> Result<(), StoreError> {
        let temp_path = self.path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(file)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            "saved {} skill levels to {}",
            file.levels.len(),
            self.path.display()
        );
        Ok(())
    }

    fn update<F>(&self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut LevelMap),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;
        let mut file = self.read()?;
        change(&mut file.levels);
        self.write(&file)
    }
}

impl ProgressionStore for FileProgressStore {
    fn level(&self, skill_id: &str) -> Result<i32, StoreError> {
        let file = self.read()?;
        Ok(file.levels.get(skill_id).copied().unwrap_or(0))
    }

    fn load_all(&self, skill_ids: &[&str]) -> Result<LevelMap, StoreError> {
        let file = self.read()?;
        tracing::debug!(
            "loaded progression from {} ({} entries)",
            self.path.display(),
            file.levels.len()
        );
        Ok(skill_ids
            .iter()
            .map(|id| (id.to_string(), file.levels.get(*id).copied().unwrap_or(0)))
            .collect())
    }

    fn save_all(&self, levels: &LevelMap) -> Result<(), StoreError> {
        self.update(|stored| {
            for (skill_id, level) in levels {
                stored.insert(skill_id.clone(), *level);
            }
        })
    }

    fn clear(&self, skill_ids: &[&str]) -> Result<(), StoreError> {
        self.update(|stored| {
            for skill_id in skill_ids {
                stored.remove(*skill_id);
            }
        })
    }
}
